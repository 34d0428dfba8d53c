pub mod ascii_reader;
pub mod mapping_reader;

pub use ascii_reader::{is_grid_record, parse_grid_line, AsciiGridReader, LineStats};
pub use mapping_reader::MappingReader;
