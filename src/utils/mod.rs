pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{format_coordinate, snap_to_cell_center};
pub use filename::default_encoded_filename;
pub use progress::ProgressReporter;
