pub mod encoder;
pub mod lookup;
pub mod normalizer;

pub use encoder::{EncodeReport, GridEncoder};
pub use lookup::ClimateLookup;
pub use normalizer::{KeyNormalizer, NormalizeReport};
