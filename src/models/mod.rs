pub mod grid;
pub mod lookup;

pub use grid::{split_key, GridMapping, GridRecord, KeySeparator};
pub use lookup::{LookupQuery, LookupResult, MatchKind};
