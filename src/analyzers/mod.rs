pub mod grid_analyzer;

pub use grid_analyzer::{GeographicBounds, GridAnalyzer, GridSummary};
