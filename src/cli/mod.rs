pub mod args;
pub mod commands;

pub use args::{Cli, Commands, SeparatorArg};
pub use commands::{init_logging, run};
