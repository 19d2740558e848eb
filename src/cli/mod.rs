mod cli;

pub use cli::{Cli, is_argument_count_error};
