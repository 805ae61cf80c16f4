//! External process execution.

pub mod command;

pub use command::{display_command, execute, execute_output, CommandOptions, CommandResult};
