//! CLI command implementations.
//!
//! Commands implement the [`Command`] trait, which provides a uniform
//! interface for executing and reporting results. The binary has a single
//! command, [`SearchCommand`], built by [`CommandDispatcher`] from the
//! parsed arguments.

pub mod dispatcher;
pub mod search;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use search::SearchCommand;
