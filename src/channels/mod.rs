//! Channels: where conversation input comes from and output goes to.

pub mod cli;
pub mod command;

pub use cli::CliChannel;
pub use command::CliCommand;
