//! CLI module
//!
//! Command-line interface for paginating JSON datasets.
//!
//! # Commands
//!
//! - `paginate` - Print one page of a JSON array
//! - `validate` - Check a settings file
//! - `cursor` - Decode a cursor token
//! - `serve` - Start HTTP server mode

mod commands;
mod dataset;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use dataset::Dataset;
pub use runner::Runner;
pub use server::{app, serve, ServerConfig};
