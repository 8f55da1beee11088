//! Command-line adapter for petpal.
//!
//! `petpal serve` runs the web server from `petpal-axum`; the remaining
//! commands (`pets`, `categories`, `ask`, `places`) drive `AppCore` directly
//! and print to the terminal. [`bootstrap`] is the composition root.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary (main.rs)
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, bootstrap_with};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
