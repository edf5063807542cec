// CS:GO Patcher - Aligns the legacy CS:GO version marker with the installed client
//
// This is the library crate containing the locator, the patcher and their helpers.
// The binary crate (main.rs) provides the command-line entry point.

pub mod cli;
pub mod config;
pub mod console;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use crate::config::ConfigManager;
pub use cli::Cli;
pub use console::{Console, Level};
pub use models::{PatcherSettings, Platform};
pub use services::{Locator, PatchOutcome, Patcher, RunOutcome, run};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
