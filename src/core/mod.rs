//! Core application functionality
//!
//! This module contains the process-level plumbing:
//! - CLI parsing and validation
//! - Settings from the user config file
//! - Error reporting and exit codes
//! - The generation runner

pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::{ConfigFile, Settings};
pub use runner::{generate_font, run_app, GenerationReport, GenerationRequest};
