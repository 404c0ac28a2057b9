//! Configuration module

pub mod cli;
pub mod settings;

pub use cli::{CliArgs, OutputFormat};
pub use settings::Settings;
