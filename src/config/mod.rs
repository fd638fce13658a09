//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/protoscout/config.toml)
//! 3. Project config (.protoscout.toml)
//! 4. Environment variables (PROTOSCOUT_*)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Config, ReportConfig, ScanConfig};
