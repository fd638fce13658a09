//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/protoscout/) and project-level configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::scan;
use crate::detector::scanner::{SKIP_DIRS, SOURCE_EXTENSIONS};
use crate::report::ReportFormat;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// File scanning settings
    pub scan: ScanConfig,

    /// Report output settings
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            scan: ScanConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `AnalyzerError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.scan.max_file_size == 0 {
            return Err(crate::types::AnalyzerError::config(
                "scan.max_file_size must be greater than 0",
            ));
        }

        if self.scan.extensions.is_empty() {
            return Err(crate::types::AnalyzerError::config(
                "scan.extensions must not be empty",
            ));
        }

        ReportFormat::from_str(&self.report.format)
            .map_err(crate::types::AnalyzerError::config)?;

        Ok(())
    }
}

// =============================================================================
// Scan Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions included in a scan
    pub extensions: Vec<String>,

    /// Directory names excluded from every scan
    pub skip_dirs: Vec<String>,

    /// Additional glob patterns excluded, relative to the scan root
    pub exclude: Vec<String>,

    /// Maximum file size in bytes
    pub max_file_size: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            skip_dirs: SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            exclude: Vec::new(),
            max_file_size: scan::MAX_FILE_SIZE,
        }
    }
}

// =============================================================================
// Report Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Default output format: text, json, markdown
    pub format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_file_size() {
        let mut config = Config::default();
        config.scan.max_file_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let mut config = Config::default();
        config.report.format = "pdf".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_extensions_cover_common_sources() {
        let config = Config::default();
        for ext in ["py", "js", "ts", "rs"] {
            assert!(config.scan.extensions.iter().any(|e| e == ext));
        }
    }
}
