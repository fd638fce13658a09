//! Analyze Command
//!
//! Scans a project tree for protocol usage and renders the full analysis
//! report in the requested format, to stdout or a file.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::engine::ProtocolAnalyzer;
use crate::report::{self, ReportFormat};
use crate::types::{AnalyzerError, Requirement, Result};

pub struct AnalyzeOptions {
    pub path: PathBuf,
    pub requirement: Option<Requirement>,
    /// Output format; falls back to the configured default
    pub format: Option<ReportFormat>,
    /// Report destination; stdout when absent
    pub output: Option<PathBuf>,
}

pub fn run(options: AnalyzeOptions) -> Result<()> {
    let config = ConfigLoader::load()?;
    let format = match options.format {
        Some(format) => format,
        None => ReportFormat::from_str(&config.report.format).map_err(AnalyzerError::config)?,
    };

    let analyzer = ProtocolAnalyzer::from_config(&config)?;
    let out = Output::new();

    if options.output.is_some() {
        out.info(&format!("Analyzing {}", options.path.display()));
    }

    let result = analyzer.analyze(&options.path, options.requirement)?;
    let rendered = report::render_analysis(&result, format)?;

    match &options.output {
        Some(path) => {
            fs::write(path, rendered)?;
            // The report went to a file; keep warnings visible on the console
            for warning in &result.warnings {
                out.warning(warning);
            }
            out.success(&format!("Report saved to: {}", path.display()));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
