//! Migrate Command
//!
//! Prints the fixed migration checklist between two protocols.

use crate::engine::ProtocolAnalyzer;
use crate::report::{self, ReportFormat};
use crate::types::Result;

pub fn run(from: &str, to: &str, format: ReportFormat) -> Result<()> {
    let analyzer = ProtocolAnalyzer::new()?;
    let guide = analyzer.migration_guide(from, to)?;
    println!("{}", report::render_migration(&guide, format)?);
    Ok(())
}
