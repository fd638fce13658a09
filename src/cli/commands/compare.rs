//! Compare Command
//!
//! Side-by-side comparison of protocols from the knowledge base.

use crate::engine::ProtocolAnalyzer;
use crate::report::{self, ReportFormat};
use crate::types::Result;

pub fn run(protocols: &[String], format: ReportFormat) -> Result<()> {
    let analyzer = ProtocolAnalyzer::new()?;
    let comparison = analyzer.compare(protocols)?;
    println!("{}", report::render_comparison(&comparison, format)?);
    Ok(())
}
