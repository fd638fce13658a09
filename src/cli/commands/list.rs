//! List Command
//!
//! Lists every protocol the knowledge base knows, optionally filtered by
//! category.

use crate::cli::Output;
use crate::engine::ProtocolAnalyzer;
use crate::report;
use crate::types::{Category, Result};

pub fn run(category: Option<Category>) -> Result<()> {
    let analyzer = ProtocolAnalyzer::new()?;
    let defs = analyzer.list_protocols(category);

    let out = Output::new();
    match category {
        Some(cat) => out.header(&format!("Known protocols ({})", cat)),
        None => out.header("Known protocols"),
    }
    println!("{}", report::render_protocol_list(&defs));
    Ok(())
}
