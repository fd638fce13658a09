//! Report Rendering
//!
//! Projects analysis results, protocol comparisons, and migration guides
//! into text, Markdown, or JSON. JSON is the lossless projection: every
//! field of the result types serializes as-is. Text and Markdown are
//! human-facing digests and may truncate lists.
//!
//! Raw recommendation scores are unclamped; display clamps them to 0-100.

use std::collections::BTreeMap;

use crate::types::error::Result;
use crate::types::{AnalysisResult, MigrationGuide, ProtocolBrief, ProtocolDefinition};

/// Recommendations shown in the human-facing formats
const TOP_RECOMMENDATIONS: usize = 3;

/// Pros/cons lines shown per recommendation in the human-facing formats
const TOP_LIST_ITEMS: usize = 3;

// =============================================================================
// Format
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!(
                "Unknown format: {}. Valid values: text, json, markdown",
                s
            )),
        }
    }
}

// =============================================================================
// Analysis Report
// =============================================================================

pub fn render_analysis(result: &AnalysisResult, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        ReportFormat::Markdown => Ok(analysis_markdown(result)),
        ReportFormat::Text => Ok(analysis_text(result)),
    }
}

fn analysis_text(result: &AnalysisResult) -> String {
    let mut lines = vec![
        "Protocol Analysis Report".to_string(),
        "========================".to_string(),
        format!("Project: {}", result.project_path.display()),
        format!("Analyzed: {}", result.timestamp.to_rfc3339()),
        format!("Architecture: {}", result.architecture),
        format!("Complexity: {:.1}", result.complexity_total),
        String::new(),
        format!("Summary: {}", result.summary),
        String::new(),
        "Detected protocols:".to_string(),
    ];

    if result.detected_protocols.is_empty() {
        lines.push("  (none)".to_string());
    }
    for detection in &result.detected_protocols {
        lines.push(format!(
            "  - {}: {} files, {} refs, complexity {:.1}{}{}",
            detection.name,
            detection.file_count(),
            detection.total_matches,
            detection.complexity_score,
            if detection.is_client { " [client]" } else { "" },
            if detection.is_server { " [server]" } else { "" },
        ));
    }

    if !result.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".to_string());
        for warning in &result.warnings {
            lines.push(format!("  [!] {}", warning));
        }
    }

    lines.push(String::new());
    lines.push("Recommendations:".to_string());
    for (i, rec) in result
        .recommendations
        .iter()
        .take(TOP_RECOMMENDATIONS)
        .enumerate()
    {
        lines.push(format!(
            "  {}. {} (score: {:.0}/100)",
            i + 1,
            rec.protocol,
            rec.score.clamp(0.0, 100.0)
        ));
        lines.push(format!(
            "     Migration: {}, Est: {}",
            rec.migration_complexity, rec.estimated_time
        ));
    }

    lines.join("\n")
}

fn analysis_markdown(result: &AnalysisResult) -> String {
    let mut lines = vec![
        "# Protocol Analysis Report".to_string(),
        String::new(),
        format!("**Project:** {}", result.project_path.display()),
        format!("**Analyzed:** {}", result.timestamp.to_rfc3339()),
        format!("**Architecture:** {}", result.architecture),
        format!("**Total Complexity:** {:.1}", result.complexity_total),
        String::new(),
        "## Summary".to_string(),
        String::new(),
        result.summary.clone(),
        String::new(),
    ];

    if !result.warnings.is_empty() {
        lines.push("## Warnings".to_string());
        lines.push(String::new());
        for warning in &result.warnings {
            lines.push(format!("- [!] {}", warning));
        }
        lines.push(String::new());
    }

    lines.push("## Detected Protocols".to_string());
    lines.push(String::new());
    if result.detected_protocols.is_empty() {
        lines.push("No protocols detected.".to_string());
        lines.push(String::new());
    } else {
        lines.push("| Protocol | Files | References | Complexity | Client | Server |".to_string());
        lines.push("|----------|-------|------------|------------|--------|--------|".to_string());
        for detection in &result.detected_protocols {
            lines.push(format!(
                "| {} | {} | {} | {:.1} | {} | {} |",
                detection.name,
                detection.file_count(),
                detection.total_matches,
                detection.complexity_score,
                if detection.is_client { "yes" } else { "" },
                if detection.is_server { "yes" } else { "" },
            ));
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.push(String::new());
    for (i, rec) in result
        .recommendations
        .iter()
        .take(TOP_RECOMMENDATIONS)
        .enumerate()
    {
        lines.push(format!(
            "### {}. {} (Score: {:.0}/100)",
            i + 1,
            rec.protocol,
            rec.score.clamp(0.0, 100.0)
        ));
        lines.push(String::new());
        lines.push(format!(
            "**Migration Complexity:** {}",
            rec.migration_complexity
        ));
        lines.push(format!("**Estimated Time:** {}", rec.estimated_time));
        lines.push(String::new());
        lines.push("**Rationale:**".to_string());
        for reason in &rec.rationale {
            lines.push(format!("- {}", reason));
        }
        lines.push(String::new());
        lines.push("**Pros:**".to_string());
        for pro in rec.pros.iter().take(TOP_LIST_ITEMS) {
            lines.push(format!("- {}", pro));
        }
        lines.push(String::new());
        lines.push("**Cons:**".to_string());
        for con in rec.cons.iter().take(TOP_LIST_ITEMS) {
            lines.push(format!("- {}", con));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

// =============================================================================
// Comparison Report
// =============================================================================

pub fn render_comparison(
    comparison: &BTreeMap<String, ProtocolBrief>,
    format: ReportFormat,
) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(comparison)?),
        ReportFormat::Markdown => {
            let mut lines = vec!["# Protocol Comparison".to_string(), String::new()];
            for (name, brief) in comparison {
                lines.push(format!("## {}", name));
                lines.push(format!("**Category:** {}", brief.category));
                lines.push(format!("**Complexity:** {}/10", brief.complexity));
                lines.push(String::new());
                lines.push("**Pros:**".to_string());
                for pro in &brief.pros {
                    lines.push(format!("- {}", pro));
                }
                lines.push(String::new());
                lines.push("**Cons:**".to_string());
                for con in &brief.cons {
                    lines.push(format!("- {}", con));
                }
                lines.push(String::new());
            }
            Ok(lines.join("\n"))
        }
        ReportFormat::Text => {
            let mut lines = Vec::new();
            for (name, brief) in comparison {
                lines.push(format!("=== {} ===", name));
                lines.push(format!("  Category: {}", brief.category));
                lines.push(format!("  Complexity: {}/10", brief.complexity));
                lines.push(format!(
                    "  Pros: {}",
                    brief
                        .pros
                        .iter()
                        .take(TOP_LIST_ITEMS)
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                lines.push(format!(
                    "  Cons: {}",
                    brief
                        .cons
                        .iter()
                        .take(TOP_LIST_ITEMS)
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                lines.push(String::new());
            }
            Ok(lines.join("\n"))
        }
    }
}

// =============================================================================
// Migration Report
// =============================================================================

pub fn render_migration(guide: &MigrationGuide, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(guide)?),
        ReportFormat::Markdown => {
            let mut lines = vec![
                format!("# Migration Guide: {} -> {}", guide.from, guide.to),
                String::new(),
                format!("**Difficulty:** {}", guide.difficulty),
                format!("**Estimated Time:** {}", guide.estimated_time),
                String::new(),
                "## Steps".to_string(),
                String::new(),
            ];
            for (i, step) in guide.steps.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, step));
            }
            Ok(lines.join("\n"))
        }
        ReportFormat::Text => {
            let mut lines = vec![
                format!("Migration: {} -> {}", guide.from, guide.to),
                format!("Difficulty: {}", guide.difficulty),
                format!("Estimated Time: {}", guide.estimated_time),
                String::new(),
                "Steps:".to_string(),
            ];
            for (i, step) in guide.steps.iter().enumerate() {
                lines.push(format!("  {}. {}", i + 1, step));
            }
            Ok(lines.join("\n"))
        }
    }
}

// =============================================================================
// Protocol List
// =============================================================================

pub fn render_protocol_list(defs: &[&ProtocolDefinition]) -> String {
    let mut lines = Vec::new();
    for def in defs {
        lines.push(String::new());
        lines.push(def.name.clone());
        lines.push(format!("  Category: {}", def.category));
        lines.push(format!("  Complexity: {}/10", def.base_complexity));
        lines.push(format!(
            "  Use cases: {}",
            def.use_cases
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ProtocolAnalyzer;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn sample_result() -> AnalysisResult {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("app.js"),
            "const ws = new WebSocket(url);\n",
        )
        .unwrap();
        ProtocolAnalyzer::new()
            .unwrap()
            .analyze(tmp.path(), None)
            .unwrap()
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(ReportFormat::from_str("json"), Ok(ReportFormat::Json));
        assert_eq!(ReportFormat::from_str("md"), Ok(ReportFormat::Markdown));
        assert!(ReportFormat::from_str("pdf").is_err());
    }

    #[test]
    fn test_json_analysis_roundtrips_losslessly() {
        let result = sample_result();
        let json = render_analysis(&result, ReportFormat::Json).unwrap();
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.architecture, result.architecture);
        assert_eq!(parsed.complexity_total, result.complexity_total);
        assert_eq!(parsed.summary, result.summary);
        assert_eq!(parsed.warnings, result.warnings);
        assert_eq!(
            parsed.detected_protocols.len(),
            result.detected_protocols.len()
        );
        assert_eq!(parsed.recommendations.len(), result.recommendations.len());
        assert_eq!(parsed.timestamp, result.timestamp);
    }

    #[test]
    fn test_text_analysis_mentions_detections() {
        let result = sample_result();
        let text = render_analysis(&result, ReportFormat::Text).unwrap();
        assert!(text.contains("WebSocket"));
        assert!(text.contains("Architecture: frontend"));
        assert!(text.contains("Recommendations:"));
    }

    #[test]
    fn test_markdown_analysis_has_table() {
        let result = sample_result();
        let md = render_analysis(&result, ReportFormat::Markdown).unwrap();
        assert!(md.contains("# Protocol Analysis Report"));
        assert!(md.contains("| Protocol | Files |"));
        assert!(md.contains("| WebSocket |"));
    }

    #[test]
    fn test_comparison_renders_all_formats() {
        let analyzer = ProtocolAnalyzer::new().unwrap();
        let comparison = analyzer
            .compare(&["websocket".to_string(), "sse".to_string()])
            .unwrap();

        let text = render_comparison(&comparison, ReportFormat::Text).unwrap();
        assert!(text.contains("=== WebSocket ==="));

        let md = render_comparison(&comparison, ReportFormat::Markdown).unwrap();
        assert!(md.contains("## WebSocket"));

        let json = render_comparison(&comparison, ReportFormat::Json).unwrap();
        assert!(json.contains("\"complexity\": 3"));
    }

    #[test]
    fn test_migration_renders_numbered_steps() {
        let analyzer = ProtocolAnalyzer::new().unwrap();
        let guide = analyzer.migration_guide("socket.io", "websocket").unwrap();

        let text = render_migration(&guide, ReportFormat::Text).unwrap();
        assert!(text.contains("1. Audit all Socket.IO usage"));
        assert!(text.contains("8. Update documentation"));
        assert!(text.contains("Difficulty: MEDIUM"));
    }

    #[test]
    fn test_protocol_list_renders_all() {
        let analyzer = ProtocolAnalyzer::new().unwrap();
        let listing = render_protocol_list(&analyzer.list_protocols(None));
        assert!(listing.contains("WebSocket"));
        assert!(listing.contains("MQTT"));
        assert!(listing.contains("Category: rpc"));
    }
}
