//! Analysis Orchestrator
//!
//! [`ProtocolAnalyzer`] owns the knowledge base and wires the pipeline:
//! detector, complexity calculator, architecture classifier, recommendation
//! engine. One synchronous pass per call; the result object is immutable
//! after return.
//!
//! Entry points: [`ProtocolAnalyzer::analyze`], [`ProtocolAnalyzer::compare`],
//! [`ProtocolAnalyzer::migration_guide`], [`ProtocolAnalyzer::list_protocols`].

use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use tracing::info;

use crate::detector::Detector;
use crate::recommend;
use crate::registry::ProtocolRegistry;
use crate::scoring::{architecture, complexity};
use crate::types::error::Result;
use crate::types::{
    AnalysisResult, Architecture, Category, Match, MigrationGuide, MigrationTier, ProtocolBrief,
    ProtocolDefinition, ProtocolDetection, Recommendation, Requirement,
};

pub struct ProtocolAnalyzer {
    registry: ProtocolRegistry,
    scan_extensions: Option<Vec<String>>,
    scan_skip_dirs: Option<Vec<String>>,
    scan_exclude: Vec<String>,
    max_file_size: u64,
}

impl ProtocolAnalyzer {
    /// Analyzer over the built-in knowledge base with default scan settings.
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(ProtocolRegistry::builtin()?))
    }

    /// Analyzer over a caller-supplied registry.
    pub fn with_registry(registry: ProtocolRegistry) -> Self {
        Self {
            registry,
            scan_extensions: None,
            scan_skip_dirs: None,
            scan_exclude: Vec::new(),
            max_file_size: crate::constants::scan::MAX_FILE_SIZE,
        }
    }

    /// Analyzer over the built-in knowledge base, scan settings from config.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Ok(Self::with_registry(ProtocolRegistry::builtin()?)
            .with_scan_extensions(config.scan.extensions.clone())
            .with_scan_skip_dirs(config.scan.skip_dirs.clone())
            .with_scan_exclude(config.scan.exclude.clone())
            .with_max_file_size(config.scan.max_file_size))
    }

    pub fn with_scan_extensions(mut self, extensions: Vec<String>) -> Self {
        self.scan_extensions = Some(extensions);
        self
    }

    pub fn with_scan_skip_dirs(mut self, skip_dirs: Vec<String>) -> Self {
        self.scan_skip_dirs = Some(skip_dirs);
        self
    }

    pub fn with_scan_exclude(mut self, patterns: Vec<String>) -> Self {
        self.scan_exclude = patterns;
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn registry(&self) -> &ProtocolRegistry {
        &self.registry
    }

    // =========================================================================
    // Analyze
    // =========================================================================

    /// Analyze a project tree for protocol usage.
    ///
    /// Fails with `InvalidPath` when `root` exists and is not a directory;
    /// zero detections is a valid result, never an error.
    pub fn analyze(&self, root: &Path, requirement: Option<Requirement>) -> Result<AnalysisResult> {
        let mut detector = Detector::new(&self.registry)?
            .with_exclude(self.scan_exclude.clone())
            .with_max_file_size(self.max_file_size);
        if let Some(extensions) = &self.scan_extensions {
            detector = detector.with_extensions(extensions.clone());
        }
        if let Some(skip_dirs) = &self.scan_skip_dirs {
            detector = detector.with_skip_dirs(skip_dirs.clone());
        }

        let matches = detector.scan(root)?;
        let detections = self.aggregate(matches);
        let architecture = architecture::classify(&detections);
        let complexity_total: f64 = detections.iter().map(|d| d.complexity_score).sum();
        let recommendations = recommend::recommend(&self.registry, &detections, requirement);
        let warnings = recommend::warnings(&self.registry, &detections);
        let summary = summarize(&detections, &recommendations, architecture);

        info!(
            root = %root.display(),
            detections = detections.len(),
            architecture = %architecture,
            "analysis complete"
        );

        Ok(AnalysisResult {
            project_path: root.to_path_buf(),
            timestamp: Utc::now(),
            detected_protocols: detections,
            architecture,
            complexity_total,
            recommendations,
            summary,
            warnings,
        })
    }

    /// Fold raw matches into per-protocol aggregates, preserving first-
    /// detection order. Counting and file-set union are commutative and
    /// associative, so aggregation is independent of match ordering.
    fn aggregate(&self, matches: Vec<Match>) -> Vec<ProtocolDetection> {
        let mut order: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, Vec<Match>> = HashMap::new();

        for m in matches {
            if !grouped.contains_key(&m.protocol) {
                order.push(m.protocol.clone());
            }
            grouped.entry(m.protocol.clone()).or_default().push(m);
        }

        order
            .into_iter()
            .map(|key| {
                let group = grouped.remove(&key).unwrap_or_default();
                let files: BTreeSet<_> = group.iter().map(|m| m.file.clone()).collect();
                let def = self.registry.resolve(&key);

                let complexity_score = def
                    .map(|d| complexity::score(d, &group))
                    .unwrap_or_default();
                let name = def
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| key.clone());

                ProtocolDetection {
                    protocol: key,
                    name,
                    is_client: group.iter().any(|m| m.role.client),
                    is_server: group.iter().any(|m| m.role.server),
                    total_matches: group.len(),
                    complexity_score,
                    files,
                }
            })
            .collect()
    }

    // =========================================================================
    // Compare
    // =========================================================================

    /// Compare protocols side by side, keyed by display name.
    ///
    /// Fails with `NotFound` if any requested name is unregistered.
    pub fn compare(&self, names: &[String]) -> Result<BTreeMap<String, ProtocolBrief>> {
        let mut comparison = BTreeMap::new();
        for name in names {
            let def = self.registry.get(name)?;
            comparison.insert(def.name.clone(), ProtocolBrief::from(def));
        }
        Ok(comparison)
    }

    // =========================================================================
    // Migration Guide
    // =========================================================================

    /// Fixed migration checklist from one protocol to another.
    ///
    /// Difficulty and time derive from the target's base-complexity tier
    /// shifted up one tier for migration overhead.
    pub fn migration_guide(&self, from: &str, to: &str) -> Result<MigrationGuide> {
        let from_def = self.registry.get(from)?;
        let to_def = self.registry.get(to)?;

        let difficulty = MigrationTier::from_base_complexity(to_def.base_complexity).promote();

        let dependencies = if to_def.dependencies.is_empty() {
            to_def.name.clone()
        } else {
            to_def
                .dependencies
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        let steps = vec![
            format!("Audit all {} usage in the codebase", from_def.name),
            format!("Install {} dependencies: {}", to_def.name, dependencies),
            format!("Build an adapter or shim for {} connections", to_def.name),
            "Migrate connection initialization code".to_string(),
            "Migrate event handlers and callbacks".to_string(),
            "Test all communication paths".to_string(),
            format!("Remove {} dependencies", from_def.name),
            "Update documentation".to_string(),
        ];

        Ok(MigrationGuide {
            from: from_def.name.clone(),
            to: to_def.name.clone(),
            difficulty,
            estimated_time: difficulty.estimated_time().to_string(),
            steps,
        })
    }

    // =========================================================================
    // List
    // =========================================================================

    /// Known protocols, optionally filtered by category, in registry order.
    pub fn list_protocols(&self, category: Option<Category>) -> Vec<&ProtocolDefinition> {
        match category {
            Some(cat) => self.registry.by_category(cat),
            None => self.registry.all().iter().collect(),
        }
    }
}

/// Human-readable one-paragraph summary of an analysis.
fn summarize(
    detections: &[ProtocolDetection],
    recommendations: &[Recommendation],
    architecture: Architecture,
) -> String {
    if detections.is_empty() {
        return "No communication protocols detected. This project may not yet implement network communication.".to_string();
    }

    let names: Vec<&str> = detections.iter().map(|d| d.name.as_str()).collect();
    let mut summary = format!(
        "Architecture: {}. Detected protocols: {}.",
        architecture,
        names.join(", ")
    );

    if let Some(top) = recommendations.first() {
        summary.push_str(&format!(
            " Recommended approach: {} (score: {:.0}/100).",
            top.protocol,
            top.score.clamp(0.0, 100.0)
        ));
        if let Some(reason) = top.rationale.first() {
            summary.push_str(&format!(" Rationale: {}.", reason));
        }
    }

    summary
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnalyzerError;
    use std::fs;
    use tempfile::TempDir;

    fn analyzer() -> ProtocolAnalyzer {
        ProtocolAnalyzer::new().unwrap()
    }

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_empty_tree_is_valid_result() {
        let tmp = TempDir::new().unwrap();
        let result = analyzer().analyze(tmp.path(), None).unwrap();

        assert!(result.detected_protocols.is_empty());
        assert_eq!(result.architecture, Architecture::Unknown);
        assert_eq!(result.complexity_total, 0.0);
        assert!(!result.recommendations.is_empty());
        assert!(result.summary.contains("No communication protocols"));
    }

    #[test]
    fn test_missing_root_is_valid_result() {
        let result = analyzer()
            .analyze(Path::new("/does/not/exist"), None)
            .unwrap();
        assert!(result.detected_protocols.is_empty());
        assert_eq!(result.architecture, Architecture::Unknown);
    }

    #[test]
    fn test_file_root_fails_invalid_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("app.js");
        fs::write(&file, "code").unwrap();

        let err = analyzer().analyze(&file, None).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidPath { .. }));
    }

    #[test]
    fn test_two_websocket_files_scenario() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.js", "const ws = new WebSocket(url);\n");
        write(tmp.path(), "b.js", "const ws = new WebSocket(other);\n");

        let result = analyzer().analyze(tmp.path(), None).unwrap();

        assert_eq!(result.detected_protocols.len(), 1);
        let detection = &result.detected_protocols[0];
        assert_eq!(detection.protocol, "websocket");
        assert_eq!(detection.file_count(), 2);
        assert_eq!(detection.total_matches, 2);
        assert!(detection.file_count() <= detection.total_matches);
        assert!(detection.is_client);
        assert!(!detection.is_server);

        // Client-only usage classifies as frontend
        assert_eq!(result.architecture, Architecture::Frontend);

        // Score bounded by base * max factors
        assert!(detection.complexity_score > 0.0);
        assert!(detection.complexity_score <= 3.0 * 2.0 * 1.0 * 1.5);

        // Top recommendation cites the existing usage with its count
        let top = &result.recommendations[0];
        assert_eq!(top.protocol, "WebSocket");
        assert!(top.rationale.iter().any(|r| r.contains("2 references")));
    }

    #[test]
    fn test_socketio_plus_websocket_warnings() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "rt.js",
            "const io = require('socket.io');\nconst ws = new WebSocket(url);\n",
        );

        let result = analyzer().analyze(tmp.path(), None).unwrap();

        assert!(
            result.warnings.iter().any(|w| w.contains("version mismatch")),
            "missing version warning: {:?}",
            result.warnings
        );
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("Consider consolidating")),
            "missing consolidation warning: {:?}",
            result.warnings
        );
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.py", "import requests\n");
        write(tmp.path(), "b.js", "const ws = new WebSocket(url);\n");

        let analyzer = analyzer();
        let first = analyzer.analyze(tmp.path(), None).unwrap();
        let second = analyzer.analyze(tmp.path(), None).unwrap();

        assert_eq!(
            format!("{:?}", first.detected_protocols),
            format!("{:?}", second.detected_protocols)
        );
        assert_eq!(first.architecture, second.architecture);
        assert_eq!(first.complexity_total, second.complexity_total);
        let order = |r: &AnalysisResult| {
            r.recommendations
                .iter()
                .map(|rec| rec.protocol.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn test_compare_known_protocols() {
        let comparison = analyzer()
            .compare(&["websocket".to_string(), "grpc".to_string()])
            .unwrap();
        assert_eq!(comparison.len(), 2);
        assert_eq!(comparison["WebSocket"].complexity, 3);
        assert_eq!(comparison["gRPC"].category, Category::Rpc);
    }

    #[test]
    fn test_compare_unknown_fails_not_found() {
        let err = analyzer()
            .compare(&["websocket".to_string(), "carrier-pigeon".to_string()])
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::NotFound { .. }));
    }

    #[test]
    fn test_migration_guide_socketio_to_websocket() {
        let guide = analyzer().migration_guide("socket.io", "websocket").unwrap();

        assert_eq!(guide.from, "Socket.IO");
        assert_eq!(guide.to, "WebSocket");
        assert_eq!(guide.steps.len(), 8);
        // WebSocket's base tier is LOW; shifted up one for migration overhead
        assert_eq!(guide.difficulty, MigrationTier::Medium);
        assert_eq!(guide.estimated_time, "2-4 hours");
        assert!(guide.steps[0].contains("Socket.IO"));
        assert!(guide.steps[1].contains("WebSocket"));
        assert!(guide.steps[7].contains("documentation"));
    }

    #[test]
    fn test_migration_guide_unknown_fails_not_found() {
        let err = analyzer()
            .migration_guide("carrier-pigeon", "websocket")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::NotFound { .. }));

        let err = analyzer()
            .migration_guide("websocket", "carrier-pigeon")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::NotFound { .. }));
    }

    #[test]
    fn test_migration_to_high_tier_saturates() {
        let guide = analyzer().migration_guide("http_rest", "grpc").unwrap();
        assert_eq!(guide.difficulty, MigrationTier::High);
        assert_eq!(guide.estimated_time, "1-5 days");
    }

    #[test]
    fn test_list_protocols_all_and_filtered() {
        let analyzer = analyzer();
        assert_eq!(analyzer.list_protocols(None).len(), 8);

        let streaming = analyzer.list_protocols(Some(Category::Streaming));
        assert_eq!(streaming.len(), 1);
        assert_eq!(streaming[0].key, "sse");
    }

    #[test]
    fn test_requirement_shifts_scores() {
        let tmp = TempDir::new().unwrap();
        let analyzer = analyzer();

        let neutral = analyzer.analyze(tmp.path(), None).unwrap();
        let realtime = analyzer
            .analyze(tmp.path(), Some(Category::Realtime))
            .unwrap();

        let score = |r: &AnalysisResult, name: &str| {
            r.recommendations
                .iter()
                .find(|rec| rec.protocol == name)
                .unwrap()
                .score
        };
        assert_eq!(
            score(&realtime, "WebSocket"),
            score(&neutral, "WebSocket") + 20.0
        );
    }
}
