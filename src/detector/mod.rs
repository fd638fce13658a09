//! Protocol Detector
//!
//! Walks a directory tree and applies the knowledge base's detection rules
//! to raw file text, producing one [`Match`] per rule hit. Matching is
//! strictly lexical; file contents are never parsed as syntax.
//!
//! A missing root yields an empty match list. A root that exists but is not
//! a directory fails with `InvalidPath`. Unreadable or binary files are
//! skipped silently and the scan continues.

pub mod roles;
pub mod scanner;

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::constants::scan;
use crate::registry::ProtocolRegistry;
use crate::types::error::Result;
use crate::types::{AnalyzerError, Match};

use roles::RoleClassifier;
use scanner::FileScanner;

pub struct Detector<'r> {
    registry: &'r ProtocolRegistry,
    roles: RoleClassifier,
    extensions: Option<Vec<String>>,
    skip_dirs: Option<Vec<String>>,
    exclude: Vec<String>,
    max_file_size: u64,
}

impl<'r> Detector<'r> {
    pub fn new(registry: &'r ProtocolRegistry) -> Result<Self> {
        Ok(Self {
            registry,
            roles: RoleClassifier::new()?,
            extensions: None,
            skip_dirs: None,
            exclude: Vec::new(),
            max_file_size: scan::MAX_FILE_SIZE,
        })
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn with_skip_dirs(mut self, skip_dirs: Vec<String>) -> Self {
        self.skip_dirs = Some(skip_dirs);
        self
    }

    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Scan a directory tree for protocol usage.
    ///
    /// Returns one [`Match`] per (protocol, rule, line) hit, grouped by
    /// protocol in registry order within each file.
    pub fn scan(&self, root: &Path) -> Result<Vec<Match>> {
        if !root.exists() {
            debug!(root = %root.display(), "scan root does not exist");
            return Ok(Vec::new());
        }
        if !root.is_dir() {
            return Err(AnalyzerError::invalid_path(root));
        }

        let mut scanner = FileScanner::source_files(root)
            .with_exclude(self.exclude.clone())
            .with_max_file_size(self.max_file_size);
        if let Some(extensions) = &self.extensions {
            scanner = scanner.with_extensions(extensions.clone());
        }
        if let Some(skip_dirs) = &self.skip_dirs {
            scanner = scanner.with_skip_dirs(skip_dirs.clone());
        }
        let files = scanner.scan()?;
        debug!(files = files.len(), "enumerated source files");

        let mut matches = Vec::new();
        for file in &files {
            match fs::read_to_string(&file.path) {
                Ok(text) => self.scan_text(&file.path, &text, &mut matches),
                Err(e) => {
                    // Recoverable per-file condition: skip and continue
                    debug!(path = %file.path.display(), error = %e, "skipping unreadable file");
                }
            }
        }

        info!(
            root = %root.display(),
            files = files.len(),
            matches = matches.len(),
            "scan complete"
        );
        Ok(matches)
    }

    /// Run every registered rule over one file's text.
    fn scan_text(&self, path: &Path, text: &str, out: &mut Vec<Match>) {
        let lines: Vec<&str> = text.lines().collect();

        for def in self.registry.all() {
            for rule in self.registry.rules(&def.key) {
                for (idx, line) in lines.iter().enumerate() {
                    if !rule.regex.is_match(line) {
                        continue;
                    }

                    let context = context_window(&lines, idx);
                    let role = self.roles.classify(&context);
                    out.push(Match {
                        file: path.to_path_buf(),
                        protocol: def.key.clone(),
                        line: idx + 1,
                        pattern: rule.regex.as_str().to_string(),
                        confidence: rule.confidence,
                        context,
                        role,
                    });
                }
            }
        }
    }
}

/// Lines around a hit, `CONTEXT_LINES` either side.
fn context_window(lines: &[&str], idx: usize) -> String {
    let start = idx.saturating_sub(scan::CONTEXT_LINES);
    let end = (idx + scan::CONTEXT_LINES + 1).min(lines.len());
    lines[start..end].join("\n")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn registry() -> ProtocolRegistry {
        ProtocolRegistry::builtin().unwrap()
    }

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_root_yields_empty() {
        let registry = registry();
        let detector = Detector::new(&registry).unwrap();
        let matches = detector.scan(Path::new("/does/not/exist")).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_file_root_fails_invalid_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("app.js");
        fs::write(&file, "code").unwrap();

        let registry = registry();
        let detector = Detector::new(&registry).unwrap();
        let err = detector.scan(&file).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidPath { .. }));
    }

    #[test]
    fn test_detects_websocket_with_rule_confidence() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "client.js", "const ws = new WebSocket(url);\n");

        let registry = registry();
        let detector = Detector::new(&registry).unwrap();
        let matches = detector.scan(tmp.path()).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].protocol, "websocket");
        assert_eq!(matches[0].line, 1);
        assert!((matches[0].confidence - 0.95).abs() < f64::EPSILON);
        assert!(matches[0].role.client);
        assert!(!matches[0].role.server);
    }

    #[test]
    fn test_multiple_rules_produce_multiple_matches() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "client.js",
            "const ws = new WebSocket(\"wss://example.com\");\nws.onmessage = handle;\n",
        );

        let registry = registry();
        let detector = Detector::new(&registry).unwrap();
        let matches = detector.scan(tmp.path()).unwrap();

        // new WebSocket( + wss:// + .onmessage =
        let websocket: Vec<_> = matches.iter().filter(|m| m.protocol == "websocket").collect();
        assert_eq!(websocket.len(), 3);
    }

    #[test]
    fn test_skips_dependency_directories() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "node_modules/ws/index.js",
            "const ws = new WebSocket(url);\n",
        );

        let registry = registry();
        let detector = Detector::new(&registry).unwrap();
        let matches = detector.scan(tmp.path()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_skips_unreadable_files_and_continues() {
        let tmp = TempDir::new().unwrap();
        // Invalid UTF-8 makes read_to_string fail; the scan must continue
        fs::write(tmp.path().join("binary.js"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();
        write(tmp.path(), "ok.js", "const ws = new WebSocket(url);\n");

        let registry = registry();
        let detector = Detector::new(&registry).unwrap();
        let matches = detector.scan(tmp.path()).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].file.ends_with("ok.js"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "shouty.js", "NEW WEBSOCKET(url);\n");

        let registry = registry();
        let detector = Detector::new(&registry).unwrap();
        let matches = detector.scan(tmp.path()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_server_context_classified_server() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "server.py",
            "import websocket\nserver.serve(port)\n",
        );

        let registry = registry();
        let detector = Detector::new(&registry).unwrap();
        let matches = detector.scan(tmp.path()).unwrap();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].role.server);
        assert!(!matches[0].role.client);
    }
}
