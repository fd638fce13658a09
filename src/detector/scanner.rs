use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::constants::scan;
use crate::types::Result;

/// Source extensions scanned for protocol usage
pub const SOURCE_EXTENSIONS: &[&str] = &["py", "js", "ts", "jsx", "tsx", "java", "go", "rs"];

/// Dependency and build-artifact directories excluded from every scan.
/// Third-party code produces false positives and unbounded scan cost.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "env",
    "dist",
    "build",
    ".cache",
    "coverage",
    ".pytest_cache",
    ".mypy_cache",
    "target",
    "vendor",
];

pub struct FileScanner {
    root: PathBuf,
    extensions: Vec<String>,
    skip_dirs: Vec<String>,
    exclude: Vec<String>,
    max_file_size: u64,
}

impl FileScanner {
    /// Create a scanner over source files with the default skip set.
    pub fn source_files<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            skip_dirs: SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            exclude: Vec::new(),
            max_file_size: scan::MAX_FILE_SIZE,
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_skip_dirs(mut self, skip_dirs: Vec<String>) -> Self {
        self.skip_dirs = skip_dirs;
        self
    }

    /// Additional glob patterns, matched against paths relative to the root.
    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build();

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if self.in_skip_dir(path) || self.matches_exclude(path) {
                continue;
            }

            if !self.has_source_extension(path) {
                continue;
            }

            if let Ok(metadata) = path.metadata() {
                if metadata.len() > self.max_file_size {
                    continue;
                }

                files.push(ScannedFile {
                    path: path.to_path_buf(),
                    size: metadata.len(),
                });
            }
        }

        Ok(files)
    }

    fn in_skip_dir(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map(|name| self.skip_dirs.iter().any(|d| d == name))
                .unwrap_or(false)
        })
    }

    fn matches_exclude(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = relative.to_string_lossy();

        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&relative))
                .unwrap_or(false)
        })
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub size: u64,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app.js", "code");
        touch(tmp.path(), "readme.md", "docs");
        touch(tmp.path(), "data.csv", "1,2");

        let files = FileScanner::source_files(tmp.path()).scan().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["app.js"]);
    }

    #[test]
    fn test_scan_skips_dependency_dirs() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/main.py", "code");
        touch(tmp.path(), "node_modules/pkg/index.js", "vendored");
        touch(tmp.path(), "vendor/lib.go", "vendored");
        touch(tmp.path(), "target/debug/gen.rs", "artifact");

        let files = FileScanner::source_files(tmp.path()).scan().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("src/main.py"));
    }

    #[test]
    fn test_scan_skips_oversized_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "big.js", &"x".repeat(64));
        touch(tmp.path(), "small.js", "x");

        let files = FileScanner::source_files(tmp.path())
            .with_max_file_size(10)
            .scan()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("small.js"));
    }

    #[test]
    fn test_scan_honors_exclude_globs() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/app.ts", "code");
        touch(tmp.path(), "generated/schema.ts", "generated");

        let files = FileScanner::source_files(tmp.path())
            .with_exclude(vec!["generated/**".to_string()])
            .scan()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("src/app.ts"));
    }
}
