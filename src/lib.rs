//! protoscout - Communication Protocol Analyzer
//!
//! Scans a source tree for evidence of communication-protocol usage
//! (WebSocket, Socket.IO, HTTP/REST, gRPC, GraphQL, SSE, MQTT, long-polling),
//! scores the complexity of what it finds, and produces ranked
//! recommendations for which protocol a project should use.
//!
//! Detection is lexical: patterns run against raw file text, never against
//! parsed syntax. All conclusions are heuristic estimates, not guarantees.
//!
//! ## Quick Start
//!
//! ```ignore
//! use protoscout::ProtocolAnalyzer;
//!
//! let analyzer = ProtocolAnalyzer::new()?;
//! let result = analyzer.analyze(Path::new("./my-project"), None)?;
//! println!("{}", result.summary);
//! ```
//!
//! ## Modules
//!
//! - [`registry`]: immutable protocol knowledge base with detection rules
//! - [`detector`]: directory walk and lexical pattern matching
//! - [`scoring`]: complexity formula and architecture classification
//! - [`recommend`]: additive scoring rules, ranking, warnings
//! - [`engine`]: orchestration entry points (analyze, compare, migrate, list)
//! - [`report`]: text/Markdown/JSON projections of results
//! - [`config`]: layered configuration (defaults, TOML files, env)

pub mod cli;
pub mod config;
pub mod constants;
pub mod detector;
pub mod engine;
pub mod recommend;
pub mod registry;
pub mod report;
pub mod scoring;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ReportConfig, ScanConfig};

// Error Types
pub use types::error::{AnalyzerError, Result};

// Orchestration
pub use engine::ProtocolAnalyzer;

// Knowledge Base
pub use registry::ProtocolRegistry;

// =============================================================================
// Result Type Re-exports
// =============================================================================

pub use report::ReportFormat;
pub use types::{
    AnalysisResult, Architecture, Category, Match, MigrationGuide, MigrationTier, ProtocolBrief,
    ProtocolDefinition, ProtocolDetection, Recommendation, Requirement,
};

// =============================================================================
// Detector Re-exports
// =============================================================================

pub use detector::{Detector, scanner::FileScanner};
