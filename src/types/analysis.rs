//! Analysis Result Types
//!
//! Everything an analysis run produces: raw per-file matches, per-protocol
//! aggregates, the architecture classification, scored recommendations, and
//! the top-level [`AnalysisResult`]. All output types serialize to JSON as a
//! lossless projection of their fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

use super::protocol::Category;

// =============================================================================
// Match
// =============================================================================

/// Client/server role hint derived from the text surrounding a match.
///
/// Ambiguous matches carry neither flag; role is never inferred from the
/// protocol's identity alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleHint {
    pub client: bool,
    pub server: bool,
}

/// One occurrence of a detection rule firing in one file.
///
/// Produced by the detector, consumed immediately by aggregation; not part
/// of the persisted result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// File the pattern fired in
    pub file: PathBuf,

    /// Registry key of the matched protocol
    pub protocol: String,

    /// 1-based line number of the hit
    pub line: usize,

    /// Source of the rule that fired
    pub pattern: String,

    /// Confidence copied from the rule, in [0, 1]
    pub confidence: f64,

    /// Surrounding lines, for role classification and debugging
    pub context: String,

    /// Role classification of this match's context
    pub role: RoleHint,
}

// =============================================================================
// Protocol Detection
// =============================================================================

/// Aggregate evidence for one protocol within one scanned project.
///
/// Invariant: `file_count() <= total_matches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolDetection {
    /// Registry key (e.g. `websocket`)
    pub protocol: String,

    /// Display name (e.g. `WebSocket`)
    pub name: String,

    /// Unique files containing at least one match
    pub files: BTreeSet<PathBuf>,

    /// Total number of matches across all files
    pub total_matches: usize,

    /// Complexity score computed from the matches
    pub complexity_score: f64,

    /// Any contributing match looked client-side
    pub is_client: bool,

    /// Any contributing match looked server-side
    pub is_server: bool,
}

impl ProtocolDetection {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

// =============================================================================
// Architecture
// =============================================================================

/// Coarse classification of a project by detected usage roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Architecture {
    Backend,
    Frontend,
    FullStack,
    Unknown,
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Architecture::Backend => write!(f, "backend"),
            Architecture::Frontend => write!(f, "frontend"),
            Architecture::FullStack => write!(f, "full-stack"),
            Architecture::Unknown => write!(f, "unknown"),
        }
    }
}

// =============================================================================
// Migration Tier
// =============================================================================

/// Coarse difficulty/time bucket assigned from a protocol's base complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MigrationTier {
    Low,
    Medium,
    High,
}

impl MigrationTier {
    /// Map a base complexity (1-10) to its tier.
    pub fn from_base_complexity(base: u8) -> Self {
        use crate::constants::tiers;
        if base <= tiers::LOW_MAX_BASE {
            MigrationTier::Low
        } else if base <= tiers::MEDIUM_MAX_BASE {
            MigrationTier::Medium
        } else {
            MigrationTier::High
        }
    }

    /// Shift one tier up (migration overhead). HIGH saturates.
    pub fn promote(self) -> Self {
        match self {
            MigrationTier::Low => MigrationTier::Medium,
            MigrationTier::Medium | MigrationTier::High => MigrationTier::High,
        }
    }

    /// Fixed time estimate for this tier.
    pub fn estimated_time(self) -> &'static str {
        use crate::constants::tiers;
        match self {
            MigrationTier::Low => tiers::LOW_TIME,
            MigrationTier::Medium => tiers::MEDIUM_TIME,
            MigrationTier::High => tiers::HIGH_TIME,
        }
    }
}

impl std::fmt::Display for MigrationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MigrationTier::Low => write!(f, "LOW"),
            MigrationTier::Medium => write!(f, "MEDIUM"),
            MigrationTier::High => write!(f, "HIGH"),
        }
    }
}

// =============================================================================
// Recommendation
// =============================================================================

/// One scored candidate protocol.
///
/// Scores are unclamped here; renderers clamp to 0-100 for display.
/// The rationale list names every scoring rule that fired and is never empty
/// when the score differs from the neutral baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Display name of the candidate
    pub protocol: String,

    pub score: f64,
    pub rationale: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub migration_complexity: MigrationTier,
    pub estimated_time: String,
}

// =============================================================================
// Migration Guide
// =============================================================================

/// Fixed checklist for switching from one protocol to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationGuide {
    pub from: String,
    pub to: String,
    pub difficulty: MigrationTier,
    pub estimated_time: String,
    pub steps: Vec<String>,
}

// =============================================================================
// Analysis Result
// =============================================================================

/// Complete output of one `analyze` call. Immutable after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub project_path: PathBuf,
    pub timestamp: DateTime<Utc>,

    /// Per-protocol aggregates, in detection order
    pub detected_protocols: Vec<ProtocolDetection>,

    pub architecture: Architecture,

    /// Sum of all detections' complexity scores
    pub complexity_total: f64,

    /// Every known protocol, descending by score (ties: ascending base
    /// complexity, then alphabetical name)
    pub recommendations: Vec<Recommendation>,

    pub summary: String,
    pub warnings: Vec<String>,
}

/// Requirement passed to `analyze`: what kind of communication the caller
/// needs. Maps onto a [`Category`] via a fixed lookup.
pub type Requirement = Category;

// =============================================================================
// Tests
// =============================================================================
