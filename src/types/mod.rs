pub mod analysis;
pub mod error;
pub mod protocol;

pub use analysis::{
    AnalysisResult, Architecture, Match, MigrationGuide, MigrationTier, ProtocolDetection,
    Recommendation, Requirement, RoleHint,
};
pub use error::{AnalyzerError, Result};
pub use protocol::{Category, DetectionRule, ProtocolBrief, ProtocolDefinition};
