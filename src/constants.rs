//! Global Constants
//!
//! Centralized constants for scoring and thresholds. The numeric values are
//! empirical calibrations carried from field use; keeping them named here
//! lets them be recalibrated without touching logic.

/// File scanning constants
pub mod scan {
    /// Maximum file size to scan (1MB)
    pub const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Lines of context captured either side of a match
    pub const CONTEXT_LINES: usize = 2;
}

/// Complexity formula constants
pub mod complexity {
    /// Match count at which the scale factor saturates
    pub const SCALE_SATURATION_MATCHES: f64 = 500.0;

    /// Maximum bonus the scale factor can add (factor range [1.0, 2.0])
    pub const SCALE_MAX_BONUS: f64 = 1.0;

    /// File count at which the spread factor saturates
    pub const SPREAD_SATURATION_FILES: f64 = 20.0;

    /// Maximum bonus the spread factor can add (factor range [1.0, 1.5])
    pub const SPREAD_MAX_BONUS: f64 = 0.5;

    /// Floor of the confidence factor: low-confidence detections are
    /// discounted but never zeroed
    pub const CONFIDENCE_FLOOR: f64 = 0.5;
}

/// Recommendation scoring constants
pub mod scoring {
    /// Neutral starting score for every candidate
    pub const BASELINE: f64 = 50.0;

    /// Bonus when the candidate's category matches the stated requirement
    pub const REQUIREMENT_BONUS: f64 = 20.0;

    /// Bonus when the candidate is already in use (consistency)
    pub const CONSISTENCY_BONUS: f64 = 25.0;

    /// Penalty for candidates in the top complexity tier
    pub const TOP_COMPLEXITY_PENALTY: f64 = 27.0;

    /// Base complexity at or above which the top-tier penalty applies
    pub const TOP_COMPLEXITY_TIER: u8 = 6;

    /// Bonus for sharing a category with an already-detected protocol
    /// while not itself being detected
    pub const ADJACENT_CATEGORY_BONUS: f64 = 10.0;

    /// Bonus for simple, low-overhead protocols
    pub const SIMPLICITY_BONUS: f64 = 10.0;

    /// Base complexity at or below which the simplicity bonus applies
    pub const SIMPLICITY_MAX_BASE: u8 = 3;
}

/// Migration tier cutoffs and time estimates
pub mod tiers {
    /// Base complexity at or below which migration is LOW
    pub const LOW_MAX_BASE: u8 = 3;

    /// Base complexity at or below which migration is MEDIUM
    pub const MEDIUM_MAX_BASE: u8 = 6;

    pub const LOW_TIME: &str = "<1 hour";
    pub const MEDIUM_TIME: &str = "2-4 hours";
    pub const HIGH_TIME: &str = "1-5 days";
}

/// Warning thresholds
pub mod warnings {
    /// Summed complexity across all detections above which the
    /// high-complexity warning fires
    pub const TOTAL_COMPLEXITY_WARN: f64 = 50.0;

    /// Number of same-category realtime detections at which the
    /// consolidation warning fires
    pub const REALTIME_CONSOLIDATION_MIN: usize = 2;
}
