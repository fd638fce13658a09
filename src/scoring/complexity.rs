//! Complexity Scoring
//!
//! Turns one protocol's match evidence into a single complexity score:
//!
//! ```text
//! score = base_complexity * scale_factor * confidence_factor * spread_factor
//! ```
//!
//! - `scale_factor` grows with total matches, clamped to [1.0, 2.0]
//! - `confidence_factor` is the mean match confidence, clamped to [0.5, 1.0]
//! - `spread_factor` grows with distinct matched files, clamped to [1.0, 1.5]
//!
//! Zero matches score 0 regardless of base complexity. Pure function of its
//! inputs; scores are never negative.

use std::collections::BTreeSet;

use crate::constants::complexity::{
    CONFIDENCE_FLOOR, SCALE_MAX_BONUS, SCALE_SATURATION_MATCHES, SPREAD_MAX_BONUS,
    SPREAD_SATURATION_FILES,
};
use crate::types::{Match, ProtocolDefinition};

/// Score one protocol's usage complexity from its matches.
pub fn score(def: &ProtocolDefinition, matches: &[Match]) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }

    let total = matches.len() as f64;

    let scale = 1.0 + (total / SCALE_SATURATION_MATCHES).min(SCALE_MAX_BONUS);

    let mean_confidence = matches.iter().map(|m| m.confidence).sum::<f64>() / total;
    let confidence = (CONFIDENCE_FLOOR + mean_confidence * CONFIDENCE_FLOOR)
        .clamp(CONFIDENCE_FLOOR, 1.0);

    let file_count = matches.iter().map(|m| &m.file).collect::<BTreeSet<_>>().len() as f64;
    let spread = 1.0 + (file_count / SPREAD_SATURATION_FILES).min(SPREAD_MAX_BONUS);

    f64::from(def.base_complexity) * scale * confidence * spread
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ProtocolRegistry;
    use crate::types::RoleHint;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn synthetic_match(file: &str, confidence: f64) -> Match {
        Match {
            file: PathBuf::from(file),
            protocol: "websocket".to_string(),
            line: 1,
            pattern: "test".to_string(),
            confidence,
            context: String::new(),
            role: RoleHint::default(),
        }
    }

    fn websocket_def() -> ProtocolDefinition {
        ProtocolRegistry::builtin()
            .unwrap()
            .get("websocket")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_zero_matches_scores_zero() {
        assert_eq!(score(&websocket_def(), &[]), 0.0);
    }

    #[test]
    fn test_two_file_scenario_within_bounds() {
        let def = websocket_def();
        let matches = vec![
            synthetic_match("a.js", 0.95),
            synthetic_match("b.js", 0.95),
        ];
        let s = score(&def, &matches);
        assert!(s > 0.0);
        // Upper bound: base * max scale * max confidence * max spread
        assert!(s <= f64::from(def.base_complexity) * 2.0 * 1.0 * 1.5);
    }

    #[test]
    fn test_low_confidence_discounted_not_zeroed() {
        let def = websocket_def();
        let low = score(&def, &[synthetic_match("a.js", 0.0)]);
        let high = score(&def, &[synthetic_match("a.js", 1.0)]);
        assert!(low > 0.0);
        assert!(low < high);
        // Floor: confidence factor never drops below 0.5
        assert!(low >= f64::from(def.base_complexity) * 0.5);
    }

    #[test]
    fn test_spread_saturates() {
        let def = websocket_def();
        let wide: Vec<Match> = (0..100)
            .map(|i| synthetic_match(&format!("f{i}.js"), 0.9))
            .collect();
        let s = score(&def, &wide);
        // 100 files is past the spread saturation point of 20
        assert!(s <= f64::from(def.base_complexity) * 2.0 * 1.0 * 1.5);
    }

    #[test]
    fn test_deterministic() {
        let def = websocket_def();
        let matches = vec![synthetic_match("a.js", 0.8), synthetic_match("b.js", 0.6)];
        assert_eq!(score(&def, &matches), score(&def, &matches));
    }

    proptest! {
        #[test]
        fn prop_score_never_negative_and_bounded(
            confidences in prop::collection::vec(0.0f64..=1.0, 0..50),
            file_spread in 1usize..10,
        ) {
            let def = websocket_def();
            let matches: Vec<Match> = confidences
                .iter()
                .enumerate()
                .map(|(i, c)| synthetic_match(&format!("f{}.js", i % file_spread), *c))
                .collect();
            let s = score(&def, &matches);
            prop_assert!(s >= 0.0);
            prop_assert!(s <= f64::from(def.base_complexity) * 2.0 * 1.0 * 1.5);
        }
    }
}
