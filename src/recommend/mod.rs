//! Recommendation Engine
//!
//! Scores every protocol in the knowledge base (detected or not) against the
//! project's detections and an optional stated requirement.
//!
//! Scoring is an ordered, additive rule pipeline: every candidate starts at
//! a neutral baseline and each rule whose predicate holds adds its delta and
//! appends one rationale line. Rules are independent; all applicable rules
//! stack. New rules append to the table without reordering existing ones.
//!
//! Ranking is total and deterministic: descending score, then ascending base
//! complexity, then alphabetical display name.

use tracing::debug;

use crate::constants::{scoring, warnings as warn};
use crate::registry::ProtocolRegistry;
use crate::types::{
    Category, MigrationTier, ProtocolDefinition, ProtocolDetection, Recommendation, Requirement,
};

// =============================================================================
// Rule Table
// =============================================================================

/// Inputs every scoring rule sees. Predicates are pure functions of this.
struct RuleContext<'a> {
    candidate: &'a ProtocolDefinition,
    detections: &'a [ProtocolDetection],
    requirement: Option<Requirement>,
    registry: &'a ProtocolRegistry,
}

impl RuleContext<'_> {
    fn detection_of_candidate(&self) -> Option<&ProtocolDetection> {
        self.detections
            .iter()
            .find(|d| d.protocol == self.candidate.key)
    }

    fn candidate_detected(&self) -> bool {
        self.detection_of_candidate().is_some()
    }

    /// First detected protocol sharing the candidate's category, excluding
    /// the candidate itself.
    fn detected_category_peer(&self) -> Option<&ProtocolDetection> {
        self.detections.iter().find(|d| {
            d.protocol != self.candidate.key
                && self
                    .registry
                    .resolve(&d.protocol)
                    .is_some_and(|def| def.category == self.candidate.category)
        })
    }
}

/// One scoring rule: predicate, score delta, rationale template.
struct ScoringRule {
    applies: fn(&RuleContext) -> bool,
    delta: f64,
    rationale: fn(&RuleContext) -> String,
}

fn requirement_applies(ctx: &RuleContext) -> bool {
    ctx.requirement == Some(ctx.candidate.category)
}

fn requirement_rationale(ctx: &RuleContext) -> String {
    format!("Matches requirement: {}", ctx.candidate.category)
}

fn consistency_applies(ctx: &RuleContext) -> bool {
    ctx.candidate_detected()
}

fn consistency_rationale(ctx: &RuleContext) -> String {
    let count = ctx
        .detection_of_candidate()
        .map(|d| d.total_matches)
        .unwrap_or(0);
    format!("Already in use ({} references found)", count)
}

fn top_complexity_applies(ctx: &RuleContext) -> bool {
    ctx.candidate.base_complexity >= scoring::TOP_COMPLEXITY_TIER
}

fn top_complexity_rationale(ctx: &RuleContext) -> String {
    format!(
        "Higher complexity (base: {}/10)",
        ctx.candidate.base_complexity
    )
}

fn adjacent_applies(ctx: &RuleContext) -> bool {
    !ctx.candidate_detected() && ctx.detected_category_peer().is_some()
}

fn adjacent_rationale(ctx: &RuleContext) -> String {
    let peer = ctx
        .detected_category_peer()
        .map(|d| d.name.clone())
        .unwrap_or_default();
    format!("Same category as existing {}", peer)
}

fn simplicity_applies(ctx: &RuleContext) -> bool {
    ctx.candidate.base_complexity <= scoring::SIMPLICITY_MAX_BASE
}

fn simplicity_rationale(_: &RuleContext) -> String {
    "Simple, low-overhead protocol".to_string()
}

/// The fixed rule pipeline, evaluated in order. New rules append here.
const RULES: &[ScoringRule] = &[
    ScoringRule {
        applies: requirement_applies,
        delta: scoring::REQUIREMENT_BONUS,
        rationale: requirement_rationale,
    },
    ScoringRule {
        applies: consistency_applies,
        delta: scoring::CONSISTENCY_BONUS,
        rationale: consistency_rationale,
    },
    ScoringRule {
        applies: top_complexity_applies,
        delta: -scoring::TOP_COMPLEXITY_PENALTY,
        rationale: top_complexity_rationale,
    },
    ScoringRule {
        applies: adjacent_applies,
        delta: scoring::ADJACENT_CATEGORY_BONUS,
        rationale: adjacent_rationale,
    },
    ScoringRule {
        applies: simplicity_applies,
        delta: scoring::SIMPLICITY_BONUS,
        rationale: simplicity_rationale,
    },
];

// =============================================================================
// Recommendation
// =============================================================================

/// Score and rank every known protocol. Always non-empty for a seeded
/// registry; detections only influence scores, never membership.
pub fn recommend(
    registry: &ProtocolRegistry,
    detections: &[ProtocolDetection],
    requirement: Option<Requirement>,
) -> Vec<Recommendation> {
    let mut scored: Vec<(u8, Recommendation)> = registry
        .all()
        .iter()
        .map(|candidate| {
            let ctx = RuleContext {
                candidate,
                detections,
                requirement,
                registry,
            };

            let mut score = scoring::BASELINE;
            let mut rationale = Vec::new();
            for rule in RULES {
                if (rule.applies)(&ctx) {
                    score += rule.delta;
                    rationale.push((rule.rationale)(&ctx));
                }
            }
            if rationale.is_empty() {
                rationale.push("Standard option".to_string());
            }

            debug!(protocol = %candidate.key, score, "scored candidate");

            let tier = MigrationTier::from_base_complexity(candidate.base_complexity);
            (
                candidate.base_complexity,
                Recommendation {
                    protocol: candidate.name.clone(),
                    score,
                    rationale,
                    pros: candidate.pros.clone(),
                    cons: candidate.cons.clone(),
                    migration_complexity: tier,
                    estimated_time: tier.estimated_time().to_string(),
                },
            )
        })
        .collect();

    scored.sort_by(|(base_a, a), (base_b, b)| {
        b.score
            .total_cmp(&a.score)
            .then(base_a.cmp(base_b))
            .then(a.protocol.cmp(&b.protocol))
    });

    scored.into_iter().map(|(_, rec)| rec).collect()
}

// =============================================================================
// Warnings
// =============================================================================

/// Advisory warnings, generated independently of scoring.
pub fn warnings(registry: &ProtocolRegistry, detections: &[ProtocolDetection]) -> Vec<String> {
    let mut out = Vec::new();

    // Protocols with strict client/server version coupling
    for detection in detections {
        if let Some(def) = registry.resolve(&detection.protocol)
            && let Some(note) = def.compatibility.get("warning")
        {
            out.push(format!("{} detected: {}", def.name, note));
        }
    }

    // Multiple real-time protocols invite consolidation
    let realtime: Vec<&str> = detections
        .iter()
        .filter(|d| {
            registry
                .resolve(&d.protocol)
                .is_some_and(|def| def.category == Category::Realtime)
        })
        .map(|d| d.name.as_str())
        .collect();
    if realtime.len() >= warn::REALTIME_CONSOLIDATION_MIN {
        out.push(format!(
            "Multiple real-time protocols detected: {}. Consider consolidating to reduce complexity.",
            realtime.join(", ")
        ));
    }

    // Overall complexity budget
    let total: f64 = detections.iter().map(|d| d.complexity_score).sum();
    if total > warn::TOTAL_COMPLEXITY_WARN {
        out.push(format!(
            "Total protocol complexity is high ({:.1}). Review if simpler alternatives exist.",
            total
        ));
    }

    out
}

// =============================================================================
// Tests
// =============================================================================
