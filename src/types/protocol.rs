//! Protocol Knowledge Base Types
//!
//! Immutable metadata describing a communication protocol: category, base
//! complexity, lexical detection rules, and comparison material (pros, cons,
//! use cases, per-platform compatibility notes). Definitions are seeded once
//! at registry construction and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Category
// =============================================================================

/// Communication style a protocol belongs to.
///
/// Also doubles as the `--requirement` value for `analyze`: requirement
/// strings map onto categories via [`Category::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Bidirectional, low-latency message exchange (WebSocket, Socket.IO, MQTT)
    Realtime,
    /// Classic request/response exchange (HTTP/REST, GraphQL, long-polling)
    RequestResponse,
    /// One-way server-to-client streams (SSE)
    Streaming,
    /// Remote procedure calls (gRPC)
    Rpc,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Realtime => write!(f, "realtime"),
            Category::RequestResponse => write!(f, "request-response"),
            Category::Streaming => write!(f, "streaming"),
            Category::Rpc => write!(f, "rpc"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "realtime" => Ok(Category::Realtime),
            "request-response" => Ok(Category::RequestResponse),
            "streaming" => Ok(Category::Streaming),
            "rpc" => Ok(Category::Rpc),
            _ => Err(format!(
                "Unknown category: {}. Valid values: realtime, request-response, streaming, rpc",
                s
            )),
        }
    }
}

// =============================================================================
// Detection Rule
// =============================================================================

/// One lexical detection rule: a regular expression tested case-sensitively
/// against raw file text, and the confidence assigned to each hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRule {
    /// Regular expression source
    pub pattern: String,

    /// How strongly a hit indicates true usage, in [0, 1]
    pub confidence: f64,
}

impl DetectionRule {
    pub fn new(pattern: impl Into<String>, confidence: f64) -> Self {
        Self {
            pattern: pattern.into(),
            confidence,
        }
    }
}

// =============================================================================
// Protocol Definition
// =============================================================================

/// Everything the knowledge base knows about one protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolDefinition {
    /// Registry key (e.g. `socket.io`, `http_rest`)
    pub key: String,

    /// Human-readable display name (e.g. `Socket.IO`, `HTTP/REST`)
    pub name: String,

    /// Communication category
    pub category: Category,

    /// Base complexity score, 1-10
    pub base_complexity: u8,

    /// Package names typically pulled in by this protocol
    pub dependencies: Vec<String>,

    /// Ordered detection rules applied during a scan
    pub rules: Vec<DetectionRule>,

    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub use_cases: Vec<String>,

    /// Per-platform compatibility notes. A `warning` entry marks protocols
    /// with strict client/server version coupling.
    pub compatibility: BTreeMap<String, String>,
}

impl ProtocolDefinition {
    /// Whether this protocol is known for strict client/server version
    /// coupling (drives the version-compatibility warning).
    pub fn has_version_warning(&self) -> bool {
        self.compatibility.contains_key("warning")
    }
}

// =============================================================================
// Protocol Brief (compare output)
// =============================================================================

/// Side-by-side comparison entry for one protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolBrief {
    pub category: Category,
    pub complexity: u8,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub use_cases: Vec<String>,
    pub compatibility: BTreeMap<String, String>,
}

impl From<&ProtocolDefinition> for ProtocolBrief {
    fn from(def: &ProtocolDefinition) -> Self {
        Self {
            category: def.category,
            complexity: def.base_complexity,
            pros: def.pros.clone(),
            cons: def.cons.clone(),
            use_cases: def.use_cases.clone(),
            compatibility: def.compatibility.clone(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
