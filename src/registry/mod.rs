//! Protocol Knowledge Base
//!
//! Immutable registry of known communication protocols: metadata, lexical
//! detection rules, and comparison material. Built once at startup via
//! [`ProtocolRegistry::builtin`] and passed by reference into every
//! component; there is no mutable global state.
//!
//! Detection rules are compiled to regexes at registration time and applied
//! case-sensitively to raw file text. Matching is lexical by design: the
//! registry never inspects syntax trees.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use crate::types::error::{AnalyzerError, Result};
use crate::types::protocol::{Category, DetectionRule, ProtocolDefinition};

// =============================================================================
// Compiled Rule
// =============================================================================

/// A detection rule with its regex compiled and ready to run.
#[derive(Debug)]
pub struct CompiledRule {
    pub regex: Regex,
    pub confidence: f64,
}

// =============================================================================
// Registry
// =============================================================================

pub struct ProtocolRegistry {
    defs: Vec<ProtocolDefinition>,
    compiled: HashMap<String, Vec<CompiledRule>>,
}

impl ProtocolRegistry {
    /// Create an empty registry. Use [`ProtocolRegistry::builtin`] for the
    /// seeded knowledge base.
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            compiled: HashMap::new(),
        }
    }

    /// Register a protocol definition, compiling its detection rules.
    ///
    /// Fails with `Config` on an invalid regex, a confidence outside [0, 1],
    /// or a base complexity outside 1-10.
    pub fn register(&mut self, def: ProtocolDefinition) -> Result<()> {
        if !(1..=10).contains(&def.base_complexity) {
            return Err(AnalyzerError::config(format!(
                "protocol {}: base complexity must be 1-10, got {}",
                def.key, def.base_complexity
            )));
        }

        let mut rules = Vec::with_capacity(def.rules.len());
        for rule in &def.rules {
            if !(0.0..=1.0).contains(&rule.confidence) {
                return Err(AnalyzerError::config(format!(
                    "protocol {}: confidence must be in [0, 1], got {}",
                    def.key, rule.confidence
                )));
            }
            let regex = Regex::new(&rule.pattern).map_err(|e| {
                AnalyzerError::config(format!(
                    "protocol {}: invalid pattern '{}': {}",
                    def.key, rule.pattern, e
                ))
            })?;
            rules.push(CompiledRule {
                regex,
                confidence: rule.confidence,
            });
        }

        self.compiled.insert(def.key.clone(), rules);
        self.defs.push(def);
        Ok(())
    }

    /// All definitions in registration order (fixed and stable).
    pub fn all(&self) -> &[ProtocolDefinition] {
        &self.defs
    }

    /// Definitions of one category, in registration order.
    pub fn by_category(&self, category: Category) -> Vec<&ProtocolDefinition> {
        self.defs
            .iter()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Look up a definition by name, or fail with `NotFound`.
    pub fn get(&self, name: &str) -> Result<&ProtocolDefinition> {
        self.resolve(name)
            .ok_or_else(|| AnalyzerError::not_found(name))
    }

    /// Resolve a user-supplied name to a definition.
    ///
    /// Lookup normalizes case, spaces, and `-`/`_`/`.` separators, then
    /// falls back to substring containment against registry keys.
    pub fn resolve(&self, name: &str) -> Option<&ProtocolDefinition> {
        let key = normalize(name);
        if key.is_empty() {
            return None;
        }

        if let Some(def) = self.defs.iter().find(|d| d.key == key) {
            return Some(def);
        }

        let dotted = key.replace('_', ".");
        if let Some(def) = self.defs.iter().find(|d| d.key == dotted) {
            return Some(def);
        }

        self.defs
            .iter()
            .find(|d| d.key.contains(&key) || key.contains(&d.key))
    }

    /// Compiled detection rules for a registered key.
    pub fn rules(&self, key: &str) -> &[CompiledRule] {
        self.compiled.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    // =========================================================================
    // Seed Data
    // =========================================================================

    /// The built-in knowledge base.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for def in builtin_definitions() {
            registry.register(def)?;
        }
        Ok(registry)
    }
}

impl Default for ProtocolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

// =============================================================================
// Built-in Definitions
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn def(
    key: &str,
    name: &str,
    category: Category,
    base_complexity: u8,
    dependencies: &[&str],
    rules: &[(&str, f64)],
    pros: &[&str],
    cons: &[&str],
    use_cases: &[&str],
    compatibility: &[(&str, &str)],
) -> ProtocolDefinition {
    ProtocolDefinition {
        key: key.to_string(),
        name: name.to_string(),
        category,
        base_complexity,
        dependencies: dependencies.iter().map(|s| s.to_string()).collect(),
        rules: rules
            .iter()
            .map(|(p, c)| DetectionRule::new(*p, *c))
            .collect(),
        pros: pros.iter().map(|s| s.to_string()).collect(),
        cons: cons.iter().map(|s| s.to_string()).collect(),
        use_cases: use_cases.iter().map(|s| s.to_string()).collect(),
        compatibility: compatibility
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn builtin_definitions() -> Vec<ProtocolDefinition> {
    vec![
        def(
            "websocket",
            "WebSocket",
            Category::Realtime,
            3,
            &["websockets", "ws", "websocket-client"],
            &[
                (r"new\s+WebSocket\s*\(", 0.95),
                (r"websocket\.connect", 0.9),
                (r"from\s+websockets\s+import", 0.95),
                (r"import\s+websocket", 0.9),
                (r"ws://|wss://", 0.8),
                (r"WebSocketClient", 0.85),
                (r"websocket\.WebSocketApp", 0.95),
                (r"\.onmessage\s*=", 0.7),
                (r"\.onopen\s*=", 0.7),
                (r"socket\.send\(", 0.6),
            ],
            &[
                "Full-duplex communication",
                "Low overhead after handshake",
                "Standardized (RFC 6455)",
                "Wide browser support",
                "Simple API",
            ],
            &[
                "No automatic reconnection",
                "No built-in message acknowledgment",
                "Manual room/namespace management",
            ],
            &["Real-time chat", "Live updates", "Gaming", "Streaming data"],
            &[
                ("browser", "Native support in all modern browsers"),
                ("python", "websockets, websocket-client libraries"),
                ("nodejs", "ws, native WebSocket in browsers"),
            ],
        ),
        def(
            "socket.io",
            "Socket.IO",
            Category::Realtime,
            6,
            &[
                "socket.io",
                "socket.io-client",
                "python-socketio",
                "socketio",
            ],
            &[
                (r"import\s+socketio", 0.95),
                (r"from\s+socketio\s+import", 0.95),
                (r#"require\(['"]socket\.io['"]"#, 0.95),
                (r#"require\(['"]socket\.io-client['"]"#, 0.95),
                (r#"io\s*\(\s*['"]http"#, 0.85),
                (r"\.emit\s*\(", 0.6),
                (r#"\.on\s*\(['"]connect"#, 0.8),
                (r"socketio\.AsyncServer", 0.95),
                (r"socketio\.Server", 0.95),
                (r"@sio\.", 0.9),
            ],
            &[
                "Automatic reconnection",
                "Room/namespace support",
                "Binary support",
                "Fallback to HTTP long-polling",
                "Event-based API",
            ],
            &[
                "Higher overhead than WebSocket",
                "Version compatibility issues (v2/v3/v4)",
                "Requires matching client/server versions",
                "Not standard protocol",
            ],
            &[
                "Complex real-time apps",
                "Chat with rooms",
                "Collaborative editing",
                "Real-time dashboards",
            ],
            &[
                ("browser", "Requires socket.io-client library"),
                ("python", "python-socketio (note version compatibility)"),
                ("nodejs", "socket.io server, socket.io-client for client"),
                (
                    "warning",
                    "v4 client requires v4 server - version mismatch causes connection failures",
                ),
            ],
        ),
        def(
            "http_rest",
            "HTTP/REST",
            Category::RequestResponse,
            2,
            &["requests", "httpx", "aiohttp", "fetch", "axios"],
            &[
                (r"import\s+requests", 0.9),
                (r"from\s+requests\s+import", 0.9),
                (r"import\s+httpx", 0.9),
                (r"fetch\s*\(", 0.7),
                (r"axios\.", 0.85),
                (r"requests\.(get|post|put|delete|patch)", 0.95),
                (r"@app\.(get|post|put|delete|patch)\(", 0.9),
                (r"\.json\(\)", 0.5),
                (r"Content-Type.*application/json", 0.7),
            ],
            &[
                "Universal support",
                "Stateless and cacheable",
                "Simple to debug",
                "Works through proxies/firewalls",
                "Well-understood patterns",
            ],
            &[
                "No server push (without polling)",
                "Higher latency for real-time",
                "Connection overhead per request",
            ],
            &[
                "CRUD APIs",
                "Microservices",
                "Public APIs",
                "Traditional web apps",
            ],
            &[
                ("browser", "Native fetch API"),
                ("python", "requests, httpx, aiohttp"),
                ("nodejs", "fetch, axios"),
            ],
        ),
        def(
            "http_polling",
            "HTTP Long-Polling",
            Category::RequestResponse,
            4,
            &["requests", "httpx", "aiohttp"],
            &[
                (r"setInterval.*fetch", 0.8),
                (r"setTimeout.*request", 0.7),
                (r"poll|polling", 0.6),
                (r"long[-_]?poll", 0.9),
            ],
            &[
                "Works everywhere HTTP works",
                "No WebSocket support needed",
                "Simple server implementation",
            ],
            &[
                "Higher server load",
                "Not truly real-time",
                "Resource intensive for many clients",
            ],
            &[
                "Legacy browser support",
                "Firewall-restricted environments",
                "Simple notification systems",
            ],
            &[
                ("browser", "Works with any HTTP client"),
                ("python", "Standard HTTP libraries"),
                ("nodejs", "Standard HTTP libraries"),
            ],
        ),
        def(
            "grpc",
            "gRPC",
            Category::Rpc,
            7,
            &["grpcio", "grpc", "protobuf", "@grpc/grpc-js"],
            &[
                (r"import\s+grpc", 0.95),
                (r"from\s+grpc\s+import", 0.95),
                (r"grpc\.insecure_channel", 0.95),
                (r"grpc\.secure_channel", 0.95),
                (r"\.proto\b", 0.7),
                (r"protobuf", 0.8),
                (r"@grpc/", 0.95),
                (r"grpc\.ServerCredentials", 0.95),
            ],
            &[
                "High performance (HTTP/2)",
                "Strongly typed with protobuf",
                "Bidirectional streaming",
                "Code generation",
            ],
            &[
                "Browser support limited (grpc-web)",
                "Requires protobuf knowledge",
                "More complex setup",
                "Binary protocol harder to debug",
            ],
            &[
                "Microservices communication",
                "High-performance APIs",
                "Mobile backends",
                "Service mesh",
            ],
            &[
                ("browser", "Requires grpc-web proxy"),
                ("python", "grpcio library"),
                ("nodejs", "@grpc/grpc-js"),
            ],
        ),
        def(
            "graphql",
            "GraphQL",
            Category::RequestResponse,
            5,
            &["graphql", "graphene", "apollo", "strawberry", "@apollo/client"],
            &[
                (r"import.*graphql", 0.9),
                (r"from\s+graphene\s+import", 0.95),
                (r"from\s+strawberry\s+import", 0.95),
                (r"gql`", 0.9),
                (r"useQuery|useMutation", 0.85),
                (r"ApolloClient", 0.95),
                (r"type\s+Query\s*\{", 0.9),
                (r"@strawberry\.", 0.95),
            ],
            &[
                "Flexible queries",
                "No over-fetching",
                "Strong typing",
                "Introspection",
                "Single endpoint",
            ],
            &[
                "Learning curve",
                "Complex caching",
                "N+1 query problem",
                "More server complexity",
            ],
            &[
                "Complex data relationships",
                "Mobile apps (bandwidth optimization)",
                "Evolving APIs",
                "Frontend-driven development",
            ],
            &[
                ("browser", "Apollo Client, urql"),
                ("python", "graphene, strawberry"),
                ("nodejs", "apollo-server"),
            ],
        ),
        def(
            "sse",
            "Server-Sent Events (SSE)",
            Category::Streaming,
            2,
            &["aiohttp", "flask", "fastapi"],
            &[
                (r"new\s+EventSource", 0.95),
                (r"text/event-stream", 0.95),
                (r"EventSource", 0.8),
                (r"Server-Sent Events", 0.9),
            ],
            &[
                "Simple one-way streaming",
                "Built on HTTP",
                "Automatic reconnection",
                "Native browser support",
            ],
            &[
                "One-way only (server to client)",
                "Text-based only",
                "Limited browser connections",
            ],
            &[
                "News feeds",
                "Stock tickers",
                "Progress updates",
                "Notifications",
            ],
            &[
                ("browser", "Native EventSource API"),
                ("python", "Built into web frameworks"),
                ("nodejs", "Built-in or libraries"),
            ],
        ),
        def(
            "mqtt",
            "MQTT",
            Category::Realtime,
            5,
            &["paho-mqtt", "mqtt", "mosquitto"],
            &[
                (r"import\s+paho", 0.95),
                (r"from\s+paho\s+import", 0.95),
                (r"mqtt\.Client", 0.95),
                (r"mqtt://|mqtts://", 0.9),
                (r"\.subscribe\s*\(", 0.5),
                (r"\.publish\s*\(", 0.5),
            ],
            &[
                "Very lightweight",
                "Publish/subscribe pattern",
                "QoS levels",
                "Great for IoT",
            ],
            &["Requires broker", "Not browser-native", "Different paradigm"],
            &[
                "IoT devices",
                "Sensor data",
                "Home automation",
                "Low-bandwidth environments",
            ],
            &[
                ("browser", "Requires MQTT over WebSocket"),
                ("python", "paho-mqtt"),
                ("nodejs", "mqtt.js"),
            ],
        ),
    ]
}

// =============================================================================
// Tests
// =============================================================================
