//! Client/Server Role Classification
//!
//! Decides, per match, whether the surrounding text looks like a connecting
//! or requesting idiom (client) versus a listening or serving idiom (server).
//! Both sets run independently: a context can look like both, either, or
//! neither. Ambiguous contexts get neither flag.

use regex::RegexSet;

use crate::types::error::{AnalyzerError, Result};
use crate::types::RoleHint;

/// Idioms that open a connection or issue a request.
const CLIENT_IDIOMS: &[&str] = &[
    r"connect\s*\(",
    r"\.send\s*\(",
    r"\.emit\s*\(",
    r"fetch\s*\(",
    r"axios\.",
    r"new\s+WebSocket",
    r"io\s*\(",
    r"EventSource",
];

/// Idioms that bind a port, register a route, or accept connections.
const SERVER_IDIOMS: &[&str] = &[
    r"listen\s*\(",
    r"serve\s*\(",
    r"app\.(get|post|put|delete)",
    r"@app\.",
    r"AsyncServer",
    r"Server\(",
    r"createServer",
    r"bind\s*\(",
];

pub struct RoleClassifier {
    client: RegexSet,
    server: RegexSet,
}

impl RoleClassifier {
    pub fn new() -> Result<Self> {
        let client = RegexSet::new(CLIENT_IDIOMS)
            .map_err(|e| AnalyzerError::config(format!("invalid client idiom set: {}", e)))?;
        let server = RegexSet::new(SERVER_IDIOMS)
            .map_err(|e| AnalyzerError::config(format!("invalid server idiom set: {}", e)))?;
        Ok(Self { client, server })
    }

    /// Classify a match's surrounding text.
    pub fn classify(&self, context: &str) -> RoleHint {
        RoleHint {
            client: self.client.is_match(context),
            server: self.server.is_match(context),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_idiom_sets_client_only() {
        let classifier = RoleClassifier::new().unwrap();
        let hint = classifier.classify("const ws = new WebSocket(url);");
        assert!(hint.client);
        assert!(!hint.server);
    }

    #[test]
    fn test_server_idiom_sets_server_only() {
        let classifier = RoleClassifier::new().unwrap();
        let hint = classifier.classify("server.listen(8080);");
        assert!(hint.server);
        assert!(!hint.client);
    }

    #[test]
    fn test_mixed_context_sets_both() {
        let classifier = RoleClassifier::new().unwrap();
        let hint = classifier.classify("app.get('/ws', handler); socket.send(data);");
        assert!(hint.client);
        assert!(hint.server);
    }

    #[test]
    fn test_ambiguous_context_sets_neither() {
        let classifier = RoleClassifier::new().unwrap();
        let hint = classifier.classify("import websocket");
        assert_eq!(hint, RoleHint::default());
    }
}
