//! Architecture Classification
//!
//! Derives a coarse project classification from the client/server flags on
//! the detected protocols. Pure function; no detection carrying a role flag
//! means the architecture is unknown, not guessed.

use crate::types::{Architecture, ProtocolDetection};

/// Classify a project by its detected usage roles.
pub fn classify(detections: &[ProtocolDetection]) -> Architecture {
    let has_client = detections.iter().any(|d| d.is_client);
    let has_server = detections.iter().any(|d| d.is_server);

    match (has_client, has_server) {
        (true, true) => Architecture::FullStack,
        (false, true) => Architecture::Backend,
        (true, false) => Architecture::Frontend,
        (false, false) => Architecture::Unknown,
    }
}

// =============================================================================
// Tests
// =============================================================================
