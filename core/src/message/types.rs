// Message tags — the closed set of paths the two devices speak

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path used by the wrist device to publish the current heart rate.
pub const HEART_RATE_PATH: &str = "/heart_rate";

/// Path used by the handheld to warn the wrist that the rate is too high.
pub const WARNING_PATH: &str = "/heart_rate_warning";

/// Semantic kind of a message, identified on the wire by its path.
///
/// The set is closed: anything arriving under an unlisted path is logged
/// and dropped by the receiving relay, never dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageTag {
    /// A sampled heart-rate value (decimal-ASCII payload)
    HeartRate,
    /// Threshold-crossing alert (empty payload)
    Warning,
}

impl MessageTag {
    /// Wire path for this tag
    pub fn as_path(&self) -> &'static str {
        match self {
            MessageTag::HeartRate => HEART_RATE_PATH,
            MessageTag::Warning => WARNING_PATH,
        }
    }

    /// Resolve a wire path back to a tag. Unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            HEART_RATE_PATH => Some(MessageTag::HeartRate),
            WARNING_PATH => Some(MessageTag::Warning),
            _ => None,
        }
    }
}

impl fmt::Display for MessageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

/// A tagged payload as delivered by the transport, with the source node id.
///
/// Exists only for the duration of a receive operation; nothing caches it.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Node id of the sending peer
    pub source: String,
    /// Raw wire path (resolved to a `MessageTag` by the relay)
    pub path: String,
    /// Raw payload bytes, empty allowed
    pub payload: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_paths() {
        assert_eq!(MessageTag::HeartRate.as_path(), "/heart_rate");
        assert_eq!(MessageTag::Warning.as_path(), "/heart_rate_warning");
    }

    #[test]
    fn test_tag_from_path() {
        assert_eq!(
            MessageTag::from_path("/heart_rate"),
            Some(MessageTag::HeartRate)
        );
        assert_eq!(
            MessageTag::from_path("/heart_rate_warning"),
            Some(MessageTag::Warning)
        );
        assert_eq!(MessageTag::from_path("/unknown"), None);
        assert_eq!(MessageTag::from_path(""), None);
    }

    #[test]
    fn test_tag_roundtrip() {
        for tag in [MessageTag::HeartRate, MessageTag::Warning] {
            assert_eq!(MessageTag::from_path(tag.as_path()), Some(tag));
        }
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(MessageTag::HeartRate.to_string(), "/heart_rate");
        assert_eq!(MessageTag::Warning.to_string(), "/heart_rate_warning");
    }

    #[test]
    fn test_inbound_message_fields() {
        let msg = InboundMessage {
            source: "node-a".to_string(),
            path: "/heart_rate".to_string(),
            payload: b"97".to_vec(),
        };
        assert_eq!(msg.source, "node-a");
        assert_eq!(MessageTag::from_path(&msg.path), Some(MessageTag::HeartRate));
        assert_eq!(msg.payload, b"97");
    }
}
