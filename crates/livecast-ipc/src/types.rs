//! Common types shared by the engine and its host.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Preview width reported to the platform when creating a broadcast.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 720;

/// Preview height reported to the platform when creating a broadcast.
pub const DEFAULT_PREVIEW_HEIGHT: u32 = 1184;

/// Port every ingest URI is addressed to.
pub const DEFAULT_INGEST_PORT: u16 = 80;

/// Configuration for the broadcast lifecycle.
///
/// The defaults are the values the platform expects; they only need
/// overriding when talking to a test double of the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Preview width in pixels (default: 720).
    pub preview_width: u32,

    /// Preview height in pixels (default: 1184).
    pub preview_height: u32,

    /// Message attached to the broadcast (default: empty).
    pub broadcast_message: String,

    /// Port forced onto the ingest URI (default: 80).
    pub ingest_port: u16,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            preview_width: DEFAULT_PREVIEW_WIDTH,
            preview_height: DEFAULT_PREVIEW_HEIGHT,
            broadcast_message: String::new(),
            ingest_port: DEFAULT_INGEST_PORT,
        }
    }
}

/// Opaque identifier the platform assigns to a created broadcast.
///
/// The platform sends it either as a JSON string or as a JSON integer.
/// Both forms deserialize to the same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BroadcastId(String);

impl BroadcastId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as it appears in endpoint paths.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the platform handed back an empty id.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the id can be placed in an endpoint path as a single
    /// segment: non-empty, ASCII letters, digits, `_` and `-` only.
    pub fn is_path_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    }
}

impl fmt::Display for BroadcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BroadcastId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BroadcastId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for BroadcastId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BroadcastIdVisitor;

        impl Visitor<'_> for BroadcastIdVisitor {
            type Value = BroadcastId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a broadcast id as a string or an integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(BroadcastId::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(BroadcastId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(BroadcastId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(BroadcastId(v.to_string()))
            }
        }

        deserializer.deserialize_any(BroadcastIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_id_accepts_string_and_integer() {
        let from_str: BroadcastId = serde_json::from_str("\"17854360229135492\"").unwrap();
        let from_int: BroadcastId = serde_json::from_str("17854360229135492").unwrap();

        assert_eq!(from_str, from_int);
        assert_eq!(from_int.as_str(), "17854360229135492");
    }

    #[test]
    fn test_broadcast_id_rejects_other_json() {
        assert!(serde_json::from_str::<BroadcastId>("true").is_err());
        assert!(serde_json::from_str::<BroadcastId>("null").is_err());
    }

    #[test]
    fn test_broadcast_id_path_safety() {
        assert!(BroadcastId::from("17854360229135492").is_path_safe());
        assert!(BroadcastId::from("17854360229135492_abc-1").is_path_safe());

        for id in ["", "..", "42/start", "42?x=1", "42#x", "4 2", "%2e%2e", "é"] {
            assert!(!BroadcastId::from(id).is_path_safe(), "{id:?}");
        }
    }

    #[test]
    fn test_config_defaults_match_platform_contract() {
        let config = LifecycleConfig::default();

        assert_eq!(config.preview_width, 720);
        assert_eq!(config.preview_height, 1184);
        assert_eq!(config.broadcast_message, "");
        assert_eq!(config.ingest_port, 80);
    }

    #[test]
    fn test_config_missing_fields_fall_back_to_defaults() {
        let config: LifecycleConfig = serde_json::from_str(r#"{"ingest_port": 1935}"#).unwrap();

        assert_eq!(config.ingest_port, 1935);
        assert_eq!(config.preview_width, DEFAULT_PREVIEW_WIDTH);
        assert_eq!(config.preview_height, DEFAULT_PREVIEW_HEIGHT);
    }
}
