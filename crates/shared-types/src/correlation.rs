//! Correlation ID for asynchronous searches.
//!
//! 16 random bytes, rendered base58 on the wire.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Opaque token binding an asynchronous search's acknowledgment to the
/// results streamed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(Uuid);

/// Returned when a string is not a base58-encoded 16 byte id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid correlation id: {0}")]
pub struct InvalidCorrelationId(String);

impl CorrelationId {
    /// Generate a new random correlation ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the base58 wire form.
    pub fn parse(s: &str) -> Result<Self, InvalidCorrelationId> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| InvalidCorrelationId(e.to_string()))?;
        let raw: [u8; 16] = bytes
            .try_into()
            .map_err(|_| InvalidCorrelationId(format!("expected 16 bytes in {s}")))?;
        Ok(Self(Uuid::from_bytes(raw)))
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0.as_bytes()).into_string())
    }
}

impl Serialize for CorrelationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CorrelationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CorrelationId::parse(&s).map_err(serde::de::Error::custom)
    }
}
