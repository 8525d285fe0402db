//! Moderator identities and the role pointer.
//!
//! A pointer record advertises a peer under the moderator pointer key. The
//! peer identity is embedded in one of its addresses as a base58 multihash
//! whose digest bytes are the moderator's peer id string.

use super::errors::AddressError;
use super::multiaddr::Multiaddr;
use multihash::Multihash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Multicodec of sha2-256.
pub const SHA2_256: u8 = 0x12;

/// Multicodec tagging the peer id carried in pointer addresses.
pub const SHA1: u64 = 0x11;

/// Key hashed into the moderator role pointer.
pub const MODERATOR_POINTER_KEY: &[u8] = b"moderators";

/// A peer returned by a pointer lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerRecord {
    pub peer_id: String,
    /// Addresses in textual multiaddr form.
    pub addrs: Vec<String>,
}

impl PeerRecord {
    pub fn new(peer_id: impl Into<String>, addrs: Vec<String>) -> Self {
        Self {
            peer_id: peer_id.into(),
            addrs,
        }
    }
}

/// Decoded moderator identity: the peer id carried in the digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeratorId(String);

impl ModeratorId {
    pub fn from_digest(digest: &[u8]) -> Result<Self, AddressError> {
        std::str::from_utf8(digest)
            .map(|id| Self(id.to_string()))
            .map_err(|e| AddressError::NotUtf8(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ModeratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base58 sha2-256 multihash of `key`.
pub fn pointer_for(key: &[u8]) -> String {
    let digest = Sha256::digest(key);
    let mut bytes = Vec::with_capacity(2 + digest.len());
    bytes.push(SHA2_256);
    bytes.push(digest.len() as u8);
    bytes.extend_from_slice(&digest);
    bs58::encode(bytes).into_string()
}

/// The moderator role pointer.
pub fn moderator_pointer() -> String {
    pointer_for(MODERATOR_POINTER_KEY)
}

/// Decode a base58 multihash value to its identity.
pub fn decode_identity(value: &str) -> Result<ModeratorId, AddressError> {
    let bytes = bs58::decode(value)
        .into_vec()
        .map_err(|e| AddressError::Base58(e.to_string()))?;
    let mh = Multihash::<64>::from_bytes(&bytes)
        .map_err(|e| AddressError::Multihash(e.to_string()))?;
    ModeratorId::from_digest(mh.digest())
}

/// Base58 multihash carrying `peer_id` as its digest, the value a pointer
/// address embeds under `/ipfs`.
pub fn encode_identity(peer_id: &str) -> Result<String, AddressError> {
    let mh = Multihash::<64>::wrap(SHA1, peer_id.as_bytes())
        .map_err(|e| AddressError::Multihash(e.to_string()))?;
    Ok(bs58::encode(mh.to_bytes()).into_string())
}

/// Identity embedded in one textual address.
pub fn identity_in_address(addr: &str) -> Result<ModeratorId, AddressError> {
    let parsed = Multiaddr::parse(addr)?;
    let value = parsed.identity_value().ok_or(AddressError::NoIdentity)?;
    decode_identity(value)
}

/// Scan a record's addresses in order; the first decodable identity wins.
pub fn moderator_from_record(record: &PeerRecord) -> Option<ModeratorId> {
    record.addrs.iter().find_map(|addr| match identity_in_address(addr) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::trace!(peer = %record.peer_id, addr = %addr, error = %e, "Skipping address");
            None
        }
    })
}
