//! Domain layer for moderator discovery.

pub mod config;
pub mod errors;
pub mod identity;
pub mod moderator;
pub mod multiaddr;

pub use config::{DiscoveryConfig, DEFAULT_MAX_RESULTS};
pub use errors::{AddressError, DiscoveryError};
pub use identity::{
    decode_identity, encode_identity, identity_in_address, moderator_from_record, moderator_pointer, pointer_for,
    ModeratorId, PeerRecord,
};
pub use moderator::{FeeType, FixedFee, ModeratorFee, ModeratorInfo, Profile};
pub use multiaddr::{Component, Multiaddr, Protocol};
