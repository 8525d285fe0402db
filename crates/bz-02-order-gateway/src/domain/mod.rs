//! Domain layer for the Order Gateway.
//!
//! Pure types and policy. Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod ratings;
pub mod transitions;

pub use entities::*;
pub use errors::{ErrorKind, GatewayError};
pub use ratings::{
    validate_split, OrderRatings, Rating, RATING_MAX, RATING_MIN, REVIEW_MAX_CHARACTERS,
};
pub use transitions::{next_state, rule_for, Operation, Transition, TRANSITIONS};
