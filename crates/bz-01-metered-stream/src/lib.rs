//! # Metered Stream Subsystem
//!
//! **Subsystem ID:** 1
//!
//! Wraps raw bidirectional peer streams so that every read and write is
//! reported, with its remote peer and protocol, to a [`BandwidthReporter`].
//! The decorator adds no buffering and no latency; it only observes byte
//! counts after the inner stream has done its work.
//!
//! ## Architecture
//!
//! - **Domain Layer:** [`BandwidthCounter`] running totals
//! - **Ports Layer:** [`BandwidthReporter`], [`PeerStream`]
//! - **Stream Layer:** [`MeteredStream`] for both `std::io` and tokio I/O
//!
//! ## Example
//!
//! ```rust
//! use bz_01_metered_stream::{BandwidthCounter, MeteredStream};
//! use shared_types::{PeerId, ProtocolId};
//! use std::io::Read;
//! use std::sync::Arc;
//!
//! let counter = Arc::new(BandwidthCounter::new());
//! let mut stream = MeteredStream::new(
//!     std::io::Cursor::new(vec![0u8; 16]),
//!     ProtocolId::new("/bazaar/app/1.0.0"),
//!     PeerId::new("QmPeer"),
//!     counter.clone(),
//! );
//!
//! let mut buf = Vec::new();
//! stream.read_to_end(&mut buf).unwrap();
//! assert_eq!(counter.totals().total_in, 16);
//! ```

pub mod domain;
pub mod ports;
pub mod stream;

pub use domain::{BandwidthCounter, BandwidthStats};
pub use ports::{BandwidthReporter, PeerStream};
pub use stream::{wrap_stream, MeteredStream};
