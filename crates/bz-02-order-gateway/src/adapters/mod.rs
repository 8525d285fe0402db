//! Adapters layer - concrete implementations of the driven ports.

pub mod ledger;
pub mod memory;

pub use ledger::{LedgerEntry, LedgerExecutor};
pub use memory::{InMemoryCaseStore, InMemoryOrderStore};
