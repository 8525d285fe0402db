//! # Integration Flows
//!
//! Every test boots the same container the binary uses and drives it
//! through the HTTP router, so handlers, services, adapters and the bus are
//! all in the path.

#[cfg(test)]
mod harness;

#[cfg(test)]
mod discovery_flows;
#[cfg(test)]
mod order_flows;
