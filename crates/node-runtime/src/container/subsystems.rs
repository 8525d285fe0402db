//! # Subsystem Container
//!
//! Builds every subsystem once and hands out shared handles.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: event bus, bandwidth counter
//! Level 1: order gateway, moderator discovery (publish on the bus)
//! Level 2: API gateway state (dispatches to level 1, streams the bus)
//! ```
//!
//! The collaborators behind the subsystems' driven ports are in-process:
//! in-memory order, case and profile stores, the ledger executor, a static
//! pointer lookup and a logging republisher.

use std::sync::Arc;

use tracing::{info, instrument};

use bazaar_telemetry::BazaarMetrics;
use bz_01_metered_stream::BandwidthCounter;
use bz_02_order_gateway::{
    InMemoryCaseStore, InMemoryOrderStore, LedgerExecutor, OrderGatewayService,
};
use bz_03_moderator_discovery::{
    InMemoryProfileStore, LoggingRepublisher, ModeratorDiscoveryService, StaticPointerLookup,
};
use bz_04_api_gateway::AppState;
use shared_bus::InMemoryEventBus;

use crate::adapters::PrometheusBandwidthReporter;
use crate::container::config::NodeConfig;

/// Central container holding all subsystem instances.
pub struct NodeContainer {
    pub config: NodeConfig,

    // =========================================================================
    // SHARED INFRASTRUCTURE
    // =========================================================================
    pub event_bus: Arc<InMemoryEventBus>,
    pub bandwidth: Arc<BandwidthCounter>,
    pub bandwidth_reporter: Arc<PrometheusBandwidthReporter>,

    // =========================================================================
    // ORDER GATEWAY (Subsystem 2)
    // =========================================================================
    pub purchases: Arc<InMemoryOrderStore>,
    pub sales: Arc<InMemoryOrderStore>,
    pub cases: Arc<InMemoryCaseStore>,
    pub ledger: Arc<LedgerExecutor>,
    pub order_gateway: Arc<OrderGatewayService>,

    // =========================================================================
    // MODERATOR DISCOVERY (Subsystem 3)
    // =========================================================================
    pub pointer_lookup: Arc<StaticPointerLookup>,
    pub profiles: Arc<InMemoryProfileStore>,
    pub moderator_discovery: Arc<ModeratorDiscoveryService>,
}

impl NodeContainer {
    #[instrument(skip_all)]
    pub fn new(config: NodeConfig, metrics: BazaarMetrics) -> Self {
        let event_bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
        let bandwidth = Arc::new(BandwidthCounter::new());
        let bandwidth_reporter = Arc::new(PrometheusBandwidthReporter::new(
            Arc::clone(&bandwidth),
            metrics,
        ));
        info!(capacity = event_bus.capacity(), "Event bus ready");

        let purchases = Arc::new(InMemoryOrderStore::new());
        let sales = Arc::new(InMemoryOrderStore::new());
        let cases = Arc::new(InMemoryCaseStore::new());
        let ledger = Arc::new(LedgerExecutor::new());
        let order_gateway = Arc::new(OrderGatewayService::new(
            purchases.clone(),
            sales.clone(),
            cases.clone(),
            ledger.clone(),
            event_bus.clone(),
        ));
        info!("[bz-02] Order gateway initialized");

        let pointer_lookup = Arc::new(StaticPointerLookup::new());
        let profiles = Arc::new(InMemoryProfileStore::new());
        let moderator_discovery = Arc::new(ModeratorDiscoveryService::new(
            pointer_lookup.clone(),
            profiles.clone(),
            Arc::new(LoggingRepublisher::new()),
            event_bus.clone(),
            config.discovery.clone(),
        ));
        info!(
            pointer = %config.discovery.pointer,
            max_results = config.discovery.max_results,
            "[bz-03] Moderator discovery initialized"
        );

        Self {
            config,
            event_bus,
            bandwidth,
            bandwidth_reporter,
            purchases,
            sales,
            cases,
            ledger,
            order_gateway,
            pointer_lookup,
            profiles,
            moderator_discovery,
        }
    }

    /// Handler state for the API gateway.
    pub fn api_state(&self) -> AppState {
        AppState::new(
            self.order_gateway.clone(),
            self.moderator_discovery.clone(),
            Arc::clone(&self.event_bus),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_shares_one_bus() {
        let container = NodeContainer::new(NodeConfig::default(), BazaarMetrics::new().unwrap());
        let state = container.api_state();
        assert!(Arc::ptr_eq(&state.bus, &container.event_bus));
        assert_eq!(container.event_bus.capacity(), NodeConfig::default().bus_capacity);
    }
}
