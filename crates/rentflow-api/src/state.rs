//! Application state shared across all handlers.

use std::sync::Arc;

use rentflow_core::config::AppConfig;
use rentflow_core::traits::RecordStore;
use rentflow_integrations::VendorClients;
use rentflow_plugin::PluginManager;
use rentflow_service::{BookingService, LeadService};

/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Plugin registry and hook dispatcher
    pub plugins: Arc<PluginManager>,
    pub bookings: Arc<BookingService>,
    pub leads: Arc<LeadService>,
}

impl AppState {
    /// Wires the ingestion services around the shared store, plugin
    /// manager and vendor clients.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
        plugins: Arc<PluginManager>,
        vendors: VendorClients,
    ) -> Self {
        let bookings = Arc::new(BookingService::new(
            Arc::clone(&store),
            Arc::clone(&plugins),
            vendors.clone(),
        ));
        let leads = Arc::new(LeadService::new(
            Arc::clone(&store),
            Arc::clone(&plugins),
            vendors,
        ));

        Self {
            config: Arc::new(config),
            plugins,
            bookings,
            leads,
        }
    }
}
