//! End-to-end tests driving the HTTP router in-process.

mod helpers;
mod ingestion_test;
mod plugin_test;
mod routing_test;
