//! Core traits defined in `rentflow-core` and implemented by other crates.

pub mod store;

pub use store::{Record, RecordStore, insert_typed};
