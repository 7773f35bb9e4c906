//! # rentflow-core
//!
//! Core crate for RentFlow. Contains configuration schemas, the booking
//! and lead record types, the record store trait, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other RentFlow crates.

pub mod config;
pub mod error;
pub mod records;
pub mod traits;

pub use error::{AppError, AppResult, ErrorKind};
