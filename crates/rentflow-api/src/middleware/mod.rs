//! Tower layers and middleware functions applied around the router.

pub mod cors;
pub mod logging;
