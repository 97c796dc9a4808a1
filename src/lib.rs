#![doc(test(attr(deny(warnings))))]

//! Sitebook Core provides the tenant-scoped entity store, the financial
//! aggregation engine, and the persistence primitives behind the bookkeeping
//! screens of a construction-company back office.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Sitebook Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
