#![doc(test(attr(deny(warnings))))]

//! Spendtrack offers an expense ledger, budget configuration, and derived
//! spending metrics, with a command shell and collaborators for CSV export
//! and AI-generated spending advice.

pub mod advice;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod export;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("spendtrack=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Spendtrack tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
