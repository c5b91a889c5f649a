//! # Observability & Tracing
//!
//! Structured-logging setup for actor systems built on this crate.
//!
//! The subscriber uses a compact format and hides module targets
//! (`with_target(false)`): actor log lines already carry an `entity_type`
//! field, which is the useful routing key. Levels are driven by the
//! standard `RUST_LOG` environment variable:
//!
//! ```bash
//! RUST_LOG=info cargo run      # compact workflow logs
//! RUST_LOG=debug cargo run     # full request payloads (logged once per call)
//! ```
//!
//! What gets traced:
//! - **Actor lifecycle**: startup, shutdown, final store size
//! - **Operations**: Create, Get, Update, List, and custom Actions
//! - **Errors**: entity IDs and failure reasons as structured fields

/// Initializes the global tracing subscriber. Call once at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
