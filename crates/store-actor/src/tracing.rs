//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber. Log levels come from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # state changes (Created, Updated, Deleted)
//! RUST_LOG=debug cargo run     # plus every store request with its payload
//! ```
//!
//! The store actor tags each line with `entity_type` and `id`, so module targets are hidden:
//!
//! ```text
//! INFO Created entity_type="Category" id=6f1c… size=1
//! WARN Name taken entity_type="Category" name="drinks"
//! ```

/// Initialises compact, env-filtered logging. Call once per process.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already names the source
        .compact()
        .init();
}
