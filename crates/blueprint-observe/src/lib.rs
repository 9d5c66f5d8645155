//! Observability setup for the blueprint runner.

pub mod tracing_setup;
