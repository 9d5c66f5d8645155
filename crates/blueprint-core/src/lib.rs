//! Business logic and port trait definitions for the blueprint runner.
//!
//! This crate defines the "ports" (`HttpTransport`, `TextGenerator`) that the
//! infrastructure layer implements. It depends only on `blueprint-types` --
//! never on `blueprint-infra` or any HTTP client crate.

pub mod blueprint;
pub mod execution;
pub mod explain;
