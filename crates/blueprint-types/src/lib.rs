//! Shared domain types for the blueprint runner.
//!
//! This crate contains the types used across the workspace: the blueprint
//! document model, per-module and per-run execution results, service
//! configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod blueprint;
pub mod config;
pub mod error;
pub mod execution;
