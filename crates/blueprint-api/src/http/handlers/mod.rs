//! REST API handler modules.

pub mod blueprint;
pub mod execution;
pub mod health;
