//! Module execution: dispatch, handlers, and the sequential workflow runner.
//!
//! - `transport` -- the `HttpTransport` port implemented in infra
//! - `dispatcher` -- classifies a module and invokes exactly one handler
//! - `http` -- outbound HTTP call handler
//! - `mapping` -- `{{variable}}` JSON mapping handler
//! - `webhook` -- webhook trigger stub (no I/O)
//! - `runner` -- straight-line runner over a blueprint's flow

pub mod dispatcher;
pub mod http;
pub mod mapping;
pub mod runner;
pub mod transport;
pub mod webhook;

#[cfg(test)]
pub(crate) mod testing;
