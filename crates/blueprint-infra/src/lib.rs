//! Infrastructure layer for the blueprint runner.
//!
//! Contains the adapters for the ports defined in `blueprint-core`: the
//! reqwest-backed [`HttpTransport`](blueprint_core::execution::transport::HttpTransport)
//! used by HTTP modules, the Gemini text generator used for explanations, and
//! the configuration loader.

pub mod config;
pub mod http;
pub mod llm;
