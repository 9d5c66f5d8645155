//! Google Gemini text generator.
//!
//! [`GeminiClient`] implements the
//! [`TextGenerator`](blueprint_core::explain::TextGenerator) port against the
//! `generateContent` REST endpoint.

pub mod client;
pub mod types;

pub use client::GeminiClient;
