//! Generative text provider implementations.

pub mod gemini;
