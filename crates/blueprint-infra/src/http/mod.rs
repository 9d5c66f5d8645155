//! Outbound HTTP for HTTP modules.

pub mod transport;

pub use transport::ReqwestTransport;
