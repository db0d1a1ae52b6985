// Link Extractor API - server core
//
// HTTP surface over the link-extraction library: the read_link pipeline plus
// health, capabilities and info endpoints, gated by a shared-secret API key
// and rate limited per client IP.

pub mod config;
pub mod server;

pub use config::*;
