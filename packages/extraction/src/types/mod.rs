//! Data types for the link extraction library.

pub mod config;
pub mod response;
pub mod video;
