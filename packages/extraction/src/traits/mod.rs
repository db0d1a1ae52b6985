//! Collaborator traits consumed by the extraction pipeline.
//!
//! Every network-facing dependency sits behind one of these so the pipeline
//! can be exercised with the mocks in [`crate::testing`].

pub mod fetcher;
pub mod metadata;
pub mod transcript;
