//! Batch export: per-size orchestration, PNG writing, reports and manifests.

pub mod manifest;
pub mod pipeline;
pub mod report;
pub mod writer;
