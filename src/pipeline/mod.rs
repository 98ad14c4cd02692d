//! # Pipeline Orchestration
//!
//! Job staging plus the linear decode → process → encode driver.

pub mod engine;
pub mod job;

pub use engine::{PipelineOrchestrator, OUTPUT_FILENAME};
pub use job::JobContext;
