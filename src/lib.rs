//! # Doodle-Compositor
//!
//! Turn any video into a doodle-styled animation: every frame gets crisp
//! white outlines traced around its foreground shapes plus a layer of
//! randomized hand-drawn scribbles, then the frames are reassembled at the
//! source frame rate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doodle_compositor::{config::Config, pipeline::PipelineOrchestrator};
//!
//! # fn main() -> doodle_compositor::Result<()> {
//! let config = Config::default();
//! let orchestrator = PipelineOrchestrator::new(config);
//! let output = orchestrator.process("input.mp4".as_ref())?;
//! println!("wrote {:?}", output);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`video`] - Frame and overlay data types, external decode/probe/encode
//! - [`effects`] - Outline tracing, doodle generation, overlay caching
//! - [`pipeline`] - Job staging and the orchestration loop
//! - [`config`] - Configuration management
//!
//! Decoding and encoding shell out to FFmpeg; everything in between runs
//! in-process on `image` buffers.

pub mod config;
pub mod effects;
pub mod error;
pub mod pipeline;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{FailureReport, PipelineError, Result},
    pipeline::PipelineOrchestrator,
    video::Frame,
};
