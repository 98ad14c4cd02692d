//! # Video Module
//!
//! Frame and overlay data types plus the external decode/probe/encode wrapper.

pub mod codec;
pub mod types;

pub use codec::{parse_frame_rate, FrameCodec, FRAME_PATTERN};
pub use types::{Frame, OverlayLayer};
