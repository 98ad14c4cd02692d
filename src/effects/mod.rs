//! # Frame Effects
//!
//! The two visual effects applied to every frame - outline tracing and the
//! doodle overlay - plus the temporal cache that amortizes overlay
//! generation across frame groups.

pub mod doodle;
pub(crate) mod draw;
pub mod outline;
pub mod overlay;

pub use doodle::{PatternKind, Stroke, PALETTE, STROKES_PER_LAYER};
pub use outline::OutlineFilter;
pub use overlay::OverlayCache;
