//! Temporal reuse policy for doodle layers.
//!
//! Generating 120 strokes per frame is the most expensive part of the
//! pipeline, so one layer is shared across each group of consecutive frames.
//! The overlay visibly "holds still" for the length of a group - an
//! intentional speed/quality trade-off, not a bug.

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::effects::doodle;
use crate::video::OverlayLayer;

/// Decides, per frame index, whether to generate a fresh doodle layer or
/// reuse the previous one
///
/// Frames are partitioned into contiguous groups of `frames_per_update`
/// starting at index 0; the first frame of each group (and unconditionally
/// the very first frame) triggers generation, the rest of the group shares
/// the same `Arc`.
pub struct OverlayCache {
    frames_per_update: usize,
    current: Option<Arc<OverlayLayer>>,
}

impl OverlayCache {
    pub fn new(frames_per_update: usize) -> Self {
        Self {
            frames_per_update,
            current: None,
        }
    }

    /// Get the layer for the frame at 0-based `index`, sized `width`x`height`
    pub fn layer_for<R: Rng>(
        &mut self,
        index: usize,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Arc<OverlayLayer> {
        match &self.current {
            Some(layer) if index % self.frames_per_update != 0 => Arc::clone(layer),
            _ => {
                debug!("Generating fresh doodle layer at frame index {}", index);
                let layer = Arc::new(doodle::generate(width, height, rng));
                self.current = Some(Arc::clone(&layer));
                layer
            }
        }
    }
}
