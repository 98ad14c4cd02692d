use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

use crate::error::{FilterError, Result};

/// Represents a single video frame
///
/// A frame couples an RGB pixel buffer with its 1-based position in the
/// decoded sequence. Frames are immutable: every pipeline stage consumes a
/// frame and produces a new one, so the sequence invariant (same count, same
/// order, same indices end to end) only depends on the orchestrator loop.
#[derive(Clone, Debug)]
pub struct Frame {
    index: u32,
    buffer: RgbImage,
}

impl Frame {
    /// Create a new frame from an RGB image buffer
    pub fn new(index: u32, buffer: RgbImage) -> Self {
        Self { index, buffer }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(index: u32, width: u32, height: u32, color: [u8; 3]) -> Self {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| Rgb(color));
        Self { index, buffer }
    }

    /// Load a frame from a still image on disk
    pub fn load<P: AsRef<Path>>(index: u32, path: P) -> Result<Self> {
        let image = image::open(path.as_ref()).map_err(|_| FilterError::LoadFailed {
            path: path.as_ref().display().to_string(),
        })?;
        Ok(Self::new(index, image.to_rgb8()))
    }

    /// Save the frame as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.buffer
            .save(path.as_ref())
            .map_err(|_| FilterError::SaveFailed {
                path: path.as_ref().display().to_string(),
            })?;
        Ok(())
    }

    /// 1-based position of this frame in the decoded sequence
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Persisted file name for the given sequence position
    ///
    /// Zero-padded to five digits so lexical order equals numeric order.
    pub fn filename_for(index: u32) -> String {
        format!("frame_{:05}.png", index)
    }

    /// Persisted file name of this frame
    pub fn filename(&self) -> String {
        Self::filename_for(self.index)
    }

    /// Get the width of the frame
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Get the height of the frame
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let pixel = self.buffer.get_pixel(x, y);
        [pixel[0], pixel[1], pixel[2]]
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Consume the frame, returning the underlying buffer
    pub fn into_image(self) -> RgbImage {
        self.buffer
    }
}

/// A transparent doodle layer sized to match a frame
///
/// The canvas starts fully transparent; the doodle generator draws opaque
/// strokes into it. Once generated a layer is never mutated again - it is
/// shared read-only across every frame in its reuse window.
#[derive(Clone, Debug)]
pub struct OverlayLayer {
    canvas: RgbaImage,
}

impl OverlayLayer {
    /// Create a fully transparent layer of the given size
    pub fn new_transparent(width: u32, height: u32) -> Self {
        let canvas = ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 0]));
        Self { canvas }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Get a pixel at the given coordinates (returns RGBA array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.canvas.get_pixel(x, y).0
    }

    /// Get the underlying canvas
    pub fn as_image(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Get a mutable reference to the canvas, for stroke rasterization
    pub fn as_image_mut(&mut self) -> &mut RgbaImage {
        &mut self.canvas
    }

    /// Alpha-composite this layer over a base frame
    ///
    /// Standard source-over blending per pixel, flattened back to an opaque
    /// RGB frame carrying the base frame's sequence index. The layer must
    /// match the frame's dimensions.
    pub fn composite_over(&self, base: &Frame) -> Frame {
        debug_assert_eq!(self.width(), base.width());
        debug_assert_eq!(self.height(), base.height());

        let buffer = ImageBuffer::from_fn(base.width(), base.height(), |x, y| {
            let Rgba([sr, sg, sb, sa]) = *self.canvas.get_pixel(x, y);
            let [dr, dg, db] = base.get_pixel(x, y);

            let a = u16::from(sa);
            let blend = |s: u8, d: u8| -> u8 {
                ((u16::from(s) * a + u16::from(d) * (255 - a)) / 255) as u8
            };

            Rgb([blend(sr, dr), blend(sg, dg), blend(sb, db)])
        });

        Frame::new(base.index(), buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_filenames_are_zero_padded() {
        assert_eq!(Frame::filename_for(1), "frame_00001.png");
        assert_eq!(Frame::filename_for(42), "frame_00042.png");
        assert_eq!(Frame::filename_for(12345), "frame_12345.png");
    }

    #[test]
    fn frame_filename_ordering_is_lexical() {
        let names: Vec<String> = (1..=20).map(Frame::filename_for).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn transparent_layer_leaves_base_unchanged() {
        let base = Frame::new_filled(1, 8, 8, [10, 20, 30]);
        let layer = OverlayLayer::new_transparent(8, 8);

        let out = layer.composite_over(&base);
        assert_eq!(out.index(), 1);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(out.get_pixel(x, y), [10, 20, 30]);
            }
        }
    }

    #[test]
    fn opaque_layer_pixels_take_priority() {
        let base = Frame::new_filled(3, 4, 4, [10, 20, 30]);
        let mut layer = OverlayLayer::new_transparent(4, 4);
        layer
            .as_image_mut()
            .put_pixel(2, 2, Rgba([255, 0, 0, 255]));

        let out = layer.composite_over(&base);
        assert_eq!(out.get_pixel(2, 2), [255, 0, 0]);
        assert_eq!(out.get_pixel(0, 0), [10, 20, 30]);
    }

    #[test]
    fn semi_transparent_pixels_blend() {
        let base = Frame::new_filled(1, 2, 2, [0, 0, 0]);
        let mut layer = OverlayLayer::new_transparent(2, 2);
        layer
            .as_image_mut()
            .put_pixel(0, 0, Rgba([255, 255, 255, 128]));

        let out = layer.composite_over(&base);
        let [r, g, b] = out.get_pixel(0, 0);
        assert!(r > 100 && r < 150);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn frame_roundtrips_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Frame::filename_for(7));

        let frame = Frame::new_filled(7, 6, 4, [200, 100, 50]);
        frame.save_png(&path).unwrap();

        let loaded = Frame::load(7, &path).unwrap();
        assert_eq!(loaded.width(), 6);
        assert_eq!(loaded.height(), 4);
        assert_eq!(loaded.get_pixel(3, 2), [200, 100, 50]);
    }
}
