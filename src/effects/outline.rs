//! Outline effect: trace white borders around the bright shapes in a frame.
//!
//! The detector is deliberately coarse: a single global threshold separates
//! foreground from background, so it works best on footage with clear
//! subject/background contrast. No randomness anywhere in this module -
//! identical input pixels always produce identical outlines.

use image::{GrayImage, Rgb};
use imageproc::contours::{find_contours, BorderType, Contour};

use crate::effects::draw::thick_polyline_mut;
use crate::video::Frame;

/// Sigma equivalent of a 5x5 Gaussian kernel with auto-derived sigma
const GAUSSIAN_SIGMA: f32 = 1.1;

/// Minimum grayscale intensity treated as foreground (inclusive)
const FOREGROUND_THRESHOLD: u8 = 110;

/// Stroke width of the traced outline, in pixels
const OUTLINE_WIDTH: u32 = 4;

const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Traces crisp white outlines around detected foreground shapes
///
/// Pipeline per frame: grayscale, Gaussian blur, binary threshold, external
/// contour extraction, then the contours are stroked onto the original
/// (unblurred, unthresholded) color frame.
pub struct OutlineFilter;

impl OutlineFilter {
    pub fn new() -> Self {
        Self
    }

    /// Apply the outline effect, producing a new frame
    pub fn apply(&self, frame: &Frame) -> Frame {
        let gray = image::imageops::grayscale(frame.as_image());
        let blurred = imageproc::filter::gaussian_blur_f32(&gray, GAUSSIAN_SIGMA);
        let mask = binarize(&blurred);

        let mut output = frame.as_image().clone();
        for contour in external_contours(&mask) {
            if contour.len() < 2 {
                continue;
            }
            thick_polyline_mut(&mut output, &contour, OUTLINE_WIDTH, OUTLINE_COLOR, true);
        }

        Frame::new(frame.index(), output)
    }
}

impl Default for OutlineFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Binary threshold: intensity >= FOREGROUND_THRESHOLD maps to 255, else 0
///
/// `imageproc::contrast::threshold` is exclusive (`> t`), so the cutoff is
/// shifted down by one to make 110 itself foreground.
fn binarize(gray: &GrayImage) -> GrayImage {
    imageproc::contrast::threshold(gray, FOREGROUND_THRESHOLD - 1)
}

/// Extract the outermost boundary of each connected foreground region
///
/// Suzuki-Abe border following via `imageproc::contours::find_contours`,
/// keeping only top-level outer borders (holes and nested contours are
/// dropped), each reduced by collinear-point chain approximation.
fn external_contours(mask: &GrayImage) -> Vec<Vec<(f32, f32)>> {
    let contours: Vec<Contour<u32>> = find_contours(mask);

    contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let points: Vec<(i64, i64)> = c
                .points
                .iter()
                .map(|p| (i64::from(p.x), i64::from(p.y)))
                .collect();
            drop_collinear(&points)
                .into_iter()
                .map(|(x, y)| (x as f32, y as f32))
                .collect()
        })
        .collect()
}

/// Chain approximation: remove intermediate vertices that lie on the straight
/// line between their neighbors (wrapping, since contours are closed)
fn drop_collinear(points: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let (px, py) = points[(i + n - 1) % n];
        let (cx, cy) = points[i];
        let (nx, ny) = points[(i + 1) % n];

        let cross = (cx - px) * (ny - cy) - (cy - py) * (nx - cx);
        if cross != 0 {
            kept.push((cx, cy));
        }
    }

    if kept.is_empty() {
        // Fully degenerate (all points on one line); keep the endpoints.
        return vec![points[0], points[n - 1]];
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dark frame with a bright square spanning [16, 48) in both axes
    fn square_frame() -> Frame {
        let buffer = image::RgbImage::from_fn(64, 64, |x, y| {
            if (16..48).contains(&x) && (16..48).contains(&y) {
                image::Rgb([255, 255, 255])
            } else {
                image::Rgb([0, 0, 0])
            }
        });
        Frame::new(1, buffer)
    }

    #[test]
    fn dark_frame_is_unchanged() {
        let frame = Frame::new_filled(1, 32, 32, [20, 20, 20]);
        let out = OutlineFilter::new().apply(&frame);

        assert_eq!(out.as_image(), frame.as_image());
    }

    #[test]
    fn bright_square_gets_a_traced_border() {
        let frame = square_frame();
        let out = OutlineFilter::new().apply(&frame);

        // Pixels just outside the square edge are whitened by the stroke.
        assert_eq!(frame.get_pixel(15, 32), [0, 0, 0]);
        assert_eq!(out.get_pixel(15, 32), [255, 255, 255]);

        // Pixels far from the border keep their original values.
        assert_eq!(out.get_pixel(2, 2), [0, 0, 0]);
        assert_eq!(out.get_pixel(32, 32), [255, 255, 255]);
    }

    #[test]
    fn outline_is_deterministic() {
        let frame = square_frame();
        let filter = OutlineFilter::new();

        let first = filter.apply(&frame);
        let second = filter.apply(&frame);
        assert_eq!(first.as_image(), second.as_image());
    }

    #[test]
    fn threshold_is_inclusive_at_110() {
        let gray = GrayImage::from_fn(4, 1, |x, _| match x {
            0 => image::Luma([109]),
            1 => image::Luma([110]),
            2 => image::Luma([111]),
            _ => image::Luma([0]),
        });

        let mask = binarize(&gray);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(1, 0).0[0], 255);
        assert_eq!(mask.get_pixel(2, 0).0[0], 255);
    }

    #[test]
    fn collinear_points_are_dropped() {
        // A 3x2 rectangle border walked point by point.
        let points = vec![
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (3, 1),
            (3, 2),
            (2, 2),
            (1, 2),
            (0, 2),
            (0, 1),
        ];
        let kept = drop_collinear(&points);
        assert_eq!(kept, vec![(0, 0), (3, 0), (3, 2), (0, 2)]);
    }

    #[test]
    fn nested_regions_keep_outer_border_only() {
        // Bright ring: outer square with a dark hole in the middle.
        let mask = GrayImage::from_fn(32, 32, |x, y| {
            let in_outer = (8..24).contains(&x) && (8..24).contains(&y);
            let in_hole = (12..20).contains(&x) && (12..20).contains(&y);
            if in_outer && !in_hole {
                image::Luma([255])
            } else {
                image::Luma([0])
            }
        });

        let contours = external_contours(&mask);
        assert_eq!(contours.len(), 1);
    }
}
