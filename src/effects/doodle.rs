//! Doodle overlay generator: random hand-drawn-looking strokes on a
//! transparent canvas.
//!
//! Randomness is injected through the `rand::Rng` bound - production callers
//! pass `thread_rng()`, tests pass a seeded `SmallRng` and get reproducible
//! layers. There is no caller-facing knob for colors or pattern shapes; the
//! palette and the pattern set are fixed.

use image::{Rgba, RgbaImage};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::effects::draw::{thick_line_mut, thick_polyline_mut};
use crate::video::OverlayLayer;

/// Number of strokes drawn into every layer
pub const STROKES_PER_LAYER: usize = 120;

/// The fixed doodle palette: red, blue, green, yellow, orange
pub const PALETTE: [Rgba<u8>; 5] = [
    Rgba([255, 0, 0, 255]),
    Rgba([0, 0, 255, 255]),
    Rgba([0, 128, 0, 255]),
    Rgba([255, 255, 0, 255]),
    Rgba([255, 165, 0, 255]),
];

/// The closed set of stroke shapes
///
/// Each variant selects one drawing routine; dispatch happens in a single
/// exhaustive match in [`render_stroke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Line,
    Zigzag,
    Star,
    Spiral,
    Arrow,
    Scribble,
}

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Line,
        PatternKind::Zigzag,
        PatternKind::Star,
        PatternKind::Spiral,
        PatternKind::Arrow,
        PatternKind::Scribble,
    ];
}

/// One planned stroke: where it starts, what color, which shape
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub origin: (u32, u32),
    pub color: Rgba<u8>,
    pub kind: PatternKind,
}

/// Plan the strokes for one layer: uniform origin, color and kind draws
///
/// Split from rasterization so the plan itself is testable - exactly
/// [`STROKES_PER_LAYER`] entries with origins inside the canvas.
pub fn plan_strokes<R: Rng>(width: u32, height: u32, rng: &mut R) -> Vec<Stroke> {
    (0..STROKES_PER_LAYER)
        .map(|_| Stroke {
            origin: (rng.gen_range(0..width), rng.gen_range(0..height)),
            color: *PALETTE.choose(rng).expect("palette is non-empty"),
            kind: *PatternKind::ALL.choose(rng).expect("pattern set is non-empty"),
        })
        .collect()
}

/// Generate a doodle layer for the given canvas size
pub fn generate<R: Rng>(width: u32, height: u32, rng: &mut R) -> OverlayLayer {
    let mut layer = OverlayLayer::new_transparent(width, height);

    for stroke in plan_strokes(width, height, rng) {
        render_stroke(layer.as_image_mut(), stroke, rng);
    }

    layer
}

/// Rasterize one stroke onto the canvas
fn render_stroke<R: Rng>(canvas: &mut RgbaImage, stroke: Stroke, rng: &mut R) {
    let (x, y) = (stroke.origin.0 as f32, stroke.origin.1 as f32);
    let color = stroke.color;

    match stroke.kind {
        PatternKind::Line => {
            let dx = rng.gen_range(-80..=80) as f32;
            let dy = rng.gen_range(-80..=80) as f32;
            thick_line_mut(canvas, (x, y), (x + dx, y + dy), 4, color);
        }
        PatternKind::Zigzag => {
            let points: Vec<(f32, f32)> = (0..6)
                .map(|i| (x + (i * 10) as f32, y + rng.gen_range(-20..=20) as f32))
                .collect();
            thick_polyline_mut(canvas, &points, 3, color, false);
        }
        PatternKind::Star => {
            let h = rng.gen_range(10..=20) as f32;
            thick_line_mut(canvas, (x - h, y), (x + h, y), 3, color);
            let v = rng.gen_range(10..=20) as f32;
            thick_line_mut(canvas, (x, y - v), (x, y + v), 3, color);
            let d1 = rng.gen_range(10..=20) as f32;
            thick_line_mut(canvas, (x - d1, y - d1), (x + d1, y + d1), 2, color);
            let d2 = rng.gen_range(10..=20) as f32;
            thick_line_mut(canvas, (x - d2, y + d2), (x + d2, y - d2), 2, color);
        }
        PatternKind::Spiral => {
            let radius = rng.gen_range(15..=35) as f32;
            let end_deg = rng.gen_range(250..=320);
            let points: Vec<(f32, f32)> = (0..=end_deg)
                .step_by(5)
                .map(|deg| {
                    let theta = (deg as f32).to_radians();
                    (x + radius * theta.cos(), y + radius * theta.sin())
                })
                .collect();
            thick_polyline_mut(canvas, &points, 3, color, false);
        }
        PatternKind::Arrow => {
            let dx = rng.gen_range(-50..=50) as f32;
            let dy = rng.gen_range(-50..=50) as f32;
            let tip = (x + dx, y + dy);
            thick_line_mut(canvas, (x, y), tip, 3, color);
            thick_line_mut(canvas, tip, (tip.0 - 8.0, tip.1 - 8.0), 3, color);
            thick_line_mut(canvas, tip, (tip.0 + 8.0, tip.1 - 8.0), 3, color);
        }
        PatternKind::Scribble => {
            for _ in 0..6 {
                let start = (
                    x + rng.gen_range(-20..=20) as f32,
                    y + rng.gen_range(-20..=20) as f32,
                );
                let end = (
                    x + rng.gen_range(-20..=20) as f32,
                    y + rng.gen_range(-20..=20) as f32,
                );
                thick_line_mut(canvas, start, end, 3, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn plans_exactly_120_strokes_with_in_bounds_origins() {
        let mut rng = SmallRng::seed_from_u64(7);
        let strokes = plan_strokes(640, 480, &mut rng);

        assert_eq!(strokes.len(), STROKES_PER_LAYER);
        for stroke in &strokes {
            assert!(stroke.origin.0 < 640);
            assert!(stroke.origin.1 < 480);
        }
    }

    #[test]
    fn all_pattern_kinds_and_colors_get_used() {
        let mut rng = SmallRng::seed_from_u64(11);
        let strokes = plan_strokes(640, 480, &mut rng);

        let kinds: HashSet<PatternKind> = strokes.iter().map(|s| s.kind).collect();
        assert_eq!(kinds.len(), PatternKind::ALL.len());

        let colors: HashSet<[u8; 4]> = strokes.iter().map(|s| s.color.0).collect();
        assert_eq!(colors.len(), PALETTE.len());
    }

    #[test]
    fn generated_layer_matches_canvas_size() {
        let mut rng = SmallRng::seed_from_u64(1);
        let layer = generate(320, 200, &mut rng);

        assert_eq!(layer.width(), 320);
        assert_eq!(layer.height(), 200);
    }

    #[test]
    fn generated_layer_has_strokes_on_transparent_ground() {
        let mut rng = SmallRng::seed_from_u64(2);
        let layer = generate(640, 480, &mut rng);

        let inked = layer.as_image().pixels().filter(|p| p.0[3] > 0).count();
        let total = (640 * 480) as usize;
        assert!(inked > 0, "expected at least some stroke pixels");
        assert!(inked < total, "expected transparent background to remain");
    }

    #[test]
    fn drawn_pixels_use_only_palette_colors() {
        let mut rng = SmallRng::seed_from_u64(3);
        let layer = generate(640, 480, &mut rng);

        let palette: HashSet<[u8; 4]> = PALETTE.iter().map(|c| c.0).collect();
        for pixel in layer.as_image().pixels() {
            if pixel.0[3] > 0 {
                assert!(palette.contains(&pixel.0), "unexpected color {:?}", pixel.0);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_layer() {
        let first = generate(160, 120, &mut SmallRng::seed_from_u64(42));
        let second = generate(160, 120, &mut SmallRng::seed_from_u64(42));

        assert_eq!(first.as_image(), second.as_image());
    }
}
