//! Thick-stroke rasterization helpers shared by the outline and doodle effects.
//!
//! `imageproc`'s line primitives are one pixel wide; strokes here need widths
//! of 2-4 px. A thick segment is rendered by stamping filled circles of
//! radius `width / 2` at roughly one-pixel intervals along the segment, which
//! gives rounded caps and joins. All primitives clip at the canvas edge, so
//! stroke extents may safely exceed the image bounds.

use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, Canvas};

/// Draw a line segment with the given stroke width
pub(crate) fn thick_line_mut<C: Canvas>(
    canvas: &mut C,
    start: (f32, f32),
    end: (f32, f32),
    width: u32,
    color: C::Pixel,
) {
    if width <= 1 {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }

    let radius = (width / 2) as i32;
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let steps = dx.hypot(dy).ceil().max(1.0) as u32;

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (start.0 + dx * t).round() as i32;
        let y = (start.1 + dy * t).round() as i32;
        draw_filled_circle_mut(canvas, (x, y), radius, color);
    }
}

/// Draw consecutive segments through the given vertices
pub(crate) fn thick_polyline_mut<C: Canvas>(
    canvas: &mut C,
    points: &[(f32, f32)],
    width: u32,
    color: C::Pixel,
    closed: bool,
) {
    for pair in points.windows(2) {
        thick_line_mut(canvas, pair[0], pair[1], width, color);
    }

    if closed && points.len() > 2 {
        if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
            thick_line_mut(canvas, last, first, width, color);
        }
    }
}
