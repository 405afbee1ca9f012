//! Scan conversion for lines and circles.
//!
//! Each primitive scans its bounding box once and writes every pixel at most
//! one time, so translucent shapes never darken where they overlap themselves.

use super::Canvas;
use crate::color::RgbColor;
use crate::radar::{CircleStyle, DrawCommand, Point};

/// Half-width of the antialiased edge, in pixels.
const EDGE: f32 = 0.5;

/// Coverage for a pixel whose center sits `signed_dist` outside a shape edge
/// (negative = inside), fading linearly over `softness` on either side.
#[inline]
fn coverage(signed_dist: f32, softness: f32) -> f32 {
    ((softness - signed_dist) / (2.0 * softness)).clamp(0.0, 1.0)
}

pub fn draw_command(canvas: &mut Canvas, command: &DrawCommand, units_per_pixel: f32) {
    let scale = 1.0 / units_per_pixel;
    let to_px = |p: Point| Point::new(p.x * scale, p.y * scale);

    match *command {
        DrawCommand::Line {
            from,
            to,
            color,
            width,
            alpha,
        } => draw_line(
            canvas,
            to_px(from),
            to_px(to),
            width * scale,
            color,
            alpha as f32 / 255.0,
        ),
        DrawCommand::Circle {
            center,
            radius,
            style,
            color,
            alpha,
            width,
            blur,
        } => {
            let softness = blur.map_or(EDGE, |b| (b * scale).max(EDGE));
            draw_circle(
                canvas,
                to_px(center),
                radius * scale,
                style,
                width * scale,
                softness,
                color,
                alpha as f32 / 255.0,
            );
        }
    }
}

/// Integer pixel range covering [lo, hi], clipped to `0..limit`.
fn span(lo: f32, hi: f32, limit: usize) -> std::ops::Range<usize> {
    let start = lo.floor().max(0.0) as usize;
    let end = (hi.ceil().max(0.0) as usize).min(limit);
    start..end.max(start)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

fn draw_line(canvas: &mut Canvas, from: Point, to: Point, width: f32, color: RgbColor, opacity: f32) {
    // Hairlines still get one pixel of coverage.
    let half = (width / 2.0).max(EDGE);
    let pad = half + EDGE;

    let xs = span(from.x.min(to.x) - pad, from.x.max(to.x) + pad, canvas.width);
    let ys = span(from.y.min(to.y) - pad, from.y.max(to.y) + pad, canvas.height);

    for y in ys {
        for x in xs.clone() {
            let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let cov = coverage(distance_to_segment(p, from, to) - half, EDGE);
            if cov > 0.0 {
                canvas.blend_pixel(x, y, color, opacity * cov);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_circle(
    canvas: &mut Canvas,
    center: Point,
    radius: f32,
    style: CircleStyle,
    width: f32,
    softness: f32,
    color: RgbColor,
    opacity: f32,
) {
    let half = (width / 2.0).max(EDGE);
    let reach = match style {
        CircleStyle::Fill => radius + softness,
        CircleStyle::Stroke => radius + half + softness,
    };

    let xs = span(center.x - reach, center.x + reach, canvas.width);
    let ys = span(center.y - reach, center.y + reach, canvas.height);

    for y in ys {
        for x in xs.clone() {
            let d = Point::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
            let signed = match style {
                CircleStyle::Fill => d - radius,
                CircleStyle::Stroke => (d - radius).abs() - half,
            };
            let cov = coverage(signed, softness);
            if cov > 0.0 {
                canvas.blend_pixel(x, y, color, opacity * cov);
            }
        }
    }
}
