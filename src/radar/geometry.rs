//! Viewport layout and polar/cartesian conversion.

/// Distance kept between the outermost ring and the viewport edge.
pub const RADIUS_MARGIN: f32 = 16.0;

/// A point in screen space (Y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Current size of the drawing surface. Read fresh every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Radius of the outermost ring. Never negative, so degenerate
    /// viewports produce zero-sized geometry instead of inverted shapes.
    pub fn effective_radius(&self) -> f32 {
        let center = self.center();
        (center.x.min(center.y) - RADIUS_MARGIN).max(0.0)
    }
}

/// Convert polar coordinates to screen coordinates.
/// 0° points along +X and angles grow clockwise because Y points down.
#[inline]
pub fn polar_to_cartesian(center: Point, radius: f32, angle_degrees: f32) -> Point {
    let rad = angle_degrees.to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// Radii of `ring_count` evenly spaced concentric rings, innermost first.
pub fn ring_radii(radius: f32, ring_count: usize) -> impl Iterator<Item = f32> {
    (1..=ring_count).map(move |i| radius * i as f32 / ring_count as f32)
}
