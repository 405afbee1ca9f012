//! Drawing primitives emitted by the animator.

use super::geometry::Point;
use crate::color::RgbColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleStyle {
    /// Outline of the given stroke width
    Stroke,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f32,
        style: CircleStyle,
        color: RgbColor,
        alpha: u8,
        /// Stroke width; ignored for fills
        width: f32,
        /// Soft edge extent, `None` for a hard edge
        blur: Option<f32>,
    },
    Line {
        from: Point,
        to: Point,
        color: RgbColor,
        width: f32,
        alpha: u8,
    },
}

impl DrawCommand {
    pub fn stroke_circle(center: Point, radius: f32, color: RgbColor, width: f32) -> Self {
        DrawCommand::Circle {
            center,
            radius: radius.max(0.0),
            style: CircleStyle::Stroke,
            color,
            alpha: u8::MAX,
            width,
            blur: None,
        }
    }

    pub fn fill_circle(center: Point, radius: f32, color: RgbColor, blur: Option<f32>) -> Self {
        DrawCommand::Circle {
            center,
            radius: radius.max(0.0),
            style: CircleStyle::Fill,
            color,
            alpha: u8::MAX,
            width: 0.0,
            blur,
        }
    }

    pub fn line(from: Point, to: Point, color: RgbColor, width: f32, alpha: u8) -> Self {
        DrawCommand::Line {
            from,
            to,
            color,
            width,
            alpha,
        }
    }

    pub fn is_glow(&self) -> bool {
        matches!(self, DrawCommand::Circle { blur: Some(_), .. })
    }
}
