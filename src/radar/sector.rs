//! Angular frame the sweep operates in.

/// How the sweep's angular frame is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepFrame {
    /// A wedge centred on 0° spanning `sweep_range` degrees.
    Sector { sweep_range: f32, start_angle: f32 },
    /// No sector at all: the sweep runs over [0, 360) and the grid is a
    /// crosshair instead of boundary rays.
    FullCircle,
}

impl SweepFrame {
    /// Build a sector frame. The start angle is derived once and never changes.
    pub fn sector(sweep_range: f32) -> Self {
        let sweep_range = sweep_range.clamp(f32::EPSILON, 360.0);
        SweepFrame::Sector {
            sweep_range,
            start_angle: -sweep_range / 2.0,
        }
    }

    pub fn full_circle() -> Self {
        SweepFrame::FullCircle
    }

    /// Angle at which the sweep resets (or bounces).
    pub fn limit(&self) -> f32 {
        match self {
            SweepFrame::Sector { sweep_range, .. } => *sweep_range,
            SweepFrame::FullCircle => 360.0,
        }
    }

    pub fn start_angle(&self) -> f32 {
        match self {
            SweepFrame::Sector { start_angle, .. } => *start_angle,
            SweepFrame::FullCircle => 0.0,
        }
    }

    /// Convert a sweep-relative angle to the absolute drawing angle.
    #[inline]
    pub fn absolute(&self, sweep_angle: f32) -> f32 {
        self.start_angle() + sweep_angle
    }

    /// Whether a target at `angle` (absolute frame) lies inside the sector.
    /// Plain subtraction, no normalisation: 400° is outside a 360° sector.
    pub fn contains(&self, angle: f32) -> bool {
        match self {
            SweepFrame::Sector {
                sweep_range,
                start_angle,
            } => (0.0..=*sweep_range).contains(&(angle - start_angle)),
            SweepFrame::FullCircle => true,
        }
    }
}
