//! Static target points and sweep hit detection.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Angular distance under which a target lights up.
pub const HIT_TOLERANCE: f32 = 5.0;

/// A fixed point in polar coordinates, angle in the absolute frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub radius: f32,
    pub angle: f32,
}

impl TargetPoint {
    pub const fn new(radius: f32, angle: f32) -> Self {
        Self { radius, angle }
    }
}

/// Sample contacts shown when nothing else is configured.
pub fn default_targets() -> Vec<TargetPoint> {
    vec![
        TargetPoint::new(100.0, 0.0),
        TargetPoint::new(100.0, 30.0),
        TargetPoint::new(150.0, 120.0),
        TargetPoint::new(80.0, 270.0),
    ]
}

/// How the angular distance between sweep and target is measured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HitDetection {
    /// Plain absolute difference, with `> 355` catching the 0/360 seam.
    /// Lopsided when the sector start is not zero.
    #[default]
    Absolute,
    /// True shortest distance around the circle.
    Circular,
}

impl HitDetection {
    pub fn is_hit(self, sweep_angle: f32, target_angle: f32) -> bool {
        let diff = (sweep_angle - target_angle).abs();
        match self {
            HitDetection::Absolute => diff < HIT_TOLERANCE || diff > 360.0 - HIT_TOLERANCE,
            HitDetection::Circular => {
                let d = diff.rem_euclid(360.0);
                d.min(360.0 - d) < HIT_TOLERANCE
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HitDetection::Absolute => "absolute",
            HitDetection::Circular => "circular",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, true)]
    #[case(0.0, 358.0, true)]
    #[case(0.0, 10.0, false)]
    #[case(0.0, 4.9, true)]
    #[case(0.0, 5.0, false)]
    #[case(0.0, 355.0, false)]
    #[case(0.0, -4.0, true)]
    // Anything further than 355 apart counts, however far.
    #[case(365.0, 0.0, true)]
    #[case(500.0, 0.0, true)]
    fn absolute_difference(#[case] sweep: f32, #[case] target: f32, #[case] hit: bool) {
        assert_eq!(HitDetection::Absolute.is_hit(sweep, target), hit);
    }

    #[rstest]
    #[case(0.0, 358.0, true)]
    #[case(722.0, 0.0, true)]
    #[case(500.0, 0.0, false)]
    #[case(-178.0, 180.0, true)]
    #[case(0.0, 10.0, false)]
    #[case(0.0, 355.0, false)]
    fn circular_distance(#[case] sweep: f32, #[case] target: f32, #[case] hit: bool) {
        assert_eq!(HitDetection::Circular.is_hit(sweep, target), hit);
    }

    #[test]
    fn absolute_mode_overreports_far_targets() {
        // 160° apart on the circle, but 520 by subtraction.
        assert!(HitDetection::Absolute.is_hit(-180.0, 340.0));
        assert!(!HitDetection::Circular.is_hit(-180.0, 340.0));
    }
}
