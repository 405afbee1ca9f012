//! Fading trail of recent sweep positions.

use std::collections::VecDeque;

/// Maximum number of remembered angles.
pub const MAX_TRAIL: usize = 30;

/// Most-recent-first history of sweep angles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrailHistory {
    angles: VecDeque<f32>,
}

impl TrailHistory {
    pub fn new() -> Self {
        Self {
            angles: VecDeque::with_capacity(MAX_TRAIL + 2),
        }
    }

    /// The two entries a frame at `sweep_angle` contributes, newest first.
    /// The second one gives the leading edge a 1° width.
    #[inline]
    fn leading(sweep_angle: f32) -> [f32; 2] {
        [sweep_angle, sweep_angle - 1.0]
    }

    /// Commit the current frame's angle and drop anything beyond the bound.
    pub fn record(&mut self, sweep_angle: f32) {
        for angle in Self::leading(sweep_angle).into_iter().rev() {
            self.angles.push_front(angle);
        }
        self.angles.truncate(MAX_TRAIL);
    }

    /// The history as it looks once `sweep_angle` has been recorded, without
    /// mutating anything. Rendering uses this so the current frame already
    /// shows its own leading edge.
    pub fn preview(&self, sweep_angle: f32) -> impl Iterator<Item = f32> + '_ {
        Self::leading(sweep_angle)
            .into_iter()
            .chain(self.angles.iter().copied())
            .take(MAX_TRAIL)
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.angles.iter().copied()
    }
}

/// Opacity of the trail entry at `index` (0 = newest).
#[inline]
pub fn trail_alpha(index: usize) -> u8 {
    let fade = 1.0 - index as f32 / MAX_TRAIL as f32;
    (255.0 * fade).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_record_holds_two_entries_newest_first() {
        let mut trail = TrailHistory::new();
        trail.record(10.0);
        assert_eq!(trail.iter().collect::<Vec<_>>(), vec![10.0, 9.0]);
    }

    #[test]
    fn length_is_bounded() {
        let mut trail = TrailHistory::new();
        for tick in 0..100 {
            trail.record(tick as f32 * 2.0);
            assert!(trail.len() <= MAX_TRAIL);
            if tick + 1 >= 15 {
                assert_eq!(trail.len(), MAX_TRAIL);
            } else {
                assert_eq!(trail.len(), 2 * (tick + 1));
            }
        }
    }

    #[test]
    fn oldest_entries_fall_off_the_tail() {
        let mut trail = TrailHistory::new();
        for tick in 0..16 {
            trail.record(tick as f32 * 2.0);
        }
        let angles: Vec<f32> = trail.iter().collect();
        assert_eq!(angles.first(), Some(&30.0));
        // Tick 0 (angles 0 and -1) is gone.
        assert_eq!(angles.last(), Some(&1.0));
    }

    #[test]
    fn preview_matches_what_record_would_store() {
        let mut trail = TrailHistory::new();
        for tick in 0..20 {
            let angle = tick as f32 * 2.0;
            let preview: Vec<f32> = trail.preview(angle).collect();
            trail.record(angle);
            assert_eq!(preview, trail.iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn alpha_fades_linearly() {
        assert_eq!(trail_alpha(0), 255);
        assert_eq!(trail_alpha(10), 170);
        assert_eq!(trail_alpha(15), 128);
        assert_eq!(trail_alpha(20), 85);
        assert!(trail_alpha(MAX_TRAIL - 1) > 0);
        assert!((1..MAX_TRAIL).all(|i| trail_alpha(i) < trail_alpha(i - 1)));
    }
}
