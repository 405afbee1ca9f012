//! Sweep angle state machine.

/// Degrees the sweep moves per tick. Fixed per tick, not per elapsed time.
pub const SWEEP_STEP: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepState {
    pub angle: f32,
    pub direction: Direction,
}

impl Default for SweepState {
    fn default() -> Self {
        Self {
            angle: 0.0,
            direction: Direction::Forward,
        }
    }
}

impl SweepState {
    /// Move one step. `limit` is the sweep range (360 without a sector).
    ///
    /// Without `wrap` the angle restarts from 0 once it reaches the limit.
    /// With `wrap` it bounces between 0 and the limit.
    pub fn advance(&mut self, limit: f32, wrap: bool) {
        self.angle += SWEEP_STEP * self.direction.sign();

        if !wrap {
            if self.angle >= limit {
                self.angle = 0.0;
            }
            return;
        }

        if self.angle >= limit {
            self.angle = limit;
            self.direction = Direction::Backward;
        }
        if self.angle <= 0.0 {
            self.angle = 0.0;
            self.direction = Direction::Forward;
        }
    }
}
