mod command;
mod geometry;
mod sector;
mod sweep;
mod targets;
mod trail;

pub use command::{CircleStyle, DrawCommand};
pub use geometry::{polar_to_cartesian, ring_radii, Point, Viewport};
pub use sector::SweepFrame;
pub use sweep::{Direction, SweepState};
pub use targets::{default_targets, HitDetection, TargetPoint};
pub use trail::{trail_alpha, TrailHistory, MAX_TRAIL};

use std::time::Duration;
use tracing::debug;

use crate::color::RadarPalette;
use crate::config::{SectorConfig, SectorMode, StyleConfig};

/// Delay the host should wait before the next tick (about 60 fps).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

const CENTER_GLOW_RADIUS: f32 = 20.0;
const CENTER_DOT_RADIUS: f32 = 12.0;
const HIT_MARKER_RADIUS: f32 = 16.0;
const POINT_RADIUS: f32 = 8.0;

/// Visual parameters that do not affect the animation itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarStyle {
    pub palette: RadarPalette,
    pub ring_count: usize,
    pub ring_width: f32,
    pub sweep_width: f32,
    pub glow_blur: f32,
}

impl From<&StyleConfig> for RadarStyle {
    fn from(config: &StyleConfig) -> Self {
        Self {
            palette: config.palette(),
            ring_count: config.ring_count,
            ring_width: config.ring_width,
            sweep_width: config.sweep_width,
            glow_blur: config.glow_blur,
        }
    }
}

/// Everything a host needs after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub commands: Vec<DrawCommand>,
    /// When the host should request the next frame
    pub next_frame: Duration,
}

/// Owns the sweep state and turns it into draw commands, one frame at a time.
#[derive(Debug, Clone)]
pub struct SweepAnimator {
    frame: SweepFrame,
    wrap: bool,
    hit_detection: HitDetection,
    targets: Vec<TargetPoint>,
    style: RadarStyle,
    frame_interval: Duration,
    state: SweepState,
    trail: TrailHistory,
}

impl SweepAnimator {
    pub fn new(sector: &SectorConfig, style: RadarStyle, targets: Vec<TargetPoint>) -> Self {
        let frame = match sector.mode {
            SectorMode::Sector => SweepFrame::sector(sector.sweep_range),
            SectorMode::FullCircle => SweepFrame::full_circle(),
        };
        debug!(
            ?frame,
            wrap = sector.wrap,
            hit_detection = sector.hit_detection.name(),
            targets = targets.len(),
            "Creating sweep animator"
        );

        Self {
            frame,
            wrap: sector.wrap,
            hit_detection: sector.hit_detection,
            targets,
            style,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            state: SweepState::default(),
            trail: TrailHistory::new(),
        }
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Render the current state, then step it. This is the per-tick entry point.
    pub fn tick(&mut self, viewport: Viewport) -> FrameOutput {
        let commands = self.render(viewport);
        self.advance();
        FrameOutput {
            commands,
            next_frame: self.frame_interval,
        }
    }

    /// Draw commands for the current state. Does not mutate anything.
    pub fn render(&self, viewport: Viewport) -> Vec<DrawCommand> {
        let center = viewport.center();
        let radius = viewport.effective_radius();
        let mut commands = Vec::with_capacity(self.style.ring_count + MAX_TRAIL + self.targets.len() + 8);

        self.render_grid(&mut commands, center, radius);
        self.render_sweep(&mut commands, center, radius);
        self.render_center(&mut commands, center);
        self.render_targets(&mut commands, center);

        commands
    }

    /// Commit the rendered frame to the trail and move the sweep one step.
    pub fn advance(&mut self) {
        self.trail.record(self.state.angle);
        self.state.advance(self.frame.limit(), self.wrap);
    }

    /// Forget all progress and start again from angle 0.
    pub fn reset(&mut self) {
        self.state = SweepState::default();
        self.trail = TrailHistory::new();
    }

    pub fn set_palette(&mut self, palette: RadarPalette) {
        self.style.palette = palette;
    }

    #[cfg(test)]
    pub fn sweep_angle(&self) -> f32 {
        self.state.angle
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Angle the sweep line is drawn at.
    pub fn absolute_angle(&self) -> f32 {
        self.frame.absolute(self.state.angle)
    }

    pub fn sweep_frame(&self) -> SweepFrame {
        self.frame
    }

    pub fn trail(&self) -> &TrailHistory {
        &self.trail
    }

    pub fn targets(&self) -> &[TargetPoint] {
        &self.targets
    }

    pub fn is_visible(&self, target: &TargetPoint) -> bool {
        self.frame.contains(target.angle)
    }

    pub fn is_hit(&self, target: &TargetPoint) -> bool {
        self.hit_detection.is_hit(self.absolute_angle(), target.angle)
    }

    /// Targets currently drawn with a glow.
    pub fn lit_targets(&self) -> impl Iterator<Item = &TargetPoint> + '_ {
        self.targets
            .iter()
            .filter(|t| self.is_visible(t) && self.is_hit(t))
    }

    fn render_grid(&self, commands: &mut Vec<DrawCommand>, center: Point, radius: f32) {
        let ring = self.style.palette.ring;
        let width = self.style.ring_width;

        for r in ring_radii(radius, self.style.ring_count) {
            commands.push(DrawCommand::stroke_circle(center, r, ring, width));
        }

        match self.frame {
            SweepFrame::Sector {
                sweep_range,
                start_angle,
            } => {
                // Emitted even for a full 360° sector, where both rays coincide.
                for angle in [start_angle, start_angle + sweep_range] {
                    let end = polar_to_cartesian(center, radius, angle);
                    commands.push(DrawCommand::line(center, end, ring, width, u8::MAX));
                }
            }
            SweepFrame::FullCircle => {
                let (top, bottom) = (
                    Point::new(center.x, center.y - radius),
                    Point::new(center.x, center.y + radius),
                );
                let (left, right) = (
                    Point::new(center.x - radius, center.y),
                    Point::new(center.x + radius, center.y),
                );
                commands.push(DrawCommand::line(top, bottom, ring, width, u8::MAX));
                commands.push(DrawCommand::line(left, right, ring, width, u8::MAX));
            }
        }
    }

    fn render_sweep(&self, commands: &mut Vec<DrawCommand>, center: Point, radius: f32) {
        let color = self.style.palette.sweep;
        let width = self.style.sweep_width;

        let end = polar_to_cartesian(center, radius, self.absolute_angle());
        commands.push(DrawCommand::line(center, end, color, width, u8::MAX));

        for (idx, angle) in self.trail.preview(self.state.angle).enumerate() {
            let end = polar_to_cartesian(center, radius, self.frame.absolute(angle));
            commands.push(DrawCommand::line(center, end, color, width, trail_alpha(idx)));
        }
    }

    fn render_center(&self, commands: &mut Vec<DrawCommand>, center: Point) {
        let palette = &self.style.palette;
        commands.push(DrawCommand::fill_circle(
            center,
            CENTER_GLOW_RADIUS,
            palette.glow,
            Some(self.style.glow_blur),
        ));
        commands.push(DrawCommand::fill_circle(center, CENTER_DOT_RADIUS, palette.center, None));
    }

    fn render_targets(&self, commands: &mut Vec<DrawCommand>, center: Point) {
        let palette = &self.style.palette;

        for target in self.targets.iter().filter(|t| self.is_visible(t)) {
            let pos = polar_to_cartesian(center, target.radius, target.angle);
            if self.is_hit(target) {
                commands.push(DrawCommand::fill_circle(
                    pos,
                    HIT_MARKER_RADIUS,
                    palette.glow,
                    Some(self.style.glow_blur),
                ));
            } else {
                commands.push(DrawCommand::fill_circle(pos, POINT_RADIUS, palette.point, None));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn animator(mode: SectorMode, sweep_range: f32, wrap: bool, targets: Vec<TargetPoint>) -> SweepAnimator {
        let config = Config::default();
        let sector = SectorConfig {
            mode,
            sweep_range,
            wrap,
            hit_detection: HitDetection::Absolute,
        };
        SweepAnimator::new(&sector, RadarStyle::from(&config.style), targets)
    }

    fn sector(sweep_range: f32) -> SweepAnimator {
        animator(SectorMode::Sector, sweep_range, false, default_targets())
    }

    fn lines(commands: &[DrawCommand]) -> Vec<(Point, Point, u8)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, alpha, .. } => Some((*from, *to, *alpha)),
                _ => None,
            })
            .collect()
    }

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn first_frame_layout() {
        let animator = sector(360.0);
        let commands = animator.render(VIEW);

        // 5 rings, 2 rays, sweep, 2 trail lines, glow + dot, 3 visible targets
        assert_eq!(commands.len(), 15);
        for (i, c) in commands.iter().take(5).enumerate() {
            match c {
                DrawCommand::Circle { radius, style, .. } => {
                    assert_eq!(*style, CircleStyle::Stroke);
                    assert!((radius - 284.0 * (i + 1) as f32 / 5.0).abs() < 1e-3);
                }
                other => panic!("expected ring, got {:?}", other),
            }
        }
    }

    #[test]
    fn boundary_rays_are_always_emitted() {
        let commands = sector(360.0).render(VIEW);
        let rays = lines(&commands);
        // Both rays point at 180°/-180° and overlap.
        assert!((rays[0].1.x - rays[1].1.x).abs() < 1e-2);
        assert!((rays[0].1.x - (400.0 - 284.0)).abs() < 1e-2);

        let commands = sector(90.0).render(VIEW);
        let rays = lines(&commands);
        assert!(rays[0].1.y < 300.0, "start ray points up-right");
        assert!(rays[1].1.y > 300.0, "end ray points down-right");
    }

    #[test]
    fn full_circle_uses_crosshair() {
        let animator = animator(SectorMode::FullCircle, 90.0, false, default_targets());
        let commands = animator.render(VIEW);
        let grid = lines(&commands);
        assert_eq!(grid[0].0, Point::new(400.0, 16.0));
        assert_eq!(grid[0].1, Point::new(400.0, 584.0));
        assert_eq!(grid[1].0, Point::new(116.0, 300.0));
        assert_eq!(grid[1].1, Point::new(684.0, 300.0));
        // No sector filtering: all four sample targets are drawn.
        assert_eq!(commands.len(), 5 + 2 + 1 + 2 + 2 + 4);
    }

    #[test]
    fn full_circle_ignores_configured_range() {
        let mut animator = animator(SectorMode::FullCircle, 90.0, false, vec![]);
        for _ in 0..100 {
            animator.advance();
        }
        assert_eq!(animator.sweep_angle(), 200.0);
        assert_eq!(animator.absolute_angle(), 200.0);
    }

    #[test]
    fn trail_fades_per_entry() {
        let mut animator = sector(360.0);
        for _ in 0..20 {
            animator.advance();
        }
        let commands = animator.render(VIEW);
        let trail: Vec<u8> = lines(&commands)[3..].iter().map(|l| l.2).collect();
        assert_eq!(trail.len(), MAX_TRAIL);
        assert_eq!(trail[0], 255);
        assert!(trail.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn sweep_and_trail_end_on_sector_angles() {
        let mut animator = sector(90.0);
        for _ in 0..10 {
            animator.advance();
        }
        let center = VIEW.center();
        let radius = VIEW.effective_radius();
        let close = |a: Point, b: Point| (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3;

        let commands = animator.render(VIEW);
        let rendered = lines(&commands);
        let sweep = polar_to_cartesian(center, radius, -45.0 + 20.0);
        assert!(close(rendered[2].1, sweep), "{:?} vs {:?}", rendered[2].1, sweep);

        // Ten recorded frames plus the previewed pair: 20, 19, 18 .. -1
        let trail = &rendered[3..];
        assert_eq!(trail.len(), 22);
        for (idx, line) in trail.iter().enumerate() {
            let expected = polar_to_cartesian(center, radius, -45.0 + 20.0 - idx as f32);
            assert_eq!(line.0, center);
            assert!(close(line.1, expected), "entry {}: {:?} vs {:?}", idx, line.1, expected);
        }
    }

    #[test]
    fn trail_counts_after_ticks() {
        let mut animator = sector(360.0);
        animator.tick(VIEW);
        assert_eq!(animator.trail().len(), 2);
        for _ in 0..14 {
            animator.tick(VIEW);
        }
        assert_eq!(animator.trail().len(), MAX_TRAIL);
        for _ in 0..100 {
            animator.tick(VIEW);
            assert_eq!(animator.trail().len(), MAX_TRAIL);
        }
    }

    #[test]
    fn hit_at_absolute_zero() {
        let targets = vec![
            TargetPoint::new(100.0, 0.0),
            TargetPoint::new(100.0, 358.0),
            TargetPoint::new(100.0, 10.0),
        ];
        let mut animator = animator(SectorMode::Sector, 360.0, false, targets.clone());
        for _ in 0..90 {
            animator.advance();
        }
        assert_eq!(animator.sweep_angle(), 180.0);
        assert_eq!(animator.absolute_angle(), 0.0);

        assert!(animator.is_hit(&targets[0]));
        assert!(animator.is_hit(&targets[1]));
        assert!(!animator.is_hit(&targets[2]));

        // 358 lies outside the -180..180 sector, so only the 0° target glows.
        assert!(!animator.is_visible(&targets[1]));
        let lit: Vec<_> = animator.lit_targets().collect();
        assert_eq!(lit, vec![&targets[0]]);

        let commands = animator.render(VIEW);
        let markers: Vec<_> = commands.iter().rev().take(2).collect();
        assert!(!markers[0].is_glow(), "10° target is a plain point");
        assert!(markers[1].is_glow(), "0° target glows");
    }

    #[test]
    fn out_of_range_target_never_drawn() {
        let target = TargetPoint::new(50.0, 400.0);
        let mut animator = animator(SectorMode::Sector, 360.0, false, vec![target]);
        let baseline = 5 + 2 + 1 + 2;
        for _ in 0..400 {
            let frame = animator.tick(VIEW);
            assert!(!animator.is_visible(&target));
            assert!(frame.commands.len() <= baseline + MAX_TRAIL);
            assert!(frame.commands.iter().all(|c| !matches!(c,
                DrawCommand::Circle { radius, .. } if *radius == POINT_RADIUS || *radius == HIT_MARKER_RADIUS)));
        }
    }

    #[test]
    fn bounce_mode_stays_in_sector() {
        let mut animator = animator(SectorMode::Sector, 60.0, true, default_targets());
        let mut flips = 0;
        let mut last = animator.direction();
        for _ in 0..200 {
            animator.tick(VIEW);
            assert!((0.0..=60.0).contains(&animator.sweep_angle()));
            if animator.direction() != last {
                flips += 1;
                last = animator.direction();
            }
        }
        assert!(flips >= 6);
    }

    #[test]
    fn identical_runs_are_identical() {
        let sizes = [VIEW, Viewport::new(320.0, 240.0), Viewport::new(0.0, 0.0)];
        let mut a = animator(SectorMode::Sector, 120.0, true, default_targets());
        let mut b = animator(SectorMode::Sector, 120.0, true, default_targets());
        for n in 0..300 {
            let vp = sizes[n % sizes.len()];
            assert_eq!(a.tick(vp), b.tick(vp));
        }
    }

    #[test]
    fn zero_viewport_is_harmless() {
        let mut animator = sector(360.0);
        for _ in 0..50 {
            let frame = animator.tick(Viewport::new(0.0, 0.0));
            for c in &frame.commands {
                match c {
                    DrawCommand::Circle { radius, .. } => assert!(*radius >= 0.0),
                    DrawCommand::Line { from, to, .. } => assert!(from.distance(*to) >= 0.0),
                }
            }
        }
        let frame = animator.tick(Viewport::new(-10.0, -10.0));
        assert!(frame.commands.iter().all(|c| match c {
            DrawCommand::Circle { radius, .. } => *radius >= 0.0,
            DrawCommand::Line { from, to, .. } => from.distance(*to) == 0.0,
        }));
    }

    #[test]
    fn tick_reports_frame_interval() {
        let mut animator = sector(360.0);
        assert_eq!(animator.tick(VIEW).next_frame, DEFAULT_FRAME_INTERVAL);

        let mut animator = animator.with_frame_interval(Duration::from_millis(33));
        assert_eq!(animator.tick(VIEW).next_frame, Duration::from_millis(33));
    }

    #[test]
    fn reset_returns_to_start() {
        let mut animator = sector(360.0);
        for _ in 0..10 {
            animator.tick(VIEW);
        }
        animator.reset();
        assert_eq!(animator.sweep_angle(), 0.0);
        assert!(animator.trail().is_empty());
    }
}
