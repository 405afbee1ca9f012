use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use tracing::info;

use crate::config::Config;
use crate::radar::{Direction, RadarStyle, SweepAnimator, Viewport};
use crate::renderer::{render_frame, Canvas};

/// Largest canvas a headless run will allocate (4096 x 4096).
const MAX_CANVAS_PIXELS: usize = 4096 * 4096;

/// Fixed-size run without a terminal.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessOptions {
    pub frames: u64,
    pub viewport: Viewport,
}

pub async fn run(config: Config, options: HeadlessOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_frames(&config, options, &mut out)?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}

/// Tick `options.frames` frames and write one summary line per frame.
pub fn run_frames<W: Write>(config: &Config, options: HeadlessOptions, out: &mut W) -> Result<()> {
    let mut animator = SweepAnimator::new(
        &config.sector,
        RadarStyle::from(&config.style),
        config.targets.clone(),
    )
    .with_frame_interval(config.display.frame_interval());

    let units = config.display.units_per_pixel;
    let background = config.style.palette().background;
    let mut canvas = canvas_for(options.viewport, units)?;

    info!(
        "Headless run: {} frames at {}x{}",
        options.frames, options.viewport.width, options.viewport.height
    );

    for index in 0..options.frames {
        // Summarise the state being drawn, before the tick advances it.
        let angle = animator.absolute_angle();
        let direction = match animator.direction() {
            Direction::Forward => '+',
            Direction::Backward => '-',
        };
        let lit: Vec<String> = animator
            .lit_targets()
            .map(|t| format!("{}@{}", t.radius, t.angle))
            .collect();

        let output = animator.tick(options.viewport);
        render_frame(&mut canvas, &output.commands, background, units);
        let pixels = canvas.data[..canvas.width * canvas.height]
            .iter()
            .filter(|p| **p != background)
            .count();

        writeln!(
            out,
            "frame={} angle={:.1} dir={} trail={} commands={} glows={} pixels={} hits=[{}]",
            index,
            angle,
            direction,
            animator.trail().len(),
            output.commands.len(),
            output.commands.iter().filter(|c| c.is_glow()).count(),
            pixels,
            lit.join(",")
        )
        .context("Failed to write frame summary")?;
    }

    Ok(())
}

fn canvas_for(viewport: Viewport, units_per_pixel: f32) -> Result<Canvas> {
    if !viewport.width.is_finite() || !viewport.height.is_finite() {
        bail!(
            "Viewport must be finite, got {}x{}",
            viewport.width,
            viewport.height
        );
    }
    let width = (viewport.width.max(0.0) / units_per_pixel) as usize;
    let height = (viewport.height.max(0.0) / units_per_pixel) as usize;
    match width.checked_mul(height) {
        Some(pixels) if pixels <= MAX_CANVAS_PIXELS => Ok(Canvas::new(width, height)),
        _ => bail!(
            "Viewport {}x{} needs a {}x{} canvas, more than {} pixels",
            viewport.width,
            viewport.height,
            width,
            height,
            MAX_CANVAS_PIXELS
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(config: &Config, frames: u64) -> String {
        let mut out = Vec::new();
        let options = HeadlessOptions {
            frames,
            viewport: Viewport::new(400.0, 400.0),
        };
        run_frames(config, options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn one_line_per_frame() {
        let text = capture(&Config::default(), 12);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("frame=0 angle=-180.0 dir=+ trail=2 commands=15"));
        assert!(lines[11].contains("trail=24"));
    }

    #[test]
    fn runs_are_reproducible() {
        let mut config = Config::default();
        config.sector.sweep_range = 90.0;
        config.sector.wrap = true;
        assert_eq!(capture(&config, 120), capture(&config, 120));
    }

    #[test]
    fn contact_lights_up_when_swept() {
        // Sweep reaches absolute 0° after 90 ticks.
        let text = capture(&Config::default(), 91);
        let last = text.lines().last().unwrap();
        assert!(last.contains("angle=0.0"), "{}", last);
        assert!(last.contains("hits=[100@0]"), "{}", last);
    }

    #[test]
    fn empty_viewport_still_reports() {
        let mut out = Vec::new();
        let options = HeadlessOptions {
            frames: 3,
            viewport: Viewport::new(0.0, 0.0),
        };
        run_frames(&Config::default(), options, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().all(|l| l.contains("pixels=0")));
    }

    #[test]
    fn unusable_viewports_are_rejected() {
        let config = Config::default();
        for viewport in [
            Viewport::new(f32::INFINITY, 600.0),
            Viewport::new(800.0, f32::NAN),
            Viewport::new(1.0e9, 1.0e9),
        ] {
            let mut out = Vec::new();
            let options = HeadlessOptions { frames: 1, viewport };
            assert!(run_frames(&config, options, &mut out).is_err(), "{:?}", viewport);
            assert!(out.is_empty());
        }
    }
}
