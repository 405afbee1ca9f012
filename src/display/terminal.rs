use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::color::{ColorScheme, RgbColor};
use crate::config::Config;
use crate::radar::{DrawCommand, RadarStyle, SweepAnimator, Viewport};
use crate::renderer::{render_frame, Canvas};

/// Upper half block: foreground paints the top pixel, background the bottom one.
const HALF_BLOCK: char = '▀';

pub async fn run(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config, config_path).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Host-side state that is not part of the animation.
struct HostState {
    color_scheme: ColorScheme,
    paused: bool,
    frames: u64,
}

/// What one frame puts on screen.
struct FrameView {
    commands: Vec<DrawCommand>,
    /// Status text describing the same state as `commands`
    status: String,
    lit: bool,
    /// `None` while paused
    next_frame: Option<Duration>,
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut animator = new_animator(&config);
    let mut canvas = Canvas::new(0, 0);
    let mut host = HostState {
        color_scheme: config.style.color_scheme,
        paused: false,
        frames: 0,
    };
    let units_per_pixel = config.display.units_per_pixel;
    let mut next_frame = config.display.frame_interval();

    info!(
        "Terminal radar running: {:?}, wrap={}",
        animator.sweep_frame(),
        config.sector.wrap
    );

    loop {
        let background = config.style.palette_for(host.color_scheme).background;

        terminal.draw(|frame| {
            let area = frame.area();
            if area.height < 2 {
                return;
            }
            let radar_area = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
            canvas.resize(radar_area.width as usize, radar_area.height as usize * 2);

            let view = next_view(&mut animator, &mut host, canvas.viewport(units_per_pixel));
            if let Some(delay) = view.next_frame {
                next_frame = delay;
            }

            render_frame(&mut canvas, &view.commands, background, units_per_pixel);
            blit_half_blocks(frame, radar_area, &canvas);
            render_status(frame, area, &view);
        })?;

        // Wait for input until the next frame is due
        if event::poll(next_frame)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key {
                    KeyEvent {
                        code: KeyCode::Char('q'),
                        ..
                    }
                    | KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::CONTROL,
                        ..
                    }
                    | KeyEvent {
                        code: KeyCode::Esc, ..
                    } => {
                        break;
                    }
                    KeyEvent {
                        code: KeyCode::Char('C'),
                        ..
                    } => {
                        host.color_scheme = host.color_scheme.prev();
                        animator.set_palette(config.style.palette_for(host.color_scheme));
                        debug!("Color scheme: {}", host.color_scheme.name());
                    }
                    KeyEvent {
                        code: KeyCode::Char('c'),
                        ..
                    } => {
                        host.color_scheme = host.color_scheme.next();
                        animator.set_palette(config.style.palette_for(host.color_scheme));
                        debug!("Color scheme: {}", host.color_scheme.name());
                    }
                    KeyEvent {
                        code: KeyCode::Char(' '),
                        ..
                    } => {
                        host.paused = !host.paused;
                        debug!("Paused: {}", host.paused);
                    }
                    KeyEvent {
                        code: KeyCode::Char('r'),
                        ..
                    } => {
                        animator.reset();
                        debug!("Animator reset");
                    }
                    KeyEvent {
                        code: KeyCode::Char('s'),
                        ..
                    } => match &config_path {
                        Some(path) => match Config::save_color_scheme(path, host.color_scheme) {
                            Ok(()) => info!("Saved color scheme to {}", path.display()),
                            Err(e) => warn!("Failed to save color scheme: {}", e),
                        },
                        None => warn!("No config path to save to"),
                    },
                    _ => {}
                }
            }
        }
    }

    info!("Rendered {} frames", host.frames);
    Ok(())
}

/// Produce the next frame, ticking unless paused.
fn next_view(animator: &mut SweepAnimator, host: &mut HostState, viewport: Viewport) -> FrameView {
    // Describe the state being drawn before the tick moves it on.
    let status = status_line(animator, host);
    let lit = animator.lit_targets().next().is_some();

    if host.paused {
        FrameView {
            commands: animator.render(viewport),
            status,
            lit,
            next_frame: None,
        }
    } else {
        let output = animator.tick(viewport);
        host.frames += 1;
        FrameView {
            commands: output.commands,
            status,
            lit,
            next_frame: Some(output.next_frame),
        }
    }
}

fn new_animator(config: &Config) -> SweepAnimator {
    SweepAnimator::new(
        &config.sector,
        RadarStyle::from(&config.style),
        config.targets.clone(),
    )
    .with_frame_interval(config.display.frame_interval())
}

fn to_color(c: RgbColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Copy the canvas into the buffer, two pixel rows per cell.
fn blit_half_blocks(frame: &mut Frame, area: Rect, canvas: &Canvas) {
    let buffer = frame.buffer_mut();
    for row in 0..area.height {
        for col in 0..area.width {
            let top = canvas.get_pixel(col as usize, row as usize * 2);
            let bottom = canvas.get_pixel(col as usize, row as usize * 2 + 1);
            if let Some(cell) = buffer.cell_mut((area.x + col, area.y + row)) {
                cell.set_char(HALF_BLOCK);
                cell.set_fg(to_color(top));
                cell.set_bg(to_color(bottom));
            }
        }
    }
}

fn status_line(animator: &SweepAnimator, host: &HostState) -> String {
    format!(
        " sweep {:>6.1}° | contacts {}/{} | [c]olor: {} | [s]ave | [space] {} | [r]eset | [q]uit ",
        animator.absolute_angle(),
        animator.lit_targets().count(),
        animator.targets().len(),
        host.color_scheme.name(),
        if host.paused { "resume" } else { "pause" },
    )
}

fn render_status(frame: &mut Frame, area: Rect, view: &FrameView) {
    let fg = if view.lit { Color::Cyan } else { Color::DarkGray };
    for (i, ch) in view.status.chars().enumerate() {
        if i >= area.width as usize {
            break;
        }
        if let Some(cell) = frame.buffer_mut().cell_mut((area.x + i as u16, area.y)) {
            cell.set_char(ch);
            cell.set_fg(fg);
        }
    }
}
