use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod color;
mod config;
mod display;
mod radar;
mod renderer;

use color::ColorScheme;
use config::Config;
use display::headless::HeadlessOptions;
use display::DisplayMode;
use radar::{HitDetection, Viewport};

#[derive(Parser, Debug)]
#[command(name = "radarscope")]
#[command(author, version, about = "Animated radar sweep display")]
struct Args {
    /// Display mode: terminal or headless
    #[arg(short, long)]
    mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a commented default config to the XDG path and exit
    #[arg(long)]
    init_config: bool,

    /// Print the default config template and exit
    #[arg(long)]
    print_config: bool,

    /// Sector width in degrees (0 < range <= 360)
    #[arg(short, long)]
    sweep_range: Option<f32>,

    /// Bounce back and forth across the sector
    #[arg(short, long)]
    wrap: bool,

    /// Plain circle with a crosshair instead of a sector
    #[arg(long, conflicts_with = "sweep_range")]
    full_circle: bool,

    /// How sweep/target proximity is measured
    #[arg(long)]
    hit_detection: Option<HitDetection>,

    /// Color scheme
    #[arg(long)]
    colors: Option<ColorScheme>,

    /// Sweep and ring color override (hex, e.g. "#00ff00")
    #[arg(long)]
    sweep_color: Option<String>,

    /// Glow and contact color override (hex)
    #[arg(long)]
    accent_color: Option<String>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Radar units per canvas pixel in terminal mode
    #[arg(long)]
    units_per_pixel: Option<f32>,

    /// Frames to run in headless mode
    #[arg(long, default_value = "180")]
    frames: u64,

    /// Headless viewport width in radar units
    #[arg(long, default_value = "800")]
    width: f32,

    /// Headless viewport height in radar units
    #[arg(long, default_value = "600")]
    height: f32,
}

fn init_logging(mode: DisplayMode) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("radarscope=info".parse()?);

    match mode {
        // Anything written to the terminal would tear the alternate screen.
        DisplayMode::Terminal => {
            let dir = dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("radarscope");
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file = std::fs::File::create(dir.join("radarscope.log"))
                .context("Failed to create log file")?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        DisplayMode::Headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_config_template());
        return Ok(());
    }
    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args)?;

    init_logging(config.display.mode)?;
    info!("Starting radarscope in {:?} mode", config.display.mode);

    match config.display.mode {
        DisplayMode::Terminal => {
            let config_path = args.config.clone().or_else(Config::default_path);
            display::terminal::run(config, config_path).await?;
        }
        DisplayMode::Headless => {
            let options = HeadlessOptions {
                frames: args.frames,
                viewport: Viewport::new(args.width, args.height),
            };
            display::headless::run(config, options).await?;
        }
    }

    Ok(())
}
