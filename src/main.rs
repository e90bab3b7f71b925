//! Greedy Gardens
//!
//! # Usage
//!
//! ```bash
//! greedy-gardens
//! greedy-gardens --skip-bootup
//! greedy-gardens --fps 30 --scale 0.5
//! greedy-gardens --assets path/to/assets --no-sound
//! ```
//!
//! Log output follows `RUST_LOG`, e.g. `RUST_LOG=menu=debug,tween=trace`.

use std::path::PathBuf;

use clap::Parser;

use greedy_gardens::game::{menu_bootstrap, menu_startup};
use greedy_gardens::EngineBuilder;

#[derive(Parser)]
#[command(name = "greedy-gardens")]
#[command(author, version, about = "Greedy Gardens")]
struct Args {
    /// Jump straight to the title, skipping the intro cinematic
    #[arg(long)]
    skip_bootup: bool,

    /// Frame cap (core ticks per second)
    #[arg(long, default_value = "60", value_parser = parse_fps)]
    fps: f64,

    /// Directory holding graphics/, menu_bg/, music/ and sfx/
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Start in borderless fullscreen
    #[arg(long, short = 'f')]
    fullscreen: bool,

    /// Window size relative to the 1280x720 canvas
    #[arg(long, short = 's', default_value = "1.0")]
    scale: f32,

    /// Run without opening an audio device
    #[arg(long)]
    no_sound: bool,
}

const CANVAS: (u32, u32) = (1280, 720);

fn parse_fps(s: &str) -> Result<f64, String> {
    let fps: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(format!("must be a positive number of frames per second, got {s}"))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let scale = args.scale.max(0.1);
    let window = (
        ((CANVAS.0 as f32 * scale) as u32).max(1),
        ((CANVAS.1 as f32 * scale) as u32).max(1),
    );

    EngineBuilder::new()
        .with_tps(args.fps)
        .with_canvas_size(CANVAS.0, CANVAS.1)
        .with_window_size(window.0, window.1)
        .with_fullscreen(args.fullscreen)
        .with_skip_bootup(args.skip_bootup)
        .with_asset_root(args.assets)
        .with_sound(!args.no_sound)
        .with_startup(menu_startup)
        .build()
        .run(menu_bootstrap);
}
