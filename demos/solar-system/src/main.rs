/// Solar System: headless orrery run.
///
/// Steps the frame pipeline at a fixed wall-clock rate and logs body
/// positions, the calendar clock, and every eclipse as it starts.
/// Set RUST_LOG=debug for camera and speed changes.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use orrery::{presets, FrameSnapshot, InputEvent, Orrery, SystemConfig};

// ── Command line ─────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "solar-system")]
#[command(about = "Headless orrery: hierarchical orbits, eclipses, camera")]
struct Cli {
    /// Built-in system: "solar-system" or "sun-earth-moon"
    #[arg(short, long, default_value = "sun-earth-moon")]
    preset: String,

    /// Load the system from a JSON file instead of a preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value = "600")]
    frames: u32,

    /// Wall-clock seconds per frame
    #[arg(long, default_value = "0.016666668")]
    dt: f32,

    /// Log a position report every N frames (0 = only at the end)
    #[arg(long, default_value = "60")]
    report_every: u32,

    /// Press speed-up this many times before the run (negative = slow down)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    speed_steps: i32,

    /// Print the selected system as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(cli: &Cli) -> Result<SystemConfig> {
    if let Some(path) = &cli.config {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return SystemConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()));
    }
    match presets::by_name(&cli.preset) {
        Some(config) => Ok(config),
        None => bail!("unknown preset {:?} (try solar-system or sun-earth-moon)", cli.preset),
    }
}

// ── Reporting ────────────────────────────────────────────────────────

fn report(frame: u32, snap: &FrameSnapshot) {
    info!(
        "frame {frame}: {} | speed {:.2}x{} | zoom {:.2}",
        snap.clock,
        snap.speed,
        if snap.paused { " (paused)" } else { "" },
        snap.zoom,
    );
    for body in &snap.bodies {
        info!(
            "  {:<10} world ({:>8.2}, {:>8.2})  screen ({:>8.2}, {:>8.2})  {:?}",
            body.name, body.world_pos.x, body.world_pos.y, body.screen_pos.x, body.screen_pos.y, body.overlay,
        );
    }
}

/// Tracks which eclipses are in progress so each is logged once when it begins.
#[derive(Default)]
struct EclipseLog {
    lunar: HashSet<String>,
    solar: HashSet<String>,
    lunar_count: u32,
    solar_count: u32,
}

impl EclipseLog {
    fn observe(&mut self, snap: &FrameSnapshot) {
        let lunar: HashSet<String> = snap.eclipsed().map(str::to_owned).collect();
        let solar: HashSet<String> = snap.shadowed().map(str::to_owned).collect();

        for name in lunar.difference(&self.lunar) {
            self.lunar_count += 1;
            info!("{}: {name} enters its parent's shadow", snap.clock);
        }
        for name in solar.difference(&self.solar) {
            self.solar_count += 1;
            info!("{}: shadow falls on {name}", snap.clock);
        }

        self.lunar = lunar;
        self.solar = solar;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    if cli.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut sim = Orrery::new(config).context("building the system")?;
    info!("{} bodies, {} frames at dt {:.4}s", sim.tree().len(), cli.frames, cli.dt);

    for _ in 0..cli.speed_steps.unsigned_abs() {
        sim.push_input(if cli.speed_steps > 0 { InputEvent::SpeedUp } else { InputEvent::SpeedDown });
    }

    let mut eclipses = EclipseLog::default();
    let mut snap = sim.snapshot();
    for frame in 1..=cli.frames {
        snap = sim.tick(cli.dt);
        eclipses.observe(&snap);
        if cli.report_every > 0 && frame % cli.report_every == 0 {
            report(frame, &snap);
        }
    }

    report(cli.frames, &snap);
    info!(
        "done: {:.1} days simulated, {} eclipses in shadow cones, {} shadows cast",
        snap.elapsed_days, eclipses.lunar_count, eclipses.solar_count,
    );
    Ok(())
}
