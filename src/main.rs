use std::path::PathBuf;
use std::process;

use clap::Parser;
use kiss3d::window::Window;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use solar_orrery::file::{read_file, BodyTable};
use solar_orrery::gui::{FrameClock, Simulation};
use solar_orrery::model::{OrbitPaths, SolarSystem, DEFAULT_ORBIT_SEGMENTS};

/// Interactive orrery: nine planets, a moon and the sun, seen from above.
#[derive(Debug, Parser)]
struct Args {
    /// Body table to load instead of the built-in one
    #[arg(long)]
    bodies: Option<PathBuf>,
    /// Body whose rates every other body is scaled by
    #[arg(long, default_value = "Earth")]
    reference: String,
    /// Line segments per orbit circle
    #[arg(long, default_value_t = DEFAULT_ORBIT_SEGMENTS)]
    orbit_segments: usize,
    /// Simulated seconds per wall-clock second
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
    /// Start with the animation paused
    #[arg(long)]
    paused: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> solar_orrery::Result<()> {
    let table = match &args.bodies {
        Some(path) => read_file(path)?,
        None => BodyTable::builtin()?,
    };

    let mut system = SolarSystem::new(&table, &args.reference)?;
    if args.paused {
        system.animation_mut().set_enabled(false);
    }

    // Everything that can fail is done before a window exists
    let clock = FrameClock::new(args.time_scale)?;
    let orbit_paths = OrbitPaths::generate(system.bodies(), args.orbit_segments)?;
    info!(
        orbits = orbit_paths.paths().len(),
        segments = orbit_paths.segment_count(),
        "generated orbit paths"
    );

    let mut window = Window::new("Solar System");
    window.set_framerate_limit(Some(60));

    let simulation = Simulation::new(system, &orbit_paths, clock);
    window.render_loop(simulation);
    Ok(())
}
