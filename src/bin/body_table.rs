use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use solar_orrery::file::{read_file, BodyTable};
use solar_orrery::model::{SatelliteTarget, SolarSystem};

/// Prints the body table and where every body ends up after a run.
#[derive(Debug, Parser)]
struct Args {
    /// Only show the body with this name
    name: Option<String>,
    /// Body table to load instead of the built-in one
    #[arg(long)]
    bodies: Option<PathBuf>,
    #[arg(long, default_value = "Earth")]
    reference: String,
    /// Simulated seconds to run before printing positions
    #[arg(long, default_value_t = 0.0)]
    seconds: f64,
    /// Length of one simulated frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    step: f64,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
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

    let frames = system.run_for(args.seconds, args.step)?;

    for body in system.bodies() {
        if let Some(name) = &args.name {
            if body.info.name.to_lowercase() != name.to_lowercase() {
                continue;
            }
        }

        let info = &body.info;
        let orbiting = match body.target {
            SatelliteTarget::Origin => String::from("origin"),
            SatelliteTarget::Body(id) => system.get_body(id).info.name.clone(),
        };
        let position = body.position();

        println!("{} ({:?})", info.name, info.kind);
        println!("- Orbiting: {}", orbiting);
        println!("- Orbital rate: {}", info.orbital_rate);
        println!("- Rotational rate: {}", info.rotational_rate);
        println!("- Orbital distance: {}", info.orbital_distance);
        println!("- Axial tilt: {:.2} rad", info.axial_tilt);
        println!("- Scale: {}", info.scale);
        if frames > 0 {
            println!(
                "- After {} s: rotation {:.4}, orbit angle {:.4}, position ({:.3}, {:.3}, {:.3})",
                args.seconds,
                body.state.rotation,
                body.state.orbit_angle,
                position.x,
                position.y,
                position.z
            );
        }
        println!();
    }
    Ok(())
}
