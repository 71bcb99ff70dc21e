use std::path::PathBuf;

use clap::Parser;

use orrery_nav::error::NavError;
use orrery_nav::file::{default_registry, read_file};
use orrery_nav::model::Body;

#[derive(Debug, Parser)]
struct Args {
    /// Only print this body (matched by display name, ignoring case).
    name: Option<String>,
    /// Body table to read instead of the built-in solar system.
    #[arg(long)]
    bodies: Option<PathBuf>,
}

fn print_body(body: &Body) {
    let rate = body.info.angular_rate;
    println!("Characteristics for {} ({})", body.name(), body.key);
    println!("- Radius: {}", body.radius());
    println!("- Orbit radius: {}", body.orbit_radius());
    println!("- Angular rate: {} rad/frame", rate);
    if rate != 0.0 {
        let frames = std::f32::consts::TAU / rate.abs();
        println!("- Frames per revolution: {:.0}", frames);
        println!("- Seconds per revolution at 60 fps: {:.1}", frames / 60.0);
    } else {
        println!("- Frames per revolution: never");
    }
    if let Some(ring) = &body.info.ring {
        println!(
            "- Ring: {} to {}{}",
            ring.inner,
            ring.outer,
            if ring.tilted { " (tilted)" } else { "" }
        );
    }
    println!();
}

fn main() -> Result<(), NavError> {
    env_logger::init();
    let args = Args::parse();

    let registry = match &args.bodies {
        Some(path) => read_file(path)?,
        None => default_registry()?,
    };

    match &args.name {
        Some(name) => {
            let body = registry
                .find_by_name(name)
                .ok_or_else(|| NavError::NotFound(name.clone()))?;
            print_body(body);
        }
        None => registry.bodies().for_each(print_body),
    }
    Ok(())
}
