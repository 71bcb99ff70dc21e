use std::path::PathBuf;

use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;

use orrery_nav::error::NavError;
use orrery_nav::file::{default_registry, read_file};
use orrery_nav::gui::Simulation;
use orrery_nav::navigation::ViewMode;
use orrery_nav::options::Options;

#[derive(Debug, Parser)]
#[command(about = "Interactive solar system diagram")]
struct Args {
    /// Body table to load instead of the built-in solar system.
    #[arg(long)]
    bodies: Option<PathBuf>,
    /// TOML file with camera, animation and interface options.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Start looking straight down at the orbital plane.
    #[arg(long)]
    top_down: bool,
    /// Start with the orbits paused.
    #[arg(long)]
    paused: bool,
    /// Initial speed factor.
    #[arg(long)]
    speed: Option<f32>,
}

fn main() -> Result<(), NavError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if args.top_down {
        options.interface.initial_view = ViewMode::TopDown;
    }
    if args.paused {
        options.animation.running = false;
    }
    if let Some(speed) = args.speed {
        options.animation.speed_factor = speed;
    }

    let registry = match &args.bodies {
        Some(path) => read_file(path)?,
        None => default_registry()?,
    };

    let mut window = Window::new("Orrery");
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(60));

    let simulation = Simulation::new(registry, &options, &mut window);
    window.render_loop(simulation);
    Ok(())
}
