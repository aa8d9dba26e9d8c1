use anyhow::{bail, Context};

use tiny_renderer::config::{Config, ConfigError};
use tiny_renderer::display::{self, PngDisplay, Unlimited};
use tiny_renderer::logging::{init_logging, LoggingConfig};
use tiny_renderer::window::{FrameLimiter, Window};
use tiny_renderer::{Engine, MeshStore};

fn main() -> anyhow::Result<()> {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::Help) => {
            println!("{}", ConfigError::Help);
            return Ok(());
        }
        Err(e) => bail!("{e}\n{}", tiny_renderer::config::USAGE),
    };

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });

    let mut store = MeshStore::new();
    for path in &config.meshes {
        store.load(path);
    }
    if store.is_empty() {
        bail!("none of the {} mesh files could be loaded", config.meshes.len());
    }
    log::info!(
        "{} meshes, {} faces in total",
        store.len(),
        store.face_count()
    );

    let mut engine = Engine::new(config.width, config.height);
    engine.set_render_mode(config.render_mode);
    engine.set_rasterizer(config.rasterizer);

    let frames = match &config.png {
        Some(path) => {
            let mut png = PngDisplay::new(path, config.frames);
            display::run(&mut png, &mut engine, &store, &mut Unlimited)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("writing '{}'", path.display()))?
        }
        None => {
            let mut window = Window::new(&config.title, config.width, config.height)
                .map_err(anyhow::Error::msg)
                .context("opening window")?;
            let mut limiter = FrameLimiter::new(&window, config.fps);
            display::run(&mut window, &mut engine, &store, &mut limiter)
                .map_err(anyhow::Error::msg)
                .context("presenting frame")?
        }
    };

    log::info!("presented {frames} frames");
    Ok(())
}
