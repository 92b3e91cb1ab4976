use anyhow::{Context, Result};
use clap::Parser;

use colorcube::{AnimationConfig, AppConfig, LoggingConfig, init_logging};

/// A spinning six-colored cube. Press A to grow it and D to shrink it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Window title
    #[arg(long, default_value = "Colorcube")]
    title: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 600)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Radians the cube turns each frame
    #[arg(long, default_value_t = 0.01, value_parser = parse_finite)]
    angle_step: f32,

    /// Starting scale (at least 0.1)
    #[arg(long, default_value_t = 1.5)]
    scale: f32,

    /// Let the spin angle grow without folding it back into [0, 2π)
    #[arg(long)]
    no_wrap: bool,

    /// Log filter in env_logger syntax, e.g. "colorcube=debug"
    #[arg(long)]
    log: Option<String>,
}

fn parse_finite(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("`{s}` must be a finite number"))
    }
}

impl Args {
    fn app_config(&self) -> AppConfig {
        AppConfig::new()
            .title(self.title.clone())
            .size(self.width, self.height)
            .animation(
                AnimationConfig::new()
                    .angle_step(self.angle_step)
                    .initial_scale(self.scale)
                    .wrap_angle(!self.no_wrap),
            )
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let config = args.app_config();
    log::debug!("starting with {:?}", config);

    colorcube::run(config).context("colorcube stopped with an error")
}
