use anyhow::Result;

use elastic_refresh_core::{AppConfig, Bounds, RefreshEffect};

use crate::OutputFormat;

/// What to draw
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub progress: f64,
    pub threshold: Option<f64>,
    pub refreshing: bool,
    pub ticks: u32,
}

pub fn run(config: &AppConfig, frame: Frame, format: OutputFormat) -> Result<()> {
    let mut effect = RefreshEffect::new(config);
    effect.set_bounds(Bounds::from_size(frame.width, frame.height));
    if let Some(threshold) = frame.threshold {
        effect.set_threshold(threshold);
    }

    effect.on_pull_progress_changed(frame.progress);

    if frame.refreshing {
        effect.on_refresh_animation_start();
        // Let the bounce settle and the timer start, then run the requested ticks
        effect.advance(effect.config().timer_delay());
        let interval = effect.tick_interval();
        for _ in 0..frame.ticks {
            effect.advance(interval);
        }
    }

    let scene = effect.scene();
    match format {
        OutputFormat::Svg => print!("{}", scene.to_svg()),
        OutputFormat::Json => println!("{}", scene.to_json()?),
    }

    Ok(())
}
