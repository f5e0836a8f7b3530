use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{info, warn};

use elastic_refresh_core::layer::LayerKind;
use elastic_refresh_core::{
    AppConfig, Bounds, DriverHandle, HostEvent, Phase, PullState, RefreshDriver, RefreshEffect,
    Scene,
};

/// Timeline of the simulated host
pub struct Plan {
    pub width: f64,
    pub height: f64,
    pub pull_ms: u64,
    pub pull_to: f64,
    pub refresh_ms: u64,
    pub every_ms: u64,
}

/// Drag step of the simulated finger
const DRAG_STEP: Duration = Duration::from_millis(16);

pub async fn run(config: AppConfig, plan: Plan) -> Result<()> {
    let threshold = config.effect.threshold.get();
    let (driver, handle, scenes) = RefreshDriver::new(RefreshEffect::new(&config));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let driver_task = tokio::spawn(driver.run(shutdown_rx));
    let printer_task = tokio::spawn(print_scenes(scenes, Duration::from_millis(plan.every_ms)));

    tokio::select! {
        result = play(&handle, &plan, threshold) => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, ending refresh");
            handle.send(HostEvent::RefreshEnded)?;
        }
    }

    let _ = shutdown_tx.send(true);
    let effect = driver_task.await?;
    // The driver dropped its scene sender; the printer flushes and exits
    printer_task.await?;

    info!(
        "Simulation finished: phase={:?} clock={:.3}s",
        effect.phase(),
        effect.clock().as_secs_f64()
    );
    Ok(())
}

/// Walk the host through drag, trigger, refresh and end
async fn play(handle: &DriverHandle, plan: &Plan, threshold: f64) -> Result<()> {
    handle.send(HostEvent::Resized(Bounds::from_size(plan.width, plan.height)))?;
    handle.send(HostEvent::PullState(PullState::Pulling))?;

    info!("Dragging to {:.2} over {}ms", plan.pull_to, plan.pull_ms);
    let pull = Duration::from_millis(plan.pull_ms);
    let start = Instant::now();
    let mut ticker = tokio::time::interval(DRAG_STEP);
    loop {
        ticker.tick().await;
        let t = if pull.is_zero() {
            1.0
        } else {
            (start.elapsed().as_secs_f64() / pull.as_secs_f64()).min(1.0)
        };
        handle.send(HostEvent::PullProgress(plan.pull_to * t))?;
        if t >= 1.0 {
            break;
        }
    }

    if plan.pull_to < threshold {
        info!("Released below threshold {:.2}, no refresh", threshold);
        handle.send(HostEvent::PullProgress(0.0))?;
        handle.send(HostEvent::PullState(PullState::Idle))?;
        return Ok(());
    }

    handle.send(HostEvent::PullState(PullState::Triggered))?;
    handle.send(HostEvent::RefreshStarted)?;
    handle.send(HostEvent::PullState(PullState::Refreshing))?;
    info!("Refreshing for {}ms", plan.refresh_ms);
    tokio::time::sleep(Duration::from_millis(plan.refresh_ms)).await;

    handle.send(HostEvent::PullState(PullState::Finishing))?;
    handle.send(HostEvent::RefreshEnded)?;
    handle.send(HostEvent::PullState(PullState::Idle))?;
    info!("Refresh ended");

    // Give the driver a moment to publish the torn-down scene
    tokio::time::sleep(DRAG_STEP).await;
    Ok(())
}

async fn print_scenes(scenes: watch::Receiver<Scene>, every: Duration) {
    follow_scenes(scenes, every, |scene| println!("{}", scene.summary())).await;
}

/// Mounted layers and timer state; a change here is always shown
#[derive(Debug, PartialEq)]
struct Milestone {
    phase: Phase,
    timer_active: bool,
    layers: Vec<LayerKind>,
}

impl Milestone {
    fn of(scene: &Scene) -> Self {
        Self {
            phase: scene.phase,
            timer_active: scene.timer_active,
            layers: scene.layers().map(|l| l.kind).collect(),
        }
    }
}

/// Emit scenes at most once per `every`, except milestones which are
/// emitted as soon as they are published. The last scene is flushed once
/// the driver drops its sender.
async fn follow_scenes<F>(mut scenes: watch::Receiver<Scene>, every: Duration, mut emit: F)
where
    F: FnMut(&Scene),
{
    let mut last_print: Option<Instant> = None;
    let mut last_milestone: Option<Milestone> = None;
    let mut held: Option<Scene> = None;

    while scenes.changed().await.is_ok() {
        let scene = scenes.borrow_and_update().clone();
        let milestone = Milestone::of(&scene);
        let due = last_print.map_or(true, |at| at.elapsed() >= every);
        if due || last_milestone.as_ref() != Some(&milestone) {
            emit(&scene);
            last_print = Some(Instant::now());
            last_milestone = Some(milestone);
            held = None;
        } else {
            held = Some(scene);
        }
    }

    if let Some(scene) = held {
        emit(&scene);
    }
}
