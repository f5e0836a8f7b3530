use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::controller::{PullState, RefreshEffect};
use crate::geometry::Bounds;
use crate::scene::Scene;
use crate::theme::Backdrop;
use crate::{Error, Result};

/// Lifecycle callbacks and configuration changes from the host view
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// The host began its refresh animation
    RefreshStarted,
    /// The host finished refreshing
    RefreshEnded,
    /// Drag tick with the current pull progress
    PullProgress(f64),
    /// The host's pull state changed
    PullState(PullState),
    /// The view was laid out with new bounds
    Resized(Bounds),
    Threshold(f64),
    Backdrop(Backdrop),
}

/// Sending half handed to the host
#[derive(Debug, Clone)]
pub struct DriverHandle {
    tx: mpsc::UnboundedSender<HostEvent>,
}

impl DriverHandle {
    pub fn send(&self, event: HostEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| Error::ChannelClosed)
    }
}

/// Runs a [`RefreshEffect`] on a single task, ticking it in real time
pub struct RefreshDriver {
    effect: RefreshEffect,
    events: mpsc::UnboundedReceiver<HostEvent>,
    scenes: watch::Sender<Scene>,
}

impl RefreshDriver {
    /// Wrap `effect`, returning the driver, a handle for host events and a
    /// receiver that always holds the latest scene
    pub fn new(effect: RefreshEffect) -> (Self, DriverHandle, watch::Receiver<Scene>) {
        let (tx, events) = mpsc::unbounded_channel();
        let (scenes, scene_rx) = watch::channel(effect.scene());
        (
            Self {
                effect,
                events,
                scenes,
            },
            DriverHandle { tx },
            scene_rx,
        )
    }

    /// Process events and timer ticks until shutdown or until every handle
    /// is dropped
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> RefreshEffect {
        let interval = self.effect.tick_interval();
        info!("Refresh driver started: tick every {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first tick (fires immediately)
        ticker.tick().await;
        let mut last = Instant::now();

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Refresh driver received shutdown signal");
                        break;
                    }
                }

                event = self.events.recv() => {
                    let Some(event) = event else {
                        info!("All driver handles dropped, stopping");
                        break;
                    };
                    self.catch_up(&mut last);
                    self.apply(event);
                    if !self.publish() {
                        break;
                    }
                }

                _ = ticker.tick() => {
                    self.catch_up(&mut last);
                    if self.effect.is_animating() && !self.publish() {
                        break;
                    }
                }
            }
        }

        self.effect
    }

    fn catch_up(&mut self, last: &mut Instant) {
        let now = Instant::now();
        self.effect.advance(now - *last);
        *last = now;
    }

    fn apply(&mut self, event: HostEvent) {
        debug!("Host event: {:?}", event);
        match event {
            HostEvent::RefreshStarted => self.effect.on_refresh_animation_start(),
            HostEvent::RefreshEnded => self.effect.on_refresh_animation_end(),
            HostEvent::PullProgress(p) => self.effect.on_pull_progress_changed(p),
            HostEvent::PullState(s) => self.effect.on_pull_state_changed(s),
            HostEvent::Resized(bounds) => self.effect.set_bounds(bounds),
            HostEvent::Threshold(t) => self.effect.set_threshold(t),
            HostEvent::Backdrop(b) => self.effect.set_backdrop(b),
        }
    }

    /// Returns false once nobody is listening for scenes
    fn publish(&self) -> bool {
        if self.scenes.send(self.effect.scene()).is_err() {
            warn!("Scene receiver dropped, stopping refresh driver");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::controller::Phase;
    use std::time::Duration;

    fn driver() -> (RefreshDriver, DriverHandle, watch::Receiver<Scene>) {
        let mut config = AppConfig::default();
        config.effect.jitter_seed = Some(5);
        RefreshDriver::new(RefreshEffect::new(&config))
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_cycle_publishes_scenes() {
        let (driver, handle, scenes) = driver();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(driver.run(shutdown_rx));

        handle
            .send(HostEvent::Resized(Bounds::from_size(320.0, 100.0)))
            .unwrap();
        handle.send(HostEvent::PullProgress(0.8)).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(scenes.borrow().bow.is_some());
        assert_eq!(scenes.borrow().phase, Phase::Idle);

        handle.send(HostEvent::RefreshStarted).unwrap();
        tokio::time::sleep(Duration::from_millis(800)).await;
        {
            let scene = scenes.borrow();
            assert_eq!(scene.phase, Phase::Animating);
            assert!(scene.timer_active);
            assert!(scene.progress.major > 0.0);
            assert!(scene.arc.is_some());
        }

        handle.send(HostEvent::RefreshEnded).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        {
            let scene = scenes.borrow();
            assert_eq!(scene.phase, Phase::Idle);
            assert!(!scene.timer_active);
            assert!(scene.arc.is_none());
            assert_eq!(scene.progress.major, 0.0);
        }

        shutdown_tx.send(true).unwrap();
        let effect = task.await.unwrap();
        assert!(!effect.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_handles_dropped() {
        let (driver, handle, _scenes) = driver();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(driver.run(shutdown_rx));

        handle.send(HostEvent::Threshold(2.0)).unwrap();
        drop(handle);
        let effect = task.await.unwrap();
        assert_eq!(effect.threshold(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_after_stop_is_channel_closed() {
        let (driver, handle, _scenes) = driver();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(driver.run(shutdown_rx));

        shutdown_tx.send(true).unwrap();
        task.await.unwrap();
        let err = handle.send(HostEvent::RefreshStarted).unwrap_err();
        assert!(matches!(err, Error::ChannelClosed));
    }
}
