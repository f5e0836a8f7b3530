//! Lifecycle controller for the elastic refresh effect
//!
//! Receives the host's four lifecycle callbacks, decides which generator
//! runs, owns the spinner timer and the three shape layers, and exposes the
//! result as a [`Scene`].
//!
//! Time only moves when the host calls [`RefreshEffect::advance`]. That keeps
//! the controller single-writer: lifecycle events and timer ticks are
//! applied on whatever thread owns it, one after another.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::animation::{AnimatedPath, EasingType};
use crate::arc::{self, ArcProgress, SpinnerMetrics};
use crate::config::{AppConfig, EffectConfig, Threshold};
use crate::curve;
use crate::geometry::{Bounds, Path};
use crate::layer::{LayerKind, ShapeLayer};
use crate::scene::Scene;
use crate::theme::{Backdrop, Color};
use crate::timer::{Countdown, RepeatingTimer, TickToken};

/// Whether the refresh animation is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Animating,
}

/// Pull state reported by the host; stored for observers only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullState {
    Idle,
    Pulling,
    Triggered,
    Refreshing,
    Finishing,
}

/// The elastic pull-to-refresh effect
pub struct RefreshEffect {
    config: EffectConfig,
    threshold: Threshold,
    backdrop: Backdrop,
    bounds: Bounds,

    phase: Phase,
    pull_state: Option<PullState>,
    pull_progress: f64,
    progress: ArcProgress,

    /// Controller clock, advanced by the host
    clock: Duration,
    generation: u64,
    pending_timer: Option<Countdown>,
    timer: Option<RepeatingTimer>,

    bow: Option<ShapeLayer>,
    backdrop_layer: Option<ShapeLayer>,
    arc: Option<ShapeLayer>,
    content_mask: Option<AnimatedPath>,
    container_background: Option<Color>,

    rng: StdRng,
}

impl RefreshEffect {
    /// Create an idle effect from configuration
    pub fn new(config: &AppConfig) -> Self {
        let rng = match config.effect.jitter_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            threshold: config.effect.threshold,
            config: config.effect.clone().sanitized(),
            backdrop: Backdrop::from_config(&config.theme),
            bounds: Bounds::default(),
            phase: Phase::Idle,
            pull_state: None,
            pull_progress: 0.0,
            progress: ArcProgress::default(),
            clock: Duration::ZERO,
            generation: 0,
            pending_timer: None,
            timer: None,
            bow: None,
            backdrop_layer: None,
            arc: None,
            content_mask: None,
            container_background: None,
            rng,
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(&AppConfig::default())
    }

    /// Replace the backdrop colors supplied by the host
    pub fn with_backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn set_backdrop(&mut self, backdrop: Backdrop) {
        self.backdrop = backdrop;
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Update the view bounds used by the next recalculation
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Set the threshold, clamped into [0, 1]
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = Threshold::new(threshold);
    }

    pub fn threshold(&self) -> f64 {
        self.threshold.get()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Animating
    }

    pub fn pull_state(&self) -> Option<PullState> {
        self.pull_state
    }

    pub fn progress(&self) -> ArcProgress {
        self.progress
    }

    pub fn metrics(&self) -> SpinnerMetrics {
        SpinnerMetrics::from_bounds(&self.bounds)
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Interval of the spinner timer
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.as_ref().is_some_and(RepeatingTimer::is_running)
    }

    /// Token for the live timer, for hosts that run their own interval
    pub fn timer_token(&self) -> Option<TickToken> {
        self.timer.as_ref().map(RepeatingTimer::token)
    }

    pub fn bow(&self) -> Option<&ShapeLayer> {
        self.bow.as_ref()
    }

    pub fn backdrop_layer(&self) -> Option<&ShapeLayer> {
        self.backdrop_layer.as_ref()
    }

    pub fn arc(&self) -> Option<&ShapeLayer> {
        self.arc.as_ref()
    }

    pub fn content_mask(&self) -> Option<&AnimatedPath> {
        self.content_mask.as_ref()
    }

    pub fn container_background(&self) -> Option<Color> {
        self.container_background
    }

    /// Record the host's pull state
    pub fn on_pull_state_changed(&mut self, state: PullState) {
        trace!("Pull state changed to {:?}", state);
        self.pull_state = Some(state);
    }

    /// Recompute the bow for a drag tick
    ///
    /// Ignored while the refresh animation runs.
    pub fn on_pull_progress_changed(&mut self, progress: f64) {
        if self.is_animating() {
            trace!("Ignoring pull progress {:.3} while animating", progress);
            return;
        }
        self.pull_progress = progress.max(0.0);

        let path = curve::bow_path(&self.bounds, self.threshold, self.pull_progress);
        let fill = self.backdrop.bow_fill();
        match self.bow.as_mut() {
            Some(bow) => {
                bow.path.set(path.clone());
                bow.fill = Some(fill);
            }
            None => {
                self.bow = Some(ShapeLayer::filled(LayerKind::Bow, path.clone(), fill));
            }
        }
        self.set_content_mask(path);
        self.apply_container_background();
    }

    /// Begin the refresh animation
    ///
    /// Calling this while already animating tears the running animation down
    /// and starts over.
    pub fn on_refresh_animation_start(&mut self) {
        if self.is_animating() {
            debug!("Refresh start while animating, restarting");
            self.teardown();
        }

        let now = self.clock;
        let bounds = self.bounds;
        let bounce_duration = self.config.bounce_duration();
        debug!(
            "Refresh animation start: bounds={}x{} threshold={:.2}",
            bounds.width,
            bounds.height,
            self.threshold.get()
        );

        // Settle bounce on the bow and the content clip
        let current = self
            .bow
            .as_ref()
            .map(|b| b.path.value().clone())
            .filter(|p| !p.is_empty());
        let bounce =
            curve::bounce_animation(&bounds, self.threshold, current.as_ref(), bounce_duration);
        let fill = self.backdrop.bow_fill();
        let bow = self.bow.get_or_insert_with(|| {
            ShapeLayer::filled(LayerKind::Bow, Path::new(), fill)
        });
        bow.path.animate(bounce.clone(), now);
        self.content_mask
            .get_or_insert_with(|| AnimatedPath::new(Path::new()))
            .animate(bounce, now);
        self.apply_container_background();

        // Spinner disc and initial arc stub
        let metrics = SpinnerMetrics::from_bounds(&bounds);
        let mut backdrop = ShapeLayer::filled(
            LayerKind::Backdrop,
            arc::backdrop_circle(&metrics),
            self.backdrop.spinner_background,
        );
        let jitter = arc::initial_jitter(&mut self.rng);
        let mut ring = ShapeLayer::stroked(
            LayerKind::Arc,
            arc::initial_arc(&metrics, &self.progress, jitter),
            self.backdrop.spinner_color,
            metrics.line_width,
        );

        let drop_in = arc::drop_in_animation(&bounds, bounce_duration);
        backdrop.offset.animate(drop_in.clone(), now);
        ring.offset.animate(drop_in, now);
        self.backdrop_layer = Some(backdrop);
        self.arc = Some(ring);

        self.pending_timer = Some(Countdown::new(self.config.timer_delay()));
        self.phase = Phase::Animating;
    }

    /// Stop the refresh animation and unmount everything
    ///
    /// Safe to call in any state, any number of times.
    pub fn on_refresh_animation_end(&mut self) {
        if self.is_animating() {
            debug!(
                "Refresh animation end after major={:.2}",
                self.progress.major
            );
        }
        self.teardown();
    }

    /// Move the controller clock forward, starting the timer and firing ticks
    /// that fall within `elapsed`
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock += elapsed;
        let mut remaining = elapsed;

        if let Some(countdown) = self.pending_timer.as_mut() {
            match countdown.advance(remaining) {
                Some(overflow) => {
                    self.pending_timer = None;
                    self.start_timer();
                    remaining = overflow;
                }
                None => remaining = Duration::ZERO,
            }
        }

        if let Some(timer) = self.timer.as_mut() {
            let due = timer.advance(remaining);
            let token = timer.token();
            let interval = timer.interval();
            let last_due = self.clock.saturating_sub(timer.since_last_tick());
            for k in (0..due).rev() {
                self.apply_tick(token, last_due.saturating_sub(interval * k));
            }
        }

        self.prune_animations();
    }

    /// Apply one spinner tick
    ///
    /// Returns false when the token belongs to a timer that has since been
    /// stopped, in which case nothing changes.
    pub fn fire_tick(&mut self, token: TickToken) -> bool {
        self.apply_tick(token, self.clock)
    }

    /// Apply a tick that fell due at `due_at` on the controller clock
    fn apply_tick(&mut self, token: TickToken, due_at: Duration) -> bool {
        let live = self.is_timer_active() && token.generation() == self.generation;
        if !live {
            trace!("Dropping stale tick from generation {}", token.generation());
            return false;
        }

        self.progress.advance(self.config.iota);
        let metrics = SpinnerMetrics::from_bounds(&self.bounds);
        let path = arc::progress_arc(&metrics, &self.progress);
        let transition = self.config.arc_transition();

        if let Some(ring) = self.arc.as_mut() {
            ring.line_width = metrics.line_width;
            ring.path
                .transition_to(path, transition, EasingType::Linear, due_at);
        }
        trace!(
            "Tick major={:.3} minor={:.3}",
            self.progress.major,
            self.progress.minor
        );
        true
    }

    /// Snapshot for the rendering layer
    pub fn scene(&self) -> Scene {
        Scene {
            time: self.clock,
            phase: self.phase,
            pull_state: self.pull_state,
            pull_progress: self.pull_progress,
            threshold: self.threshold.get(),
            bounds: self.bounds,
            progress: self.progress,
            timer_active: self.is_timer_active(),
            container_background: self.container_background,
            bow: self.bow.clone(),
            backdrop: self.backdrop_layer.clone(),
            arc: self.arc.clone(),
            content_mask: self.content_mask.clone(),
        }
    }

    fn start_timer(&mut self) {
        self.generation += 1;
        debug!(
            "Starting spinner timer (generation {}, every {:?})",
            self.generation,
            self.config.tick_interval()
        );
        self.timer = Some(RepeatingTimer::start(
            self.config.tick_interval(),
            self.generation,
        ));
    }

    fn stop_timer(&mut self) {
        self.pending_timer = None;
        if let Some(mut timer) = self.timer.take() {
            timer.stop();
            // Invalidate tokens handed out by the stopped timer
            self.generation += 1;
        }
    }

    fn teardown(&mut self) {
        self.stop_timer();
        self.progress.reset();

        for layer in [self.backdrop_layer.as_mut(), self.arc.as_mut()]
            .into_iter()
            .flatten()
        {
            layer.remove_all_animations();
        }
        self.bow = None;
        self.backdrop_layer = None;
        self.arc = None;
        self.content_mask = None;
        self.phase = Phase::Idle;
    }

    fn set_content_mask(&mut self, path: Path) {
        match self.content_mask.as_mut() {
            Some(mask) => mask.set(path),
            None => self.content_mask = Some(AnimatedPath::new(path)),
        }
    }

    fn apply_container_background(&mut self) {
        if let Some(color) = self.backdrop.container_override() {
            self.container_background = Some(color);
        }
    }

    fn prune_animations(&mut self) {
        let now = self.clock;
        for layer in [
            self.bow.as_mut(),
            self.backdrop_layer.as_mut(),
            self.arc.as_mut(),
        ]
        .into_iter()
        .flatten()
        {
            layer.prune(now);
        }
        if let Some(mask) = self.content_mask.as_mut() {
            mask.prune(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Animation;
    use crate::geometry::PathCommand;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn effect() -> RefreshEffect {
        let mut config = AppConfig::default();
        config.effect.jitter_seed = Some(11);
        let mut effect = RefreshEffect::new(&config);
        effect.set_bounds(Bounds::from_size(320.0, 100.0));
        effect
    }

    /// Advance in tick-sized steps, like a frame loop would
    fn run_for(effect: &mut RefreshEffect, total: Duration) {
        let step = ms(10);
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            effect.advance(step);
            elapsed += step;
        }
    }

    #[test]
    fn test_threshold_clamped_on_set() {
        let mut effect = effect();
        assert_eq!(effect.threshold(), 0.5);
        effect.set_threshold(-1.0);
        assert_eq!(effect.threshold(), 0.0);
        effect.set_threshold(1.5);
        assert_eq!(effect.threshold(), 1.0);
        effect.set_threshold(0.3);
        assert_eq!(effect.threshold(), 0.3);
    }

    #[test]
    fn test_progress_below_threshold_is_flat() {
        let mut effect = effect();
        effect.on_pull_progress_changed(0.2);
        let rect = Path::rect(&effect.bounds());
        assert_eq!(effect.bow().unwrap().path.value(), &rect);
        assert_eq!(effect.content_mask().unwrap().value(), &rect);
    }

    #[test]
    fn test_progress_above_threshold_bends_mask_and_bow() {
        let mut effect = effect();
        effect.on_pull_progress_changed(0.8);
        let control = effect.bow().unwrap().path.value().quad_control().unwrap();
        assert!((control.y - 130.0).abs() < 1e-9);
        assert_eq!(
            effect.content_mask().unwrap().value(),
            effect.bow().unwrap().path.value()
        );
        assert!(!effect.bow().unwrap().has_animations());
    }

    #[test]
    fn test_progress_applies_colors() {
        let mut effect = effect().with_backdrop(Backdrop {
            chrome_background: Some(Color::rgb(1, 2, 3)),
            ..Backdrop::default()
        });
        effect.on_pull_progress_changed(0.1);
        assert_eq!(effect.container_background(), Some(Color::WHITE));
        assert_eq!(effect.bow().unwrap().fill, Some(Color::rgb(1, 2, 3)));

        let mut opaque = self::effect().with_backdrop(Backdrop {
            container_background: Color::rgb(9, 9, 9),
            ..Backdrop::default()
        });
        opaque.on_pull_progress_changed(0.1);
        assert_eq!(opaque.container_background(), None);
        assert_eq!(opaque.bow().unwrap().fill, Some(Color::NEUTRAL_GRAY));
    }

    #[test]
    fn test_start_mounts_layers_and_bounces() {
        let mut effect = effect();
        effect.on_pull_progress_changed(0.9);
        let released = effect.bow().unwrap().path.value().clone();
        effect.on_refresh_animation_start();

        assert_eq!(effect.phase(), Phase::Animating);
        let bow = effect.bow().unwrap();
        assert_eq!(bow.path.value(), &Path::rect(&effect.bounds()));
        match &bow.path.requests()[0].animation {
            Animation::Keyframes {
                values, key_times, ..
            } => {
                assert_eq!(values[0], released);
                assert_eq!(key_times, &vec![0.0, 0.75, 1.0]);
            }
            other => panic!("expected bounce keyframes, got {:?}", other),
        }
        assert!(effect.content_mask().unwrap().has_animations());

        let backdrop = effect.backdrop_layer().unwrap();
        assert_eq!(backdrop.fill, Some(Color::WHITE));
        assert_eq!(backdrop.offset.presentation(Duration::ZERO), 200.0);

        let ring = effect.arc().unwrap();
        assert_eq!(ring.line_width, 2.0);
        assert!(matches!(
            ring.path.value().commands()[0],
            PathCommand::Arc { clockwise: false, radius, .. } if radius == 20.0
        ));
        assert!(!effect.is_timer_active());
    }

    #[test]
    fn test_start_without_prior_drag_uses_inward_bow() {
        let mut effect = effect();
        effect.on_refresh_animation_start();
        match &effect.bow().unwrap().path.requests()[0].animation {
            Animation::Keyframes { values, .. } => assert_eq!(values[0], values[1]),
            other => panic!("expected keyframes, got {:?}", other),
        }
    }

    #[test]
    fn test_progress_ignored_while_animating() {
        let mut effect = effect();
        effect.on_refresh_animation_start();
        effect.on_pull_progress_changed(0.9);
        assert_eq!(effect.scene().pull_progress, 0.0);
        assert_eq!(
            effect.bow().unwrap().path.value(),
            &Path::rect(&effect.bounds())
        );
    }

    #[test]
    fn test_pull_state_recorded_in_any_phase() {
        let mut effect = effect();
        effect.on_pull_state_changed(PullState::Pulling);
        assert_eq!(effect.pull_state(), Some(PullState::Pulling));
        effect.on_refresh_animation_start();
        effect.on_pull_state_changed(PullState::Refreshing);
        assert_eq!(effect.pull_state(), Some(PullState::Refreshing));
        assert!(effect.is_animating());
    }

    #[test]
    fn test_start_then_end_immediately() {
        let mut effect = effect();
        effect.on_pull_progress_changed(0.7);
        effect.on_refresh_animation_start();
        effect.on_refresh_animation_end();

        assert_eq!(effect.progress(), ArcProgress::default());
        assert!(!effect.is_timer_active());
        assert!(effect.timer_token().is_none());
        assert!(effect.bow().is_none());
        assert!(effect.backdrop_layer().is_none());
        assert!(effect.arc().is_none());
        assert!(effect.content_mask().is_none());
        assert_eq!(effect.phase(), Phase::Idle);

        // The delayed start must not fire after teardown
        run_for(&mut effect, ms(1000));
        assert!(!effect.is_timer_active());
        assert_eq!(effect.progress().major, 0.0);
    }

    #[test]
    fn test_timer_starts_after_delay() {
        let mut effect = effect();
        effect.on_refresh_animation_start();
        run_for(&mut effect, ms(540));
        assert!(!effect.is_timer_active());
        assert_eq!(effect.progress().major, 0.0);

        run_for(&mut effect, ms(60));
        assert!(effect.is_timer_active());
        assert!(effect.progress().major > 0.0);
    }

    #[test]
    fn test_ticks_advance_progress_by_iota() {
        let mut effect = effect();
        effect.on_refresh_animation_start();
        effect.advance(ms(550));
        assert!(effect.is_timer_active());
        assert_eq!(effect.progress().major, 0.0);

        effect.advance(ms(250));
        let progress = effect.progress();
        assert!((progress.major - 0.25).abs() < 1e-9);
        assert!((progress.minor - (0.25 - 0.75 * 0.25f64.sin().abs())).abs() < 1e-9);

        let ring = effect.arc().unwrap();
        assert!(matches!(
            ring.path.value().commands()[0],
            PathCommand::Arc { clockwise: true, .. }
        ));
    }

    #[test]
    fn test_tick_transitions_are_linear_and_pruned() {
        let mut effect = effect();
        effect.on_refresh_animation_start();
        effect.advance(ms(550));
        effect.advance(ms(10));

        let requests = effect.arc().unwrap().path.requests();
        let last = requests.last().unwrap();
        match &last.animation {
            Animation::Basic {
                duration, easing, ..
            } => {
                assert_eq!(*duration, ms(100));
                assert_eq!(*easing, EasingType::Linear);
            }
            other => panic!("expected basic transition, got {:?}", other),
        }

        run_for(&mut effect, ms(1000));
        // Only transitions issued in the last 100ms remain queued
        assert!(effect.arc().unwrap().path.requests().len() <= 11);
        assert!(!effect.bow().unwrap().has_animations());
    }

    #[test]
    fn test_batched_ticks_are_stamped_in_order() {
        let mut effect = effect();
        effect.on_refresh_animation_start();
        // 550ms delay, then five 10ms ticks inside one call
        effect.advance(ms(603));

        let stamps: Vec<Duration> = effect
            .arc()
            .unwrap()
            .path
            .requests()
            .iter()
            .map(|r| r.issued_at)
            .collect();
        assert_eq!(stamps, vec![ms(560), ms(570), ms(580), ms(590), ms(600)]);
        assert!((effect.progress().major - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_iota_keeps_major_non_decreasing() {
        for iota in [-0.01, 0.0, f64::NAN] {
            let mut config = AppConfig::default();
            config.effect.iota = iota;
            config.effect.jitter_seed = Some(5);
            let mut effect = RefreshEffect::new(&config);
            effect.set_bounds(Bounds::from_size(320.0, 100.0));
            effect.on_refresh_animation_start();
            effect.advance(ms(550));

            let mut prev = effect.progress().major;
            for _ in 0..10 {
                effect.advance(ms(10));
                let major = effect.progress().major;
                assert!(major > prev, "iota {} moved major from {} to {}", iota, prev, major);
                prev = major;
            }
        }
    }

    #[test]
    fn test_huge_delay_factor_does_not_panic_on_start() {
        let mut config = AppConfig::default();
        config.effect.timer_delay_factor = 1e30;
        let mut effect = RefreshEffect::new(&config);
        effect.set_bounds(Bounds::from_size(320.0, 100.0));
        effect.on_refresh_animation_start();
        effect.advance(ms(560));
        assert!(effect.is_timer_active());
    }

    #[test]
    fn test_end_stops_timer_and_restart_is_fresh() {
        let mut effect = effect();
        effect.on_refresh_animation_start();
        run_for(&mut effect, ms(700));
        assert!(effect.is_timer_active());
        let stale = effect.timer_token().unwrap();

        effect.on_refresh_animation_end();
        assert!(!effect.is_timer_active());
        assert!(!effect.fire_tick(stale));
        assert_eq!(effect.progress(), ArcProgress::default());

        effect.on_refresh_animation_start();
        assert_eq!(effect.progress().major, 0.0);
        run_for(&mut effect, ms(600));
        let fresh = effect.timer_token().unwrap();
        assert_ne!(fresh, stale);
        assert!(!effect.fire_tick(stale));
        assert!(effect.fire_tick(fresh));
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut effect = effect();
        effect.on_refresh_animation_end();
        effect.on_refresh_animation_end();
        assert_eq!(effect.phase(), Phase::Idle);

        effect.on_refresh_animation_start();
        effect.on_refresh_animation_end();
        effect.on_refresh_animation_end();
        assert!(effect.arc().is_none());
    }

    #[test]
    fn test_restart_while_animating_resets() {
        let mut effect = effect();
        effect.on_refresh_animation_start();
        run_for(&mut effect, ms(800));
        assert!(effect.progress().major > 0.0);

        effect.on_refresh_animation_start();
        assert_eq!(effect.progress(), ArcProgress::default());
        assert!(!effect.is_timer_active());
        assert!(effect.is_animating());
        assert!(effect.arc().is_some());
    }

    #[test]
    fn test_metrics_follow_bounds_changes() {
        let mut effect = effect();
        assert_eq!(effect.metrics().radius, 20.0);
        effect.set_bounds(Bounds::from_size(320.0, 60.0));
        assert_eq!(effect.metrics().radius, 12.0);

        effect.on_refresh_animation_start();
        effect.advance(ms(560));
        assert!((effect.arc().unwrap().line_width - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_zero_bounds_do_not_panic() {
        let mut effect = RefreshEffect::with_defaults();
        effect.on_pull_progress_changed(4.0);
        effect.on_refresh_animation_start();
        run_for(&mut effect, ms(700));
        assert_eq!(effect.metrics().radius, 0.0);
        effect.on_refresh_animation_end();
    }

    #[test]
    fn test_threshold_persists_across_cycles() {
        let mut effect = effect();
        effect.set_threshold(0.2);
        effect.on_refresh_animation_start();
        effect.on_refresh_animation_end();
        assert_eq!(effect.threshold(), 0.2);
    }
}
