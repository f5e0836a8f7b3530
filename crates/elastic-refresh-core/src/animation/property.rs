//! Molecular layer: animated layer properties
//!
//! An [`AnimatedProperty`] mirrors how compositing toolkits split a layer
//! property into a model value (where it ends up) and in-flight animations
//! (how it gets there). The controller only ever queues requests; playback
//! belongs to whoever paints the layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::easing::EasingType;
use super::timing::{is_complete, keyframe_segment, lerp, progress};
use crate::geometry::Path;

/// How a property travels to its new model value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Animation<T> {
    /// Single from/to transition
    Basic {
        from: T,
        to: T,
        duration: Duration,
        easing: EasingType,
    },
    /// Multi-stop transition; `key_times` are fractions of `duration`
    Keyframes {
        values: Vec<T>,
        key_times: Vec<f64>,
        duration: Duration,
        easing: EasingType,
    },
}

impl<T> Animation<T> {
    pub fn duration(&self) -> Duration {
        match self {
            Animation::Basic { duration, .. } | Animation::Keyframes { duration, .. } => *duration,
        }
    }

    /// Value the property holds once the animation has finished
    pub fn final_value(&self) -> Option<&T> {
        match self {
            Animation::Basic { to, .. } => Some(to),
            Animation::Keyframes { values, .. } => values.last(),
        }
    }
}

/// An animation queued at a point on the controller clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationRequest<T> {
    pub issued_at: Duration,
    pub animation: Animation<T>,
}

impl<T> AnimationRequest<T> {
    pub fn is_finished(&self, now: Duration) -> bool {
        is_complete(self.issued_at, self.animation.duration(), now)
    }
}

/// A layer property with a model value and pending animation requests
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimatedProperty<T> {
    value: T,
    requests: Vec<AnimationRequest<T>>,
}

pub type AnimatedPath = AnimatedProperty<Path>;
pub type AnimatedOffset = AnimatedProperty<f64>;

impl<T: Clone> AnimatedProperty<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            requests: Vec::new(),
        }
    }

    /// Current model value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Set the model value without animating
    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    /// Queue an animation and adopt its final value as the model value
    pub fn animate(&mut self, animation: Animation<T>, issued_at: Duration) {
        if let Some(last) = animation.final_value() {
            self.value = last.clone();
        }
        self.requests.push(AnimationRequest {
            issued_at,
            animation,
        });
    }

    /// Queue a from/to transition starting at the current model value
    pub fn transition_to(&mut self, to: T, duration: Duration, easing: EasingType, now: Duration) {
        let from = self.value.clone();
        self.animate(
            Animation::Basic {
                from,
                to,
                duration,
                easing,
            },
            now,
        );
    }

    pub fn requests(&self) -> &[AnimationRequest<T>] {
        &self.requests
    }

    pub fn has_animations(&self) -> bool {
        !self.requests.is_empty()
    }

    /// Drop every in-flight animation, keeping the model value
    pub fn remove_all_animations(&mut self) {
        self.requests.clear();
    }

    /// Drop requests that have finished by `now`
    pub fn prune(&mut self, now: Duration) {
        self.requests.retain(|r| !r.is_finished(now));
    }
}

impl AnimatedOffset {
    /// Value a renderer would show at `now`
    ///
    /// Scalars are cheap to sample, so offsets expose this for hosts that
    /// only need a translation. The newest unfinished request wins.
    pub fn presentation(&self, now: Duration) -> f64 {
        let active = self
            .requests
            .iter()
            .rev()
            .find(|r| r.issued_at <= now && !r.is_finished(now));

        let Some(request) = active else {
            return self.value;
        };
        let t = progress(request.issued_at, request.animation.duration(), now);

        match &request.animation {
            Animation::Basic {
                from, to, easing, ..
            } => lerp(*from, *to, easing.apply(t)),
            Animation::Keyframes {
                values,
                key_times,
                easing,
                ..
            } => match keyframe_segment(key_times, t) {
                Some((i, local)) if i + 1 < values.len() => {
                    lerp(values[i], values[i + 1], easing.apply(local))
                }
                _ => values.last().copied().unwrap_or(self.value),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_animate_adopts_final_value() {
        let mut offset = AnimatedOffset::new(0.0);
        offset.animate(
            Animation::Keyframes {
                values: vec![200.0, 100.0, 0.0],
                key_times: vec![0.0, 0.5, 1.0],
                duration: ms(500),
                easing: EasingType::Linear,
            },
            Duration::ZERO,
        );
        assert_eq!(*offset.value(), 0.0);
        assert_eq!(offset.requests().len(), 1);
    }

    #[test]
    fn test_presentation_samples_keyframes() {
        let mut offset = AnimatedOffset::new(0.0);
        offset.animate(
            Animation::Keyframes {
                values: vec![200.0, 100.0, 0.0],
                key_times: vec![0.0, 0.5, 1.0],
                duration: ms(500),
                easing: EasingType::Linear,
            },
            ms(100),
        );
        assert_eq!(offset.presentation(ms(50)), 0.0);
        assert!((offset.presentation(ms(100)) - 200.0).abs() < 1e-9);
        assert!((offset.presentation(ms(225)) - 150.0).abs() < 1e-9);
        assert!((offset.presentation(ms(350)) - 100.0).abs() < 1e-9);
        assert_eq!(offset.presentation(ms(600)), 0.0);
    }

    #[test]
    fn test_transition_starts_from_model_value() {
        let mut offset = AnimatedOffset::new(10.0);
        offset.transition_to(20.0, ms(100), EasingType::Linear, Duration::ZERO);
        match &offset.requests()[0].animation {
            Animation::Basic { from, to, .. } => {
                assert_eq!(*from, 10.0);
                assert_eq!(*to, 20.0);
            }
            other => panic!("unexpected animation {:?}", other),
        }
        assert!((offset.presentation(ms(50)) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_prune_and_remove() {
        let mut offset = AnimatedOffset::new(0.0);
        offset.transition_to(1.0, ms(100), EasingType::Linear, Duration::ZERO);
        offset.transition_to(2.0, ms(100), EasingType::Linear, ms(80));
        offset.prune(ms(120));
        assert_eq!(offset.requests().len(), 1);
        offset.remove_all_animations();
        assert!(!offset.has_animations());
        assert_eq!(*offset.value(), 2.0);
    }
}
