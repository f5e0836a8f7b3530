//! Elastic bow geometry
//!
//! The bow is the view rectangle with its bottom edge swapped for a
//! quadratic curve. Pulling past the threshold drags the curve's control
//! point below the view; on refresh start the curve bounces inward and
//! flattens.

use std::time::Duration;

use crate::animation::{Animation, EasingType};
use crate::config::Threshold;
use crate::geometry::{Bounds, Path, Point};

/// Key times of the settle bounce
pub const BOUNCE_KEY_TIMES: [f64; 3] = [0.0, 0.75, 1.0];

/// How far past the threshold the pull has gone, saturating at 1
///
/// `None` while the pull is still below the threshold.
pub fn stretch_coefficient(threshold: Threshold, pull_progress: f64) -> Option<f64> {
    let t = threshold.get();
    if pull_progress < t {
        None
    } else {
        Some((pull_progress - t).min(1.0))
    }
}

/// Closed path with the bottom edge bent through a control point at `control_y`
pub fn bow_path_with_control(bounds: &Bounds, control_y: f64) -> Path {
    let mut path = Path::new();
    path.move_to(Point::new(bounds.min_x(), bounds.min_y()))
        .line_to(Point::new(bounds.max_x(), bounds.min_y()))
        .line_to(Point::new(bounds.max_x(), bounds.max_y()))
        .quad_to(
            Point::new(bounds.mid_x(), control_y),
            Point::new(bounds.min_x(), bounds.max_y()),
        )
        .close();
    path
}

/// Bow for the current pull: flat below the threshold, stretched below the
/// view beyond it by up to one view height
pub fn bow_path(bounds: &Bounds, threshold: Threshold, pull_progress: f64) -> Path {
    match stretch_coefficient(threshold, pull_progress) {
        None => Path::rect(bounds),
        Some(coef) => bow_path_with_control(bounds, bounds.max_y() + bounds.height * coef),
    }
}

/// Bow curving up into the view, the overshoot of the settle bounce
pub fn inward_bow_path(bounds: &Bounds, threshold: Threshold) -> Path {
    bow_path_with_control(bounds, bounds.max_y() - bounds.height * threshold.get())
}

/// Settle bounce from `current` through the inward bow to flat
///
/// `current` is whatever the bow showed at release; with no bow yet the
/// inward bow itself is the starting frame.
pub fn bounce_animation(
    bounds: &Bounds,
    threshold: Threshold,
    current: Option<&Path>,
    duration: Duration,
) -> Animation<Path> {
    let inward = inward_bow_path(bounds, threshold);
    let first = match current {
        Some(path) if !path.is_empty() => path.clone(),
        _ => inward.clone(),
    };

    Animation::Keyframes {
        values: vec![first, inward, Path::rect(bounds)],
        key_times: BOUNCE_KEY_TIMES.to_vec(),
        duration,
        easing: EasingType::Linear,
    }
}
