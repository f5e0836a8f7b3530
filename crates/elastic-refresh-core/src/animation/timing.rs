//! Atomic layer: time calculations for animations
//!
//! Times are offsets on the controller's clock rather than wall-clock
//! instants, so the same math serves real and simulated time.

use std::time::Duration;

/// Animation progress (0.0 to 1.0) at `now` for an animation issued at `start`
#[inline]
pub fn progress(start: Duration, duration: Duration, now: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation issued at `start` has finished by `now`
#[inline]
pub fn is_complete(start: Duration, duration: Duration, now: Duration) -> bool {
    now.saturating_sub(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Locate `t` within a keyframe timeline
///
/// Returns the index of the segment's first keyframe and the local progress
/// within that segment. `key_times` must be non-decreasing.
pub fn keyframe_segment(key_times: &[f64], t: f64) -> Option<(usize, f64)> {
    if key_times.len() < 2 {
        return None;
    }
    let t = t.clamp(0.0, 1.0);
    let last = key_times.len() - 2;

    for i in 0..=last {
        let (a, b) = (key_times[i], key_times[i + 1]);
        if t <= b || i == last {
            let span = b - a;
            let local = if span <= 0.0 { 1.0 } else { (t - a) / span };
            return Some((i, local.clamp(0.0, 1.0)));
        }
    }
    None
}
