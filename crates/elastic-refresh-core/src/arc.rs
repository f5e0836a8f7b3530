//! Spinner geometry: the progress ring and the disc behind it
//!
//! The ring's two ends chase each other. `major` creeps forward by a fixed
//! step per tick while `minor` lags behind it by `0.75·|sin(major)|`, so the
//! visible sweep grows and shrinks as the whole arc rotates.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::animation::{Animation, EasingType};
use crate::geometry::{Bounds, Path, Point};

/// Default arc progress added per tick
pub const IOTA: f64 = 0.01;

/// Key times of the spinner drop-in
pub const DROP_IN_KEY_TIMES: [f64; 3] = [0.0, 0.5, 1.0];

/// Lag factor between the leading and trailing ends of the arc
const TRAIL_LAG: f64 = 0.75;

/// Leading (`major`) and trailing (`minor`) ends of the arc, in turns
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArcProgress {
    pub major: f64,
    pub minor: f64,
}

impl ArcProgress {
    /// Advance by `iota` and recompute the trailing end
    pub fn advance(&mut self, iota: f64) {
        self.major += iota;
        self.minor = trailing_end(self.major);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start and end angles of the ring for the current progress
    pub fn angles(&self) -> (f64, f64) {
        (
            FRAC_PI_2 + TAU * self.minor,
            FRAC_PI_2 + TAU * self.major,
        )
    }
}

/// `major − 0.75·|sin(major)|`
#[inline]
pub fn trailing_end(major: f64) -> f64 {
    major - TRAIL_LAG * major.sin().abs()
}

/// Spinner sizes derived from the view bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinnerMetrics {
    pub center: Point,
    /// Radius the ring is stroked along
    pub radius: f64,
    /// Stroke width of the ring
    pub line_width: f64,
}

impl SpinnerMetrics {
    pub fn from_bounds(bounds: &Bounds) -> Self {
        let radius = bounds.height / 5.0;
        Self {
            center: bounds.center(),
            radius,
            line_width: radius / 10.0,
        }
    }

    /// Radius of the disc behind the ring, wide enough to cover its stroke
    pub fn backdrop_radius(&self) -> f64 {
        self.radius + self.line_width
    }

    /// Half a stroke width expressed as an angle on the ring
    fn start_epsilon(&self) -> f64 {
        if self.radius > 0.0 {
            self.line_width / self.radius / 2.0
        } else {
            0.0
        }
    }
}

/// Disc the ring is drawn on
pub fn backdrop_circle(metrics: &SpinnerMetrics) -> Path {
    Path::circle(metrics.center, metrics.backdrop_radius())
}

/// Random extra sweep for the first frame, in tenths of a degree below 10°
pub fn initial_jitter<R: Rng>(rng: &mut R) -> f64 {
    (rng.gen_range(0..100) as f64 / 10.0).to_radians()
}

/// Stub of an arc shown before the first tick
///
/// It starts half a stroke before the bottom of the ring and ends `jitter`
/// radians past it. The direction compares the two progress ends, which are
/// both zero at this point, so the stub is always drawn counter-clockwise.
pub fn initial_arc(metrics: &SpinnerMetrics, progress: &ArcProgress, jitter: f64) -> Path {
    let mut path = Path::new();
    path.arc(
        metrics.center,
        metrics.radius,
        FRAC_PI_2 - metrics.start_epsilon(),
        FRAC_PI_2 + jitter,
        progress.major > progress.minor,
    );
    path
}

/// Ring for the current progress, always clockwise from trailing to leading end
pub fn progress_arc(metrics: &SpinnerMetrics, progress: &ArcProgress) -> Path {
    let (start, end) = progress.angles();
    let mut path = Path::new();
    path.arc(metrics.center, metrics.radius, start, end, true);
    path
}

/// Vertical offsets that drop the spinner into place from two view heights down
pub fn drop_in_animation(bounds: &Bounds, duration: Duration) -> Animation<f64> {
    let h = bounds.height;
    Animation::Keyframes {
        values: vec![2.0 * h, h, 0.0],
        key_times: DROP_IN_KEY_TIMES.to_vec(),
        duration,
        easing: EasingType::Linear,
    }
}
