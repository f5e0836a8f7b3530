pub mod animation;
pub mod arc;
pub mod config;
pub mod controller;
pub mod curve;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod scene;
pub mod theme;
pub mod timer;

pub use config::{AppConfig, EffectConfig, Threshold};
pub use controller::{Phase, PullState, RefreshEffect};
pub use driver::{DriverHandle, HostEvent, RefreshDriver};
pub use error::{Error, Result};
pub use geometry::{Bounds, Path, Point};
pub use scene::Scene;
pub use theme::{Backdrop, Color};
