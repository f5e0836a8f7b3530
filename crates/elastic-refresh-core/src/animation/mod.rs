//! Animation primitives for the elastic refresh effect
//!
//! The engine never interpolates pixels itself. Each animated layer property
//! keeps a model value plus a queue of timed requests, and the rendering
//! collaborator plays those requests back between ticks.
//!
//! ## Atomic layer
//! - `easing` - Pure easing curves
//! - `timing` - Progress, interpolation and keyframe lookup
//!
//! ## Molecular layer
//! - `property` - Animated property holding a value and its request queue

pub mod easing;
pub mod timing;

pub mod property;

pub use easing::EasingType;
pub use property::{AnimatedOffset, AnimatedPath, AnimatedProperty, Animation, AnimationRequest};
