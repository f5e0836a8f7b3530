use serde::{Deserialize, Serialize};

use crate::animation::{AnimatedOffset, AnimatedPath};
use crate::geometry::Path;
use crate::theme::Color;

/// The three shapes the effect manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Bow,
    Backdrop,
    Arc,
}

/// A mounted shape: animated path, vertical offset and paint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeLayer {
    pub kind: LayerKind,
    pub path: AnimatedPath,
    pub offset: AnimatedOffset,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
}

impl ShapeLayer {
    pub fn filled(kind: LayerKind, path: Path, fill: Color) -> Self {
        Self {
            kind,
            path: AnimatedPath::new(path),
            offset: AnimatedOffset::new(0.0),
            fill: Some(fill),
            stroke: None,
            line_width: 0.0,
        }
    }

    pub fn stroked(kind: LayerKind, path: Path, stroke: Color, line_width: f64) -> Self {
        Self {
            kind,
            path: AnimatedPath::new(path),
            offset: AnimatedOffset::new(0.0),
            fill: None,
            stroke: Some(stroke),
            line_width,
        }
    }

    pub fn remove_all_animations(&mut self) {
        self.path.remove_all_animations();
        self.offset.remove_all_animations();
    }

    pub fn has_animations(&self) -> bool {
        self.path.has_animations() || self.offset.has_animations()
    }

    pub fn prune(&mut self, now: std::time::Duration) {
        self.path.prune(now);
        self.offset.prune(now);
    }
}
