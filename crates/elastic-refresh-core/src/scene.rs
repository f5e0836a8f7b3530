//! Renderer-facing snapshot of the effect
//!
//! A [`Scene`] holds everything a rendering layer needs for one frame. The
//! bundled SVG output draws model values and samples offsets; path requests
//! are left for renderers that can interpolate them.

use std::fmt::Write;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::AnimatedPath;
use crate::arc::ArcProgress;
use crate::controller::{Phase, PullState};
use crate::geometry::Bounds;
use crate::layer::ShapeLayer;
use crate::theme::Color;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Controller clock when the snapshot was taken
    pub time: Duration,
    pub phase: Phase,
    pub pull_state: Option<PullState>,
    pub pull_progress: f64,
    pub threshold: f64,
    pub bounds: Bounds,
    pub progress: ArcProgress,
    pub timer_active: bool,
    /// Background written onto the container, when it needed one
    pub container_background: Option<Color>,
    pub bow: Option<ShapeLayer>,
    pub backdrop: Option<ShapeLayer>,
    pub arc: Option<ShapeLayer>,
    /// Clip applied to the container's own content
    pub content_mask: Option<AnimatedPath>,
}

impl Scene {
    /// Mounted layers in paint order
    pub fn layers(&self) -> impl Iterator<Item = &ShapeLayer> {
        [&self.bow, &self.backdrop, &self.arc]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One-line summary for logs and terminal output
    pub fn summary(&self) -> String {
        let mounted: Vec<String> = self
            .layers()
            .map(|l| format!("{:?}", l.kind).to_lowercase())
            .collect();
        format!(
            "t={:>6.3}s phase={:?} pull={:.2} major={:.2} minor={:.2} timer={} layers=[{}]",
            self.time.as_secs_f64(),
            self.phase,
            self.pull_progress,
            self.progress.major,
            self.progress.minor,
            if self.timer_active { "on" } else { "off" },
            mounted.join(",")
        )
    }

    /// Render the frame as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let b = &self.bounds;
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">"#,
            x = b.x,
            y = b.y,
            w = b.width,
            h = b.height
        );

        if let Some(mask) = &self.content_mask {
            let _ = writeln!(
                svg,
                r#"  <clipPath id="content-mask"><path d="{}"/></clipPath>"#,
                mask.value().to_svg_data()
            );
        }

        if let Some(color) = self.container_background {
            let _ = writeln!(
                svg,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                b.x,
                b.y,
                b.width,
                b.height,
                color.to_css()
            );
        }

        if let Some(bow) = &self.bow {
            write_layer(&mut svg, bow, self.time, "  ");
        }

        let clip = if self.content_mask.is_some() {
            r#" clip-path="url(#content-mask)""#
        } else {
            ""
        };
        let _ = writeln!(svg, "  <g{}>", clip);
        for layer in [&self.backdrop, &self.arc].into_iter().flatten() {
            write_layer(&mut svg, layer, self.time, "    ");
        }
        svg.push_str("  </g>\n");
        svg.push_str("</svg>\n");
        svg
    }
}

fn write_layer(svg: &mut String, layer: &ShapeLayer, now: Duration, indent: &str) {
    let fill = layer
        .fill
        .map(|c| c.to_css())
        .unwrap_or_else(|| "none".to_string());
    let mut attrs = format!(r#"fill="{}""#, fill);
    if let Some(stroke) = layer.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{}" stroke-linecap="round""#,
            stroke.to_css(),
            layer.line_width
        );
    }
    let offset = layer.offset.presentation(now);
    if offset != 0.0 {
        let _ = write!(attrs, r#" transform="translate(0 {})""#, offset);
    }
    let _ = writeln!(
        svg,
        r#"{}<path data-layer="{:?}" d="{}" {}/>"#,
        indent,
        layer.kind,
        layer.path.value().to_svg_data(),
        attrs
    );
}
