//! Plain geometry shared by the generators: points, bounds and paths.
//!
//! Coordinates are y-down, matching the rendering surfaces the effect is
//! drawn on. Angles are radians measured from the positive x axis, so
//! `FRAC_PI_2` points straight down.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle snapshot supplied by the host on every recalculation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds, clamping negative sizes to zero
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Bounds anchored at the origin
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A single drawing instruction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo {
        control: Point,
        to: Point,
    },
    /// Circular arc; `clockwise` is the on-screen direction in y-down space
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    },
    Close,
}

/// Ordered list of drawing commands
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed rectangle traced top-left, top-right, bottom-right, bottom-left
    pub fn rect(bounds: &Bounds) -> Self {
        let mut path = Self::new();
        path.move_to(Point::new(bounds.min_x(), bounds.min_y()));
        path.line_to(Point::new(bounds.max_x(), bounds.min_y()));
        path.line_to(Point::new(bounds.max_x(), bounds.max_y()));
        path.line_to(Point::new(bounds.min_x(), bounds.max_y()));
        path.close();
        path
    }

    /// Full circle as a single closed arc
    pub fn circle(center: Point, radius: f64) -> Self {
        let mut path = Self::new();
        path.arc(center, radius.max(0.0), 0.0, TAU, true);
        path.close();
        path
    }

    pub fn move_to(&mut self, to: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    pub fn line_to(&mut self, to: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    pub fn quad_to(&mut self, control: Point, to: Point) -> &mut Self {
        self.commands.push(PathCommand::QuadTo { control, to });
        self
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    ) -> &mut Self {
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Control point of the first quadratic segment, if any
    pub fn quad_control(&self) -> Option<Point> {
        self.commands.iter().find_map(|c| match c {
            PathCommand::QuadTo { control, .. } => Some(*control),
            _ => None,
        })
    }

    /// Serialize as SVG path data
    pub fn to_svg_data(&self) -> String {
        let mut d = String::new();
        let mut has_current = false;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    let _ = write!(d, "M{} {} ", fmt(p.x), fmt(p.y));
                    has_current = true;
                }
                PathCommand::LineTo(p) => {
                    let _ = write!(d, "L{} {} ", fmt(p.x), fmt(p.y));
                    has_current = true;
                }
                PathCommand::QuadTo { control, to } => {
                    let _ = write!(
                        d,
                        "Q{} {} {} {} ",
                        fmt(control.x),
                        fmt(control.y),
                        fmt(to.x),
                        fmt(to.y)
                    );
                    has_current = true;
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                } => {
                    write_svg_arc(
                        &mut d,
                        center,
                        radius,
                        start_angle,
                        end_angle,
                        clockwise,
                        has_current,
                    );
                    has_current = true;
                }
                PathCommand::Close => d.push_str("Z "),
            }
        }

        d.truncate(d.trim_end().len());
        d
    }
}

/// Angular distance travelled from `start` to `end` in the given direction,
/// in [0, 2π]
pub fn sweep_angle(start_angle: f64, end_angle: f64, clockwise: bool) -> f64 {
    let raw = if clockwise {
        end_angle - start_angle
    } else {
        start_angle - end_angle
    };
    if raw >= TAU {
        TAU
    } else {
        raw.rem_euclid(TAU)
    }
}

/// Point on a circle at `angle`
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

fn write_svg_arc(
    d: &mut String,
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    clockwise: bool,
    has_current: bool,
) {
    let start = point_on_circle(center, radius, start_angle);
    let _ = write!(
        d,
        "{}{} {} ",
        if has_current { "L" } else { "M" },
        fmt(start.x),
        fmt(start.y)
    );

    let sweep = sweep_angle(start_angle, end_angle, clockwise);
    if radius <= 0.0 || sweep <= f64::EPSILON {
        return;
    }

    let direction = if clockwise { 1.0 } else { -1.0 };
    let sweep_flag = u8::from(clockwise);

    // SVG cannot express a full turn in one segment
    if sweep > PI {
        let mid_angle = start_angle + direction * sweep / 2.0;
        let mid = point_on_circle(center, radius, mid_angle);
        let _ = write!(
            d,
            "A{r} {r} 0 0 {sweep_flag} {} {} ",
            fmt(mid.x),
            fmt(mid.y),
            r = fmt(radius)
        );
    }

    let end = point_on_circle(center, radius, start_angle + direction * sweep);
    let _ = write!(
        d,
        "A{r} {r} 0 0 {sweep_flag} {} {} ",
        fmt(end.x),
        fmt(end.y),
        r = fmt(radius)
    );
}

/// Compact number formatting for path data
fn fmt(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}
