//! Drawing vocabulary shared by every effect and backend.
//!
//! Effects describe each frame through the [`Canvas`] trait, which mirrors
//! the subset of the HTML Canvas2D API they need. Backends (Canvas2D in the
//! browser, Vello natively) implement it; [`RecordingCanvas`] captures the
//! calls as plain values so frames can be compared in tests.

use crate::color::Color;
use smallvec::SmallVec;

// ─── Geometry ────────────────────────────────────────────────────────────

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert a CSS layout size to surface pixels. Fractions truncate the
    /// way assigning to a `<canvas>` width attribute does; negative and NaN
    /// sizes become zero.
    pub fn from_layout(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0) as u32,
            height: height.max(0.0) as u32,
        }
    }

    pub fn w(&self) -> f64 {
        self.width as f64
    }

    pub fn h(&self) -> f64 {
        self.height as f64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ─── Paint ───────────────────────────────────────────────────────────────

/// A gradient stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32, // 0.0 .. 1.0
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

pub type Stops = SmallVec<[GradientStop; 4]>;

/// Fill or stroke source.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        from: Point,
        to: Point,
        stops: Stops,
    },
    /// Two concentric circles, as in `createRadialGradient(x, y, r0, x, y, r1)`.
    Radial {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        stops: Stops,
    },
}

impl Paint {
    pub fn linear(from: Point, to: Point, stops: &[GradientStop]) -> Self {
        Paint::Linear {
            from,
            to,
            stops: SmallVec::from_slice(stops),
        }
    }

    pub fn radial(center: Point, outer_radius: f64, stops: &[GradientStop]) -> Self {
        Paint::Radial {
            center,
            inner_radius: 0.0,
            outer_radius,
            stops: SmallVec::from_slice(stops),
        }
    }

    /// Vertical gradient running from `y0` to `y1`.
    pub fn vertical(y0: f64, y1: f64, stops: &[GradientStop]) -> Self {
        Self::linear(Point::new(0.0, y0), Point::new(0.0, y1), stops)
    }

    /// Best single-color stand-in, for backends that cannot draw gradients.
    pub fn dominant_color(&self) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear { stops, .. } | Paint::Radial { stops, .. } => stops
                .iter()
                .max_by(|a, b| a.color.a.total_cmp(&b.color.a))
                .map(|s| s.color)
                .unwrap_or(Color::TRANSPARENT),
        }
    }
}

/// Shadow used as a soft glow: Canvas2D `shadowColor` + `shadowBlur`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f64,
}

// ─── Paths ───────────────────────────────────────────────────────────────

/// Path command. Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    Close,
}

/// An owned path, built with the same verbs as a Canvas2D path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub commands: Vec<PathCmd>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            commands: Vec::with_capacity(n),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCmd::MoveTo(x, y));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCmd::LineTo(x, y));
        self
    }

    /// Start a new subpath at the first point, then line to the rest.
    pub fn polyline(&mut self, points: impl IntoIterator<Item = Point>) -> &mut Self {
        for (i, p) in points.into_iter().enumerate() {
            if i == 0 {
                self.move_to(p.x, p.y);
            } else {
                self.line_to(p.x, p.y);
            }
        }
        self
    }

    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> &mut Self {
        self.commands.push(PathCmd::Arc {
            cx,
            cy,
            radius,
            start: 0.0,
            end: std::f64::consts::TAU,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCmd::Close);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

// ─── Canvas trait ────────────────────────────────────────────────────────

/// Immediate-mode drawing target.
///
/// State (alpha, glow, transform) behaves like Canvas2D: it persists across
/// calls until changed, and `save`/`restore` push and pop all of it.
pub trait Canvas {
    /// Reset every pixel of the surface to transparent.
    fn clear(&mut self, size: Size);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint);

    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn stroke_path(&mut self, path: &Path, paint: &Paint, line_width: f64);

    /// Global alpha applied to every following fill and stroke.
    fn set_alpha(&mut self, alpha: f64);

    /// `None` turns the glow off.
    fn set_glow(&mut self, glow: Option<Glow>);

    fn save(&mut self);

    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64);

    fn rotate(&mut self, angle: f64);
}

// ─── Recording ───────────────────────────────────────────────────────────

/// One captured [`Canvas`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Size),
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paint: Paint,
    },
    FillPath {
        path: Path,
        paint: Paint,
    },
    StrokePath {
        path: Path,
        paint: Paint,
        line_width: f64,
    },
    Alpha(f64),
    Glow(Option<Glow>),
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
}

/// A [`Canvas`] that remembers what was drawn instead of drawing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Paths filled or stroked, in draw order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillPath { path, .. } | DrawOp::StrokePath { path, .. } => Some(path),
            _ => None,
        })
    }

    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokePath { .. }))
            .count()
    }

    pub fn fill_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillPath { .. } | DrawOp::FillRect { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, size: Size) {
        self.ops.push(DrawOp::Clear(size));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            paint: paint.clone(),
        });
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.ops.push(DrawOp::FillPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, line_width: f64) {
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            paint: paint.clone(),
            line_width,
        });
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.ops.push(DrawOp::Glow(glow));
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::Translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.ops.push(DrawOp::Rotate(angle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_size_truncates() {
        assert_eq!(Size::from_layout(300.7, 150.2), Size::new(300, 150));
        assert_eq!(Size::from_layout(-4.0, f64::NAN), Size::new(0, 0));
    }

    #[test]
    fn polyline_starts_subpath() {
        let mut path = Path::new();
        path.polyline([Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(
            path.commands,
            vec![
                PathCmd::MoveTo(0.0, 0.0),
                PathCmd::LineTo(1.0, 2.0),
                PathCmd::LineTo(3.0, 4.0),
            ]
        );
    }

    #[test]
    fn dominant_color_prefers_most_opaque_stop() {
        let hot = Color::hsl(280.0, 80.0, 60.0);
        let paint = Paint::radial(
            Point::default(),
            10.0,
            &[
                GradientStop::new(0.0, Color::TRANSPARENT),
                GradientStop::new(1.0, hot),
            ],
        );
        assert_eq!(paint.dominant_color(), hot);
    }

    #[test]
    fn recording_captures_calls_in_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.clear(Size::new(10, 10));
        canvas.set_alpha(0.5);
        let mut path = Path::new();
        path.circle(1.0, 1.0, 2.0);
        canvas.fill_path(&path, &Paint::Solid(Color::WHITE));

        assert_eq!(canvas.ops.len(), 3);
        assert_eq!(canvas.ops[0], DrawOp::Clear(Size::new(10, 10)));
        assert_eq!(canvas.fill_count(), 1);
        assert_eq!(canvas.paths().count(), 1);
    }
}
