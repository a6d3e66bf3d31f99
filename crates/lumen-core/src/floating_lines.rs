//! Floating lines backdrop: a vertical blue/black/magenta gradient under
//! three bands of wave strokes that drift, rotate about the surface center
//! and twirl.

use crate::canvas::{Canvas, GradientStop, Paint, Path, Point, Size};
use crate::color::Color;
use crate::overlay::Effect;

/// Horizontal distance between sampled stroke vertices, pixels.
const SAMPLE_STEP: usize = 2;

/// One band of parallel wave strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveBand {
    pub count: usize,
    /// Baseline as a fraction of surface height.
    pub base: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub speed: f64,
    pub alpha: f64,
    /// Peak rotation about the surface center, radians.
    pub twist: f64,
    /// Left, middle, right stroke colors.
    pub colors: [&'static str; 3],
}

pub const BANDS: [WaveBand; 3] = [
    WaveBand {
        count: 6,
        base: 0.8,
        amplitude: 40.0,
        frequency: 0.008,
        speed: 0.4,
        alpha: 0.2,
        twist: 0.3,
        colors: ["#e947f5", "#ff6b9d", "#c44569"],
    },
    WaveBand {
        count: 10,
        base: 0.5,
        amplitude: 60.0,
        frequency: 0.006,
        speed: 0.2,
        alpha: 0.6,
        twist: 0.5,
        colors: ["#2f4ba2", "#4834d4", "#e947f5"],
    },
    WaveBand {
        count: 4,
        base: 0.2,
        amplitude: 35.0,
        frequency: 0.01,
        speed: 0.6,
        alpha: 0.15,
        twist: 0.8,
        colors: ["#00d2d3", "#2f4ba2", "#ff9ff3"],
    },
];

pub const LINE_COUNT: usize = BANDS[0].count + BANDS[1].count + BANDS[2].count;

impl WaveBand {
    /// Rotation of line `line` at time `t`.
    pub fn rotation(&self, line: usize, t: f64) -> f64 {
        (t * 0.1 + line as f64).sin() * self.twist
    }

    /// Vertex of line `line` at column `x`: the drifting sine is rotated
    /// about the surface center, then offset by a twirl and a spiral term.
    pub fn point(&self, line: usize, x: f64, size: Size, t: f64) -> Point {
        let (w, h) = (size.w(), size.h());
        let i = line as f64;

        let offset = i * 0.7 + t * self.speed;
        let base_y = h * self.base + (x * self.frequency + offset).sin() * self.amplitude;

        let twirl = (x * 0.003 + t * 0.5 + i * 0.2).sin() * 20.0;
        let spiral = (x * 0.002 + t * 0.3 + i * 0.5).cos() * 15.0;

        let (sin, cos) = self.rotation(line, t).sin_cos();
        let dx = x - w / 2.0;
        let dy = base_y - h / 2.0;
        let rx = dx * cos - dy * sin + w / 2.0;
        let ry = dx * sin + dy * cos + h / 2.0;

        Point::new(rx, ry + twirl + spiral)
    }

    pub fn stroke(&self, line: usize, size: Size, t: f64) -> Path {
        let mut path = Path::with_capacity(size.width as usize / SAMPLE_STEP + 1);
        path.polyline(
            (0..=size.width as usize)
                .step_by(SAMPLE_STEP)
                .map(|x| self.point(line, x as f64, size, t)),
        );
        path
    }

    pub fn paint(&self, width: f64) -> Paint {
        let stop = |offset: f32, hex: &str| {
            GradientStop::new(offset, Color::from_hex(hex).unwrap_or(Color::WHITE))
        };
        Paint::linear(
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            &[
                stop(0.0, self.colors[0]),
                stop(0.5, self.colors[1]),
                stop(1.0, self.colors[2]),
            ],
        )
    }
}

/// Stroke width of line `line` in band `band`, in [1, 3).
///
/// Fixed per line so that a frame stays a pure function of time; the
/// widths come from a sine hash of the two indices.
pub fn line_width(band: usize, line: usize) -> f64 {
    let v = (band as f64 * 12.9898 + line as f64 * 78.233).sin() * 43_758.545_3;
    1.0 + 2.0 * (v - v.floor())
}

fn backdrop(height: f64) -> Paint {
    Paint::vertical(
        0.0,
        height,
        &[
            GradientStop::new(0.0, Color::rgba(47.0 / 255.0, 75.0 / 255.0, 162.0 / 255.0, 1.0)),
            GradientStop::new(0.5, Color::BLACK),
            GradientStop::new(1.0, Color::rgba(233.0 / 255.0, 71.0 / 255.0, 245.0 / 255.0, 1.0)),
        ],
    )
}

/// Draw one floating-lines frame at `t` seconds.
pub fn draw_floating_lines<C: Canvas + ?Sized>(canvas: &mut C, size: Size, t: f64) {
    let (w, h) = (size.w(), size.h());
    canvas.clear(size);
    canvas.fill_rect(0.0, 0.0, w, h, &backdrop(h));

    for (b, band) in BANDS.iter().enumerate() {
        let paint = band.paint(w);
        canvas.set_alpha(band.alpha);
        for line in 0..band.count {
            let stroke = band.stroke(line, size, t);
            canvas.stroke_path(&stroke, &paint, line_width(b, line));
        }
        log::trace!("floating lines band {b}: {} strokes", band.count);
    }

    canvas.set_alpha(1.0);
}

/// Full-viewport floating lines backdrop.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatingLines;

impl Effect for FloatingLines {
    fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C, size: Size, elapsed_ms: f64) {
        draw_floating_lines(canvas, size, elapsed_ms / 1000.0);
    }
}
