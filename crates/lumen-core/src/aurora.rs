//! Aurora backdrop: a night-sky gradient, four drifting light ribbons and a
//! field of twinkling stars.
//!
//! Everything is a closed-form function of surface size and elapsed time.
//! No per-ribbon or per-star state is kept between frames.

use crate::canvas::{Canvas, Glow, GradientStop, Paint, Path, Point, Size};
use crate::color::Color;
use crate::overlay::Effect;

pub const RIBBON_COUNT: usize = 4;
pub const STAR_COUNT: usize = 100;

/// Horizontal distance between sampled ribbon vertices, pixels.
const SAMPLE_STEP: usize = 5;
const GLOW_BLUR: f64 = 30.0;

/// Shape parameters of one ribbon layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ribbon {
    pub layer: usize,
    pub y_offset: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub speed: f64,
    pub alpha: f64,
}

impl Ribbon {
    pub fn for_layer(layer: usize, size: Size) -> Self {
        let l = layer as f64;
        let h = size.h();
        Self {
            layer,
            y_offset: h * 0.2 + l * h * 0.15,
            amplitude: 80.0 + l * 30.0,
            frequency: 0.003 + l * 0.001,
            speed: 0.5 + l * 0.2,
            alpha: 0.3 - l * 0.05,
        }
    }

    /// Center line of the ribbon at column `x`: two summed sines.
    pub fn center_y(&self, x: f64, t: f64) -> f64 {
        let a = self.amplitude;
        let wave1 = (x * self.frequency + t * self.speed).sin() * a * 0.6;
        let wave2 = (x * self.frequency * 1.5 + t * self.speed * 0.7).sin() * a * 0.4;
        self.y_offset + wave1 + wave2
    }

    /// Green-to-cyan hue of the ribbon's leading edge.
    pub fn leading_hue(&self, t: f64) -> f64 {
        120.0 + (t * 0.3 + self.layer as f64).sin() * 60.0
    }

    /// Purple-to-pink hue of the trailing edge.
    pub fn trailing_hue(&self, t: f64) -> f64 {
        280.0 + (t * 0.2 + self.layer as f64).cos() * 40.0
    }

    /// Closed outline: top edge left to right, bottom edge right to left.
    pub fn outline(&self, width: f64, t: f64) -> Path {
        let columns = width as usize / SAMPLE_STEP + 1;
        let mut path = Path::with_capacity(columns * 2 + 1);

        let top = (0..=width as usize)
            .step_by(SAMPLE_STEP)
            .map(|x| x as f64)
            .map(|x| Point::new(x, self.center_y(x, t) - self.amplitude));
        path.polyline(top);

        let mut x = width;
        while x >= 0.0 {
            path.line_to(x, self.center_y(x, t) + self.amplitude);
            x -= SAMPLE_STEP as f64;
        }
        path.close();
        path
    }

    pub fn paint(&self, t: f64) -> Paint {
        let hue1 = self.leading_hue(t);
        let hue2 = self.trailing_hue(t);
        Paint::vertical(
            self.y_offset - self.amplitude,
            self.y_offset + self.amplitude,
            &[
                GradientStop::new(0.0, Color::hsla(hue1, 80.0, 60.0, 0.0)),
                GradientStop::new(0.3, Color::hsla(hue1, 90.0, 70.0, 0.8)),
                GradientStop::new(0.7, Color::hsla(hue2, 85.0, 65.0, 0.6)),
                GradientStop::new(1.0, Color::hsla(hue2, 70.0, 50.0, 0.0)),
            ],
        )
    }
}

/// One star at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub center: Point,
    pub radius: f64,
    pub alpha: f64,
}

/// Star `index` at time `t`. Positions are fixed per index; only the
/// twinkle moves.
pub fn star(index: usize, size: Size, t: f64) -> Star {
    let i = index as f64;
    let x = ((i * 0.1).sin() * 0.5 + 0.5) * size.w();
    let y = ((i * 0.13).cos() * 0.3 + 0.2) * size.h();
    let twinkle = (t * 2.0 + i).sin() * 0.5 + 0.5;
    Star {
        center: Point::new(x, y),
        radius: twinkle * 2.0 + 0.5,
        alpha: twinkle * 0.8,
    }
}

fn sky() -> [GradientStop; 3] {
    [
        GradientStop::new(0.0, Color::rgba(10.0 / 255.0, 10.0 / 255.0, 26.0 / 255.0, 1.0)),
        GradientStop::new(0.7, Color::rgba(26.0 / 255.0, 26.0 / 255.0, 46.0 / 255.0, 1.0)),
        GradientStop::new(1.0, Color::rgba(22.0 / 255.0, 33.0 / 255.0, 62.0 / 255.0, 1.0)),
    ]
}

/// Draw one aurora frame at `t` seconds.
pub fn draw_aurora<C: Canvas + ?Sized>(canvas: &mut C, size: Size, t: f64) {
    let (w, h) = (size.w(), size.h());
    canvas.clear(size);
    canvas.fill_rect(0.0, 0.0, w, h, &Paint::vertical(0.0, h, &sky()));

    for layer in 0..RIBBON_COUNT {
        let ribbon = Ribbon::for_layer(layer, size);
        let outline = ribbon.outline(w, t);
        let paint = ribbon.paint(t);
        log::trace!("aurora ribbon {layer}: {} vertices", outline.commands.len());

        canvas.set_alpha(ribbon.alpha);
        canvas.fill_path(&outline, &paint);

        // Second pass with a blur in the leading hue reads as glow.
        canvas.set_glow(Some(Glow {
            color: Color::hsl(ribbon.leading_hue(t), 80.0, 60.0),
            blur: GLOW_BLUR,
        }));
        canvas.fill_path(&outline, &paint);
        canvas.set_glow(None);
    }

    let white = Paint::Solid(Color::WHITE);
    for index in 0..STAR_COUNT {
        let s = star(index, size, t);
        let mut dot = Path::with_capacity(1);
        dot.circle(s.center.x, s.center.y, s.radius);
        canvas.set_alpha(s.alpha);
        canvas.fill_path(&dot, &white);
    }

    canvas.set_alpha(1.0);
}

/// Full-viewport aurora backdrop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aurora;

impl Effect for Aurora {
    fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C, size: Size, elapsed_ms: f64) {
        draw_aurora(canvas, size, elapsed_ms / 1000.0);
    }
}
