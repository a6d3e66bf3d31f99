//! Prism backdrop: three nested prisms spinning about the surface center,
//! each built from three glowing triangular faces, plus drifting particles.

use crate::canvas::{Canvas, Glow, GradientStop, Paint, Path, Point, Size};
use crate::color::Color;
use crate::overlay::Effect;
use std::f64::consts::PI;

pub const PRISM_COUNT: usize = 3;
pub const FACES_PER_PRISM: usize = 3;
pub const PARTICLE_COUNT: usize = 50;

const GLOW_BLUR: f64 = 20.0;
const PARTICLE_ALPHA: f64 = 0.4;

/// Placement of one prism at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prism {
    pub index: usize,
    pub rotation: f64,
    pub size: f64,
}

impl Prism {
    pub fn at(index: usize, surface: Size, t: f64) -> Self {
        let i = index as f64;
        let scale = 0.8 - i * 0.2;
        Self {
            index,
            rotation: t * 0.3 + i * PI / 3.0,
            size: surface.w().min(surface.h()) * 0.15 * scale,
        }
    }

    /// Faces in the prism's local (rotated) frame.
    pub fn faces(&self) -> [Face; FACES_PER_PRISM] {
        let i = self.index as f64;
        let s = self.size;
        [
            Face {
                color: Color::hsl(280.0 + i * 30.0, 80.0, 60.0),
                offset: Point::new(-s * 0.3, -s * 0.2),
            },
            Face {
                color: Color::hsl(320.0 + i * 30.0, 70.0, 50.0),
                offset: Point::new(s * 0.3, -s * 0.2),
            },
            Face {
                color: Color::hsl(240.0 + i * 30.0, 90.0, 70.0),
                offset: Point::new(0.0, s * 0.4),
            },
        ]
    }
}

/// One triangular face: a colored radial glow clipped to a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub color: Color,
    pub offset: Point,
}

impl Face {
    pub fn triangle(&self, size: f64) -> Path {
        let Point { x, y } = self.offset;
        let mut path = Path::with_capacity(4);
        path.move_to(x, y - size * 0.6)
            .line_to(x - size * 0.5, y + size * 0.3)
            .line_to(x + size * 0.5, y + size * 0.3)
            .close();
        path
    }

    pub fn paint(&self, size: f64) -> Paint {
        Paint::radial(
            self.offset,
            size,
            &[
                GradientStop::new(0.0, self.color),
                GradientStop::new(1.0, Color::TRANSPARENT),
            ],
        )
    }
}

/// Opacity of face `face` at time `t`; all prisms pulse in step.
pub fn face_alpha(face: usize, t: f64) -> f64 {
    0.6 + (t + face as f64).sin() * 0.2
}

/// One floating particle at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

pub fn particle(index: usize, size: Size, t: f64) -> Particle {
    let i = index as f64;
    Particle {
        center: Point::new(
            ((t * 0.5 + i).sin() * 0.5 + 0.5) * size.w(),
            ((t * 0.3 + i * 0.1).cos() * 0.5 + 0.5) * size.h(),
        ),
        radius: (t + i).sin() * 2.0 + 3.0,
        color: Color::hsl(300.0 + i * 10.0, 80.0, 60.0),
    }
}

/// Draw one prism frame at `t` seconds.
pub fn draw_prism<C: Canvas + ?Sized>(canvas: &mut C, size: Size, t: f64) {
    let (w, h) = (size.w(), size.h());
    canvas.clear(size);
    canvas.fill_rect(
        0.0,
        0.0,
        w,
        h,
        &Paint::Solid(Color::rgba(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0, 1.0)),
    );

    for index in 0..PRISM_COUNT {
        let prism = Prism::at(index, size, t);
        canvas.save();
        canvas.translate(w / 2.0, h / 2.0);
        canvas.rotate(prism.rotation);

        for (f, face) in prism.faces().iter().enumerate() {
            let triangle = face.triangle(prism.size);
            let paint = face.paint(prism.size);
            canvas.set_alpha(face_alpha(f, t));
            canvas.fill_path(&triangle, &paint);

            canvas.set_glow(Some(Glow {
                color: face.color,
                blur: GLOW_BLUR,
            }));
            canvas.fill_path(&triangle, &paint);
            canvas.set_glow(None);
        }

        canvas.restore();
    }

    canvas.set_alpha(PARTICLE_ALPHA);
    for index in 0..PARTICLE_COUNT {
        let p = particle(index, size, t);
        let mut dot = Path::with_capacity(1);
        dot.circle(p.center.x, p.center.y, p.radius);
        let paint = Paint::radial(
            p.center,
            p.radius,
            &[
                GradientStop::new(0.0, p.color),
                GradientStop::new(1.0, Color::TRANSPARENT),
            ],
        );
        canvas.fill_path(&dot, &paint);
    }

    canvas.set_alpha(1.0);
}

/// Full-viewport prism backdrop.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismBackground;

impl Effect for PrismBackground {
    fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C, size: Size, elapsed_ms: f64) {
        draw_prism(canvas, size, elapsed_ms / 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, PathCmd, RecordingCanvas};

    const SIZE: Size = Size::new(1000, 600);

    #[test]
    fn prisms_shrink_and_fan_out() {
        let sizes: Vec<f64> = (0..PRISM_COUNT).map(|i| Prism::at(i, SIZE, 0.0).size).collect();
        assert!((sizes[0] - 72.0).abs() < 1e-9);
        assert!(sizes[0] > sizes[1] && sizes[1] > sizes[2]);

        let r1 = Prism::at(1, SIZE, 0.0).rotation;
        assert!((r1 - PI / 3.0).abs() < 1e-12);
    }

    #[test]
    fn triangle_points_up_from_offset() {
        let face = Face {
            color: Color::WHITE,
            offset: Point::new(10.0, 20.0),
        };
        let tri = face.triangle(100.0);
        assert_eq!(tri.commands[0], PathCmd::MoveTo(10.0, -40.0));
        assert_eq!(tri.commands[1], PathCmd::LineTo(-40.0, 50.0));
        assert_eq!(tri.commands[2], PathCmd::LineTo(60.0, 50.0));
        assert_eq!(tri.commands[3], PathCmd::Close);
    }

    #[test]
    fn face_alpha_pulses_between_bounds() {
        for step in 0..100 {
            let a = face_alpha(step % FACES_PER_PRISM, step as f64 * 0.1);
            assert!((0.4..=0.8).contains(&a));
        }
    }

    #[test]
    fn particles_stay_on_surface() {
        for step in 0..20 {
            let t = step as f64 * 1.7;
            for index in 0..PARTICLE_COUNT {
                let p = particle(index, SIZE, t);
                assert!((0.0..=SIZE.w()).contains(&p.center.x));
                assert!((0.0..=SIZE.h()).contains(&p.center.y));
                assert!((1.0..=5.0).contains(&p.radius));
            }
        }
    }

    #[test]
    fn prism_transforms_are_balanced() {
        let mut canvas = RecordingCanvas::new();
        draw_prism(&mut canvas, SIZE, 3.0);

        let saves = canvas.ops.iter().filter(|op| **op == DrawOp::Save).count();
        let restores = canvas.ops.iter().filter(|op| **op == DrawOp::Restore).count();
        assert_eq!(saves, PRISM_COUNT);
        assert_eq!(restores, PRISM_COUNT);
        assert_eq!(
            canvas.fill_count(),
            1 + PRISM_COUNT * FACES_PER_PRISM * 2 + PARTICLE_COUNT
        );
    }
}
