//! Canvas2D backend.
//!
//! Forwards effect draw calls to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. Paints become fill/stroke styles; gradients
//! are built per call because Canvas2D gradients are bound to coordinates.

use lumen_core::canvas::{Canvas, Glow, Paint, Path, PathCmd, Size};
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn trace(&self, path: &Path) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for cmd in &path.commands {
            match *cmd {
                PathCmd::MoveTo(x, y) => ctx.move_to(x, y),
                PathCmd::LineTo(x, y) => ctx.line_to(x, y),
                PathCmd::Arc {
                    cx,
                    cy,
                    radius,
                    start,
                    end,
                } => {
                    // Only fails on a negative radius.
                    let _ = ctx.arc(cx, cy, radius.max(0.0), start, end);
                }
                PathCmd::Close => ctx.close_path(),
            }
        }
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        let (grad, stops) = match paint {
            Paint::Solid(_) => return None,
            Paint::Linear { from, to, stops } => (
                self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y),
                stops,
            ),
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                stops,
            } => (
                self.ctx
                    .create_radial_gradient(
                        center.x,
                        center.y,
                        *inner_radius,
                        center.x,
                        center.y,
                        *outer_radius,
                    )
                    .ok()?,
                stops,
            ),
        };
        for stop in stops {
            let _ = grad.add_color_stop(stop.offset, &stop.color.to_hex());
        }
        Some(grad)
    }

    fn apply_fill(&self, paint: &Paint) {
        match (paint, self.gradient(paint)) {
            (_, Some(grad)) => self.ctx.set_fill_style_canvas_gradient(&grad),
            (Paint::Solid(c), None) => self.ctx.set_fill_style_str(&c.to_hex()),
            // Radial gradient with a negative radius.
            (other, None) => self.ctx.set_fill_style_str(&other.dominant_color().to_hex()),
        }
    }

    fn apply_stroke(&self, paint: &Paint) {
        match (paint, self.gradient(paint)) {
            (_, Some(grad)) => self.ctx.set_stroke_style_canvas_gradient(&grad),
            (Paint::Solid(c), None) => self.ctx.set_stroke_style_str(&c.to_hex()),
            (other, None) => self.ctx.set_stroke_style_str(&other.dominant_color().to_hex()),
        }
    }
}

impl Canvas for Canvas2d {
    fn clear(&mut self, size: Size) {
        self.ctx.clear_rect(0.0, 0.0, size.w(), size.h());
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        self.apply_fill(paint);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.trace(path);
        self.apply_fill(paint);
        self.ctx.fill();
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, line_width: f64) {
        self.trace(path);
        self.apply_stroke(paint);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        match glow {
            Some(glow) => {
                self.ctx.set_shadow_color(&glow.color.to_hex());
                self.ctx.set_shadow_blur(glow.blur);
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        let _ = self.ctx.translate(x, y);
    }

    fn rotate(&mut self, angle: f64) {
        let _ = self.ctx.rotate(angle);
    }
}
