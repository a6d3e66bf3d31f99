//! Effect draw calls → Vello scene commands.
//!
//! [`VelloCanvas`] implements the core `Canvas` trait on top of a
//! `vello::Scene`, so any effect can be rendered outside the browser.
//! Canvas2D state (transform, global alpha, glow) is tracked here and baked
//! into each fill or stroke, since a Vello scene is stateless.

use kurbo::{Affine, Arc as KurboArc, BezPath, Point as KurboPoint, Rect, Shape, Stroke as KurboStroke, Vec2};
use lumen_core::canvas::{Canvas, Glow, GradientStop, Paint, Path, PathCmd, Size};
use lumen_core::color::Color;
use lumen_core::overlay::Effect;
use peniko::{Brush, ColorStop, Fill, Gradient, Mix};
use vello::Scene;

/// Flattening tolerance for arcs, in pixels.
const ARC_TOLERANCE: f64 = 0.1;

/// Canvas2D-style drawing state, pushed by `save` and popped by `restore`.
#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Affine,
    alpha: f32,
    glow: Option<Glow>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            glow: None,
        }
    }
}

/// A `Canvas` that appends to a Vello scene.
///
/// The caller owns the scene and resets it between frames; `clear` is a
/// no-op because a freshly reset scene is already transparent.
pub struct VelloCanvas<'a> {
    scene: &'a mut Scene,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl<'a> VelloCanvas<'a> {
    pub fn new(scene: &'a mut Scene) -> Self {
        Self {
            scene,
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    fn fill_shape<S: Shape>(&mut self, shape: &S, paint: &Paint) {
        let transform = self.state.transform;
        let alpha = self.state.alpha;
        if alpha <= 0.0 {
            return;
        }

        // The halo spills past the shape, so it goes down before the layer
        // that clips the fill, with the layer alpha folded into its color.
        if let Some(glow) = self.state.glow {
            for halo in glow_halo(shape, glow, alpha) {
                self.scene
                    .stroke(&halo.stroke, transform, to_color(halo.color), None, &halo.path);
            }
        }

        let layered = alpha < 1.0;
        if layered {
            self.scene.push_layer(Mix::Normal, alpha, transform, shape);
        }
        let brush = to_brush(paint);
        self.scene.fill(Fill::NonZero, transform, &brush, None, shape);
        if layered {
            self.scene.pop_layer();
        }
    }
}

impl Canvas for VelloCanvas<'_> {
    fn clear(&mut self, size: Size) {
        log::trace!("vello clear {}×{} (scene reset by caller)", size.width, size.height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        let rect = Rect::new(x, y, x + width, y + height);
        self.fill_shape(&rect, paint);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        if path.is_empty() {
            return;
        }
        let bez = to_bez_path(path);
        self.fill_shape(&bez, paint);
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, line_width: f64) {
        if path.is_empty() || self.state.alpha <= 0.0 {
            return;
        }
        let bez = to_bez_path(path);
        let transform = self.state.transform;
        let alpha = self.state.alpha;
        let stroke = KurboStroke::new(line_width);
        let brush = to_brush(paint);

        if alpha < 1.0 {
            // Clip to the stroke outline so the layer only covers the line.
            let outline = kurbo::stroke(bez.iter(), &stroke, &Default::default(), ARC_TOLERANCE);
            self.scene.push_layer(Mix::Normal, alpha, transform, &outline);
            self.scene.stroke(&stroke, transform, &brush, None, &bez);
            self.scene.pop_layer();
        } else {
            self.scene.stroke(&stroke, transform, &brush, None, &bez);
        }
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0) as f32;
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.state.glow = glow.filter(|g| g.blur > 0.0);
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        // Canvas2D ignores unbalanced restores.
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.state.transform = self.state.transform * Affine::translate((x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.state.transform = self.state.transform * Affine::rotate(angle);
    }
}

/// Render one frame of `effect` into `scene`.
///
/// Call once per frame with a freshly reset `Scene`.
pub fn render_frame<E: Effect>(effect: &mut E, scene: &mut Scene, size: Size, elapsed_ms: f64) {
    let mut canvas = VelloCanvas::new(scene);
    effect.render(&mut canvas, size, elapsed_ms);
    if canvas.depth() != 0 {
        log::warn!("frame ended with {} unrestored saves", canvas.depth());
    }
}

// ─── Glow ────────────────────────────────────────────────────────────────

/// One faint stroke of a glow halo.
struct HaloStroke {
    stroke: KurboStroke,
    color: Color,
    path: BezPath,
}

/// Vello has no shadow blur; a soft halo is approximated with two wide,
/// faint strokes of the glow color centered on the outline. `alpha` is the
/// current global alpha.
fn glow_halo<S: Shape>(shape: &S, glow: Glow, alpha: f32) -> [HaloStroke; 2] {
    let path = shape.to_path(ARC_TOLERANCE);
    [(1.0, 0.15_f32), (0.5, 0.3)].map(|(width_factor, strength)| HaloStroke {
        stroke: KurboStroke::new(glow.blur * width_factor),
        color: glow.color.with_alpha(glow.color.a * strength * alpha),
        path: path.clone(),
    })
}

// ─── Conversions ─────────────────────────────────────────────────────────

pub fn to_color(c: Color) -> peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    peniko::Color::from_rgba8(r, g, b, a)
}

fn to_stops(stops: &[GradientStop]) -> Vec<ColorStop> {
    stops
        .iter()
        .map(|s| ColorStop::from((s.offset, to_color(s.color))))
        .collect()
}

pub fn to_brush(paint: &Paint) -> Brush {
    match paint {
        Paint::Solid(c) => Brush::Solid(to_color(*c)),
        Paint::Linear { from, to, stops } => {
            Gradient::new_linear((from.x, from.y), (to.x, to.y))
                .with_stops(to_stops(stops).as_slice())
                .into()
        }
        Paint::Radial {
            center,
            inner_radius,
            outer_radius,
            stops,
        } => Gradient::new_two_point_radial(
            (center.x, center.y),
            *inner_radius as f32,
            (center.x, center.y),
            *outer_radius as f32,
        )
        .with_stops(to_stops(stops).as_slice())
        .into(),
    }
}

pub fn to_bez_path(path: &Path) -> BezPath {
    let mut bez = BezPath::new();
    let mut has_current_point = false;

    for cmd in &path.commands {
        match *cmd {
            PathCmd::MoveTo(x, y) => {
                bez.move_to((x, y));
                has_current_point = true;
            }
            PathCmd::LineTo(x, y) => {
                if has_current_point {
                    bez.line_to((x, y));
                } else {
                    bez.move_to((x, y));
                    has_current_point = true;
                }
            }
            PathCmd::Arc {
                cx,
                cy,
                radius,
                start,
                end,
            } => {
                let arc = KurboArc {
                    center: KurboPoint::new(cx, cy),
                    radii: Vec2::new(radius, radius),
                    start_angle: start,
                    sweep_angle: end - start,
                    x_rotation: 0.0,
                };
                if has_current_point {
                    // Canvas2D joins the current point to the arc start.
                    bez.line_to((cx + radius * start.cos(), cy + radius * start.sin()));
                    bez.extend(arc.append_iter(ARC_TOLERANCE));
                } else {
                    bez.extend(arc.path_elements(ARC_TOLERANCE));
                    has_current_point = true;
                }
            }
            PathCmd::Close => {
                bez.close_path();
            }
        }
    }

    bez
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_channels_map_to_8bit() {
        let c = to_color(Color::from_hex("#e947f5").unwrap());
        let expected = [0xE9 as f32 / 255.0, 0x47 as f32 / 255.0, 0xF5 as f32 / 255.0, 1.0];
        for (got, want) in c.components.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "{got} vs {want}");
        }
    }

    #[test]
    fn polyline_converts_verbatim() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0).close();
        let bez = to_bez_path(&path);
        let els: Vec<PathEl> = bez.elements().to_vec();
        assert_eq!(els.len(), 4);
        assert_eq!(els[0], PathEl::MoveTo(KurboPoint::new(0.0, 0.0)));
        assert_eq!(els[3], PathEl::ClosePath);
    }

    #[test]
    fn circle_bounds_match_radius() {
        let mut path = Path::new();
        path.circle(50.0, 40.0, 10.0);
        let bbox = to_bez_path(&path).bounding_box();
        assert!((bbox.x0 - 40.0).abs() < 0.5);
        assert!((bbox.x1 - 60.0).abs() < 0.5);
        assert!((bbox.y0 - 30.0).abs() < 0.5);
        assert!((bbox.y1 - 50.0).abs() < 0.5);
    }

    #[test]
    fn leading_line_to_starts_subpath() {
        let mut path = Path::new();
        path.line_to(3.0, 4.0).line_to(5.0, 6.0);
        let bez = to_bez_path(&path);
        assert_eq!(bez.elements()[0], PathEl::MoveTo(KurboPoint::new(3.0, 4.0)));
    }

    #[test]
    fn glow_halo_reaches_past_the_shape() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let glow = Glow {
            color: Color::WHITE,
            blur: 30.0,
        };
        let halo = glow_halo(&rect, glow, 0.3);

        let outer = &halo[0];
        let outline = kurbo::stroke(
            outer.path.iter(),
            &outer.stroke,
            &Default::default(),
            ARC_TOLERANCE,
        );
        let bbox = outline.bounding_box();
        assert!(bbox.x0 <= -14.9 && bbox.y0 <= -14.9, "{bbox:?}");
        assert!(bbox.x1 >= 114.9 && bbox.y1 >= 64.9, "{bbox:?}");

        // Global alpha is folded into the halo color.
        assert!((outer.color.a - 0.15 * 0.3).abs() < 1e-6);
        assert!((halo[1].color.a - 0.3 * 0.3).abs() < 1e-6);
    }

    #[test]
    fn save_restore_roundtrips_transform() {
        let mut scene = Scene::new();
        let mut canvas = VelloCanvas::new(&mut scene);
        canvas.save();
        canvas.translate(100.0, 50.0);
        canvas.rotate(0.5);
        assert_ne!(canvas.transform(), Affine::IDENTITY);
        canvas.restore();
        assert_eq!(canvas.transform(), Affine::IDENTITY);
        assert_eq!(canvas.depth(), 0);

        // Extra restore is ignored.
        canvas.restore();
        assert_eq!(canvas.depth(), 0);
    }
}
