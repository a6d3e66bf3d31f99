//! Integration tests: every effect renders into a Vello scene.

use lumen_core::spark::{SparkConfig, SparkField};
use lumen_core::{Aurora, FloatingLines, PrismBackground, Size};
use lumen_render::render_frame;
use vello::Scene;

const SIZE: Size = Size::new(640, 360);

#[test]
fn backgrounds_emit_geometry() {
    let mut scene = Scene::new();
    render_frame(&mut Aurora, &mut scene, SIZE, 1_000.0);
    assert!(!scene.encoding().is_empty(), "aurora");

    scene.reset();
    render_frame(&mut FloatingLines, &mut scene, SIZE, 1_000.0);
    assert!(!scene.encoding().is_empty(), "floating lines");

    scene.reset();
    render_frame(&mut PrismBackground, &mut scene, SIZE, 1_000.0);
    assert!(!scene.encoding().is_empty(), "prism");
}

#[test]
fn idle_sparks_emit_nothing() {
    let mut sparks = SparkField::new(SparkConfig::default());
    let mut scene = Scene::new();
    render_frame(&mut sparks, &mut scene, SIZE, 0.0);
    assert!(scene.encoding().is_empty());

    sparks.burst(100.0, 100.0, 0.0);
    render_frame(&mut sparks, &mut scene, SIZE, 50.0);
    assert!(!scene.encoding().is_empty());
}
