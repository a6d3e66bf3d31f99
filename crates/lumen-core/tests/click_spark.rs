//! Integration tests: spark bursts driven through the overlay lifecycle.
//!
//! Clicks and frames share the overlay clock, the way the browser bridge
//! stamps them.

mod common;

use common::ManualHost;
use lumen_core::canvas::RecordingCanvas;
use lumen_core::spark::{SparkConfig, SparkField};
use lumen_core::{Easing, Overlay};
use std::f64::consts::TAU;

type SparkOverlay = Overlay<SparkField, ManualHost>;

fn mount(config: SparkConfig) -> SparkOverlay {
    let mut host = ManualHost::new(200, 100);
    host.now = 10_000.0;
    Overlay::mount(SparkField::new(config), host)
}

fn click(overlay: &mut SparkOverlay, x: f64, y: f64) {
    let at = overlay.elapsed_ms();
    overlay.effect_mut().burst(x, y, at);
}

fn advance_to(overlay: &mut SparkOverlay, canvas: &mut RecordingCanvas, elapsed: f64) {
    overlay.platform_mut().now = 10_000.0 + elapsed;
    assert!(overlay.platform_mut().fire_frame());
    assert!(overlay.on_frame(canvas));
}

// ─── Scenario ───────────────────────────────────────────────────────────

#[test]
fn burst_lives_for_exactly_its_duration() {
    let mut overlay = mount(SparkConfig {
        spark_count: 8,
        duration: 400.0,
        ..Default::default()
    });
    let mut canvas = RecordingCanvas::new();

    click(&mut overlay, 50.0, 50.0);
    assert_eq!(overlay.effect().len(), 8);

    advance_to(&mut overlay, &mut canvas, 399.0);
    assert_eq!(overlay.effect().len(), 8);
    assert_eq!(canvas.stroke_count(), 8);

    canvas.take();
    advance_to(&mut overlay, &mut canvas, 401.0);
    assert_eq!(overlay.effect().len(), 0);
    assert_eq!(canvas.stroke_count(), 0);

    overlay.destroy();
}

#[test]
fn live_count_follows_clock_when_frames_stall() {
    let mut overlay = mount(SparkConfig {
        spark_count: 8,
        duration: 400.0,
        ..Default::default()
    });

    click(&mut overlay, 50.0, 50.0);

    // Frames stop firing (hidden tab); time keeps moving.
    overlay.platform_mut().now = 10_000.0 + 450.0;
    let now = overlay.elapsed_ms();
    assert_eq!(overlay.effect().len(), 8);
    assert_eq!(overlay.effect().live_count(now), 0);

    overlay.destroy();
}

#[test]
fn click_spawns_k_sparks_at_even_angles() {
    for k in [1_u32, 3, 8, 13] {
        let mut overlay = mount(SparkConfig {
            spark_count: k,
            ..Default::default()
        });
        click(&mut overlay, 20.0, 30.0);

        let sparks = overlay.effect().active();
        assert_eq!(sparks.len(), k as usize);
        for (i, spark) in sparks.iter().enumerate() {
            let expected = TAU * i as f64 / k as f64;
            assert!((spark.angle - expected).abs() < 1e-12, "k={k} i={i}");
        }
        overlay.destroy();
    }
}

#[test]
fn presence_flips_exactly_at_duration() {
    let duration = 250.0;
    let mut field = SparkField::new(SparkConfig {
        spark_count: 2,
        duration,
        ..Default::default()
    });
    let created = 1_000.0;

    for offset in [0.0, 1.0, 100.0, 249.0, 249.999] {
        let mut probe = field.clone();
        probe.burst(0.0, 0.0, created);
        probe.advance(created + offset);
        assert_eq!(probe.len(), 2, "should be alive at +{offset}");
    }
    for offset in [250.0, 250.001, 300.0, 10_000.0] {
        let mut probe = field.clone();
        probe.burst(0.0, 0.0, created);
        probe.advance(created + offset);
        assert!(probe.is_empty(), "should be gone at +{offset}");
    }

    field.burst(0.0, 0.0, created);
    assert_eq!(field.len(), 2);
}

#[test]
fn later_clicks_outlive_earlier_ones() {
    let mut overlay = mount(SparkConfig {
        spark_count: 4,
        duration: 300.0,
        easing: Easing::Linear,
        ..Default::default()
    });
    let mut canvas = RecordingCanvas::new();

    click(&mut overlay, 10.0, 10.0);
    advance_to(&mut overlay, &mut canvas, 200.0);
    click(&mut overlay, 90.0, 40.0);
    assert_eq!(overlay.effect().len(), 8);

    advance_to(&mut overlay, &mut canvas, 320.0);
    let left = overlay.effect().active();
    assert_eq!(left.len(), 4);
    assert!(left.iter().all(|s| s.origin.x == 90.0 && s.created_at == 200.0));

    advance_to(&mut overlay, &mut canvas, 500.0);
    assert!(overlay.effect().is_empty());
    overlay.destroy();
}

#[test]
fn container_resize_is_seen_by_next_frame() {
    let mut overlay = mount(SparkConfig::default());
    let mut canvas = RecordingCanvas::new();

    overlay.platform_mut().size = lumen_core::Size::new(480, 360);
    overlay.on_resize();
    assert_eq!(overlay.surface(), lumen_core::Size::new(480, 360));

    advance_to(&mut overlay, &mut canvas, 16.0);
    assert_eq!(
        canvas.ops[0],
        lumen_core::DrawOp::Clear(lumen_core::Size::new(480, 360))
    );
    overlay.destroy();
}

#[test]
fn destroy_stops_the_spark_loop() {
    let mut overlay = mount(SparkConfig::default());
    let mut canvas = RecordingCanvas::new();
    advance_to(&mut overlay, &mut canvas, 16.0);

    assert!(overlay.destroy());
    assert!(overlay.platform().pending_frames.is_empty());
    assert_eq!(overlay.platform().resize_listeners, 0);
    assert!(!overlay.platform().attached);

    assert!(!overlay.destroy());
    assert!(overlay.platform().pending_frames.is_empty());
}
