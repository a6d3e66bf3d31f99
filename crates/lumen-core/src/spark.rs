//! Click-triggered spark bursts.
//!
//! Every click spawns `spark_count` sparks at the click point, fanned evenly
//! around a full circle. Each frame moves them outward along their angle
//! (eased), shortens their trail, and drops the ones older than `duration`.
//! The active set has no cap: rapid clicks accumulate sparks until each one
//! expires on its own.

use crate::canvas::{Canvas, Paint, Path, Point, Size};
use crate::color::Color;
use crate::easing::Easing;
use crate::overlay::Effect;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Stroke width of every spark segment.
pub const SPARK_LINE_WIDTH: f64 = 2.0;

/// Burst configuration. Every field has a default, so `{}` is a valid
/// config and partial JSON objects fill in the rest.
///
/// Values are not validated: a zero `spark_count` spawns nothing, and a
/// non-positive `duration` expires sparks on the first frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparkConfig {
    pub spark_color: Color,
    pub spark_size: f64,
    pub spark_radius: f64,
    pub spark_count: u32,
    /// Lifetime of one spark, milliseconds.
    pub duration: f64,
    pub easing: Easing,
    pub extra_scale: f64,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            spark_color: Color::WHITE,
            spark_size: 10.0,
            spark_radius: 15.0,
            spark_count: 8,
            duration: 400.0,
            easing: Easing::EaseOut,
            extra_scale: 1.0,
        }
    }
}

impl SparkConfig {
    /// Parse a JSON object. Blank input means "all defaults".
    pub fn from_json(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| format!("invalid spark config: {e}"))
    }
}

/// One spark: where it started, which way it flies, when it was born.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub origin: Point,
    pub angle: f64,
    pub created_at: f64,
}

impl Spark {
    pub fn age(&self, now: f64) -> f64 {
        now - self.created_at
    }
}

/// The visible stroke of a spark at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkSegment {
    pub from: Point,
    pub to: Point,
}

/// The active spark set plus the config that shapes it.
#[derive(Debug, Clone, Default)]
pub struct SparkField {
    config: SparkConfig,
    sparks: Vec<Spark>,
}

impl SparkField {
    pub fn new(config: SparkConfig) -> Self {
        Self {
            config,
            sparks: Vec::new(),
        }
    }

    pub fn config(&self) -> &SparkConfig {
        &self.config
    }

    /// Spawn one burst at `(x, y)` (surface coordinates) at time `at`.
    pub fn burst(&mut self, x: f64, y: f64, at: f64) {
        let count = self.config.spark_count;
        let origin = Point::new(x, y);
        self.sparks.extend((0..count).map(|i| Spark {
            origin,
            angle: TAU * i as f64 / count as f64,
            created_at: at,
        }));
        log::trace!("burst of {count} at ({x:.1}, {y:.1}), {} active", self.sparks.len());
    }

    /// Drop every spark whose age has reached the configured duration.
    pub fn advance(&mut self, now: f64) {
        let duration = self.config.duration;
        self.sparks.retain(|s| s.age(now) < duration);
    }

    pub fn active(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    /// Sparks still alive at `now`, whether or not a frame has pruned the
    /// expired ones yet.
    pub fn live_count(&self, now: f64) -> usize {
        let duration = self.config.duration;
        self.sparks.iter().filter(|s| s.age(now) < duration).count()
    }

    /// Eased progress of a spark in [0, 1].
    pub fn eased_progress(&self, spark: &Spark, now: f64) -> f64 {
        let progress = (spark.age(now) / self.config.duration).clamp(0.0, 1.0);
        self.config.easing.apply(progress)
    }

    /// Where the spark's stroke lies at `now`: it starts `distance` from the
    /// origin and extends by a trail that shrinks to nothing.
    pub fn segment(&self, spark: &Spark, now: f64) -> SparkSegment {
        let eased = self.eased_progress(spark, now);
        let distance = eased * self.config.spark_radius * self.config.extra_scale;
        let trail = self.config.spark_size * (1.0 - eased);

        let (sin, cos) = spark.angle.sin_cos();
        let along = |d: f64| Point::new(spark.origin.x + d * cos, spark.origin.y + d * sin);
        SparkSegment {
            from: along(distance),
            to: along(distance + trail),
        }
    }
}

impl Effect for SparkField {
    fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C, size: Size, elapsed_ms: f64) {
        canvas.clear(size);
        self.advance(elapsed_ms);
        if self.sparks.is_empty() {
            return;
        }

        let paint = Paint::Solid(self.config.spark_color);
        for spark in &self.sparks {
            let seg = self.segment(spark, elapsed_ms);
            let mut path = Path::with_capacity(2);
            path.move_to(seg.from.x, seg.from.y).line_to(seg.to.x, seg.to.y);
            canvas.stroke_path(&path, &paint, SPARK_LINE_WIDTH);
        }
    }
}
