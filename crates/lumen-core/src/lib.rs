pub mod aurora;
pub mod canvas;
pub mod clock;
pub mod color;
pub mod easing;
pub mod floating_lines;
pub mod overlay;
pub mod prism;
pub mod spark;

pub use aurora::Aurora;
pub use canvas::{Canvas, DrawOp, Glow, GradientStop, Paint, Path, PathCmd, Point, RecordingCanvas, Size};
pub use clock::Clock;
pub use color::Color;
pub use easing::Easing;
pub use floating_lines::FloatingLines;
pub use overlay::{Effect, Overlay, Platform};
pub use prism::PrismBackground;
pub use spark::{Spark, SparkConfig, SparkField, SparkSegment};
