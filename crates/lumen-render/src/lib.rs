//! Native rendering backend for Lumen effects.
//!
//! Turns effect frames into `vello::Scene` commands; presenting the scene
//! (wgpu surface, offscreen texture) is left to the caller.

pub mod paint;

pub use paint::{VelloCanvas, render_frame};
