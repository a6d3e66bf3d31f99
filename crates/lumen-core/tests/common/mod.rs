//! Simulated host for driving overlays from tests.

use lumen_core::{Platform, Size};

/// A host with a hand-advanced clock and a settable size. Frame and
/// listener bookkeeping mirrors what a browser would hold.
#[derive(Debug, Default)]
pub struct ManualHost {
    pub now: f64,
    pub size: Size,
    pub attached: bool,
    /// Pixel size last pushed to the surface.
    pub surface: Size,
    pub pending_frames: Vec<u32>,
    pub resize_listeners: usize,
    next_frame: u32,
}

impl ManualHost {
    pub fn new(width: u32, height: u32) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            size: Size::new(width, height),
            ..Default::default()
        }
    }

    /// Consume the oldest pending frame request. Returns false if none.
    pub fn fire_frame(&mut self) -> bool {
        if self.pending_frames.is_empty() {
            return false;
        }
        self.pending_frames.remove(0);
        true
    }
}

impl Platform for ManualHost {
    type Frame = u32;
    type Listener = ();

    fn now(&self) -> f64 {
        self.now
    }

    fn host_size(&self) -> Size {
        self.size
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn resize_surface(&mut self, size: Size) {
        self.surface = size;
    }

    fn request_frame(&mut self) -> u32 {
        self.next_frame += 1;
        self.pending_frames.push(self.next_frame);
        self.next_frame
    }

    fn cancel_frame(&mut self, frame: u32) {
        self.pending_frames.retain(|f| *f != frame);
    }

    fn listen_resize(&mut self) {
        self.resize_listeners += 1;
    }

    fn unlisten_resize(&mut self, _: ()) {
        self.resize_listeners -= 1;
    }
}
