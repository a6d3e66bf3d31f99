//! The animated-overlay lifecycle every widget shares.
//!
//! An [`Overlay`] owns one surface, one clock and the host resources that
//! keep it alive: the pending frame request and the resize subscription.
//! The host calls [`Overlay::on_frame`] whenever a requested frame fires and
//! [`Overlay::on_resize`] whenever the host element changes size. Each frame
//! re-requests the next one, so the loop runs until [`Overlay::destroy`]
//! cancels the pending request.
//!
//! ```text
//!   mount ──► attach, size, listen, request ──► on_frame ─┐
//!                                                 ▲       │ draw, request
//!                                                 └───────┘
//!   destroy ──► cancel pending frame, unlisten, detach   (idempotent)
//! ```

use crate::canvas::{Canvas, Size};
use crate::clock::Clock;

/// Host primitives an overlay needs. The browser bridge implements this
/// over `window`; tests implement it with counters.
pub trait Platform {
    /// Handle for a requested frame (`requestAnimationFrame` id).
    type Frame;
    /// Handle for a resize subscription.
    type Listener;

    /// Monotonic clock, milliseconds.
    fn now(&self) -> f64;

    /// Current layout size of the host (viewport or container).
    fn host_size(&self) -> Size;

    /// Insert the surface into the page.
    fn attach(&mut self);

    /// Remove the surface from the page.
    fn detach(&mut self);

    /// Set the surface's pixel dimensions (`<canvas>` width and height).
    fn resize_surface(&mut self, size: Size);

    fn request_frame(&mut self) -> Self::Frame;

    fn cancel_frame(&mut self, frame: Self::Frame);

    fn listen_resize(&mut self) -> Self::Listener;

    fn unlisten_resize(&mut self, listener: Self::Listener);
}

/// Something that draws one frame.
pub trait Effect {
    /// Draw the frame for `elapsed_ms` since the widget's clock started onto
    /// a surface of `size`.
    fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C, size: Size, elapsed_ms: f64);
}

/// A running (or torn-down) effect bound to a platform.
pub struct Overlay<E, P: Platform> {
    effect: E,
    platform: P,
    clock: Clock,
    surface: Size,
    pending_frame: Option<P::Frame>,
    resize_listener: Option<P::Listener>,
    attached: bool,
    running: bool,
    frames_drawn: u64,
}

impl<E: Effect, P: Platform> Overlay<E, P> {
    /// Attach the surface, size it to the host, subscribe to resizes and
    /// request the first frame.
    pub fn mount(effect: E, mut platform: P) -> Self {
        platform.attach();
        let surface = platform.host_size();
        platform.resize_surface(surface);
        let clock = Clock::started_at(platform.now());
        let resize_listener = Some(platform.listen_resize());
        let pending_frame = Some(platform.request_frame());

        log::debug!(
            "overlay mounted at {}×{} (t0 = {:.1}ms)",
            surface.width,
            surface.height,
            clock.start_ms()
        );

        Self {
            effect,
            platform,
            clock,
            surface,
            pending_frame,
            resize_listener,
            attached: true,
            running: true,
            frames_drawn: 0,
        }
    }

    /// A requested frame fired. Draws and requests the next one.
    ///
    /// Returns `false` (and draws nothing) once the overlay is destroyed.
    pub fn on_frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> bool {
        // The request that brought us here has been consumed.
        self.pending_frame = None;
        if !self.running {
            return false;
        }

        self.sync_surface();
        let elapsed = self.clock.elapsed_ms(self.platform.now());
        self.effect.render(canvas, self.surface, elapsed);
        self.frames_drawn += 1;

        self.pending_frame = Some(self.platform.request_frame());
        true
    }

    /// The host reported a size change.
    pub fn on_resize(&mut self) {
        if self.running {
            self.sync_surface();
        }
    }

    /// Stop the loop, drop the resize subscription and detach the surface.
    ///
    /// Returns `true` if this call did the teardown; later calls are no-ops
    /// and return `false`.
    pub fn destroy(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;

        if let Some(frame) = self.pending_frame.take() {
            self.platform.cancel_frame(frame);
        }
        if let Some(listener) = self.resize_listener.take() {
            self.platform.unlisten_resize(listener);
        }
        if self.attached {
            self.platform.detach();
            self.attached = false;
        }

        log::debug!("overlay destroyed after {} frames", self.frames_drawn);
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.resize_listener.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Surface size the last frame (or resize) synced to.
    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Milliseconds on this overlay's clock right now.
    pub fn elapsed_ms(&self) -> f64 {
        self.clock.elapsed_ms(self.platform.now())
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    fn sync_surface(&mut self) {
        let size = self.platform.host_size();
        if size != self.surface {
            log::debug!(
                "surface resized {}×{} → {}×{}",
                self.surface.width,
                self.surface.height,
                size.width,
                size.height
            );
            self.surface = size;
            self.platform.resize_surface(size);
        }
    }
}

impl<E, P: Platform> Drop for Overlay<E, P> {
    fn drop(&mut self) {
        // Dropping without destroy would leave the host holding a frame
        // request and a listener for an overlay that no longer exists.
        if self.running {
            log::warn!("overlay dropped without destroy()");
        }
    }
}
