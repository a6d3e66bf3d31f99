//! Browser implementation of the overlay platform.
//!
//! Frames come from `requestAnimationFrame`, time from `performance.now()`.
//! Viewport overlays follow `window` resize events; container overlays use
//! a `ResizeObserver` on their host element, since a container can change
//! size without the window doing so.

use lumen_core::canvas::Size;
use lumen_core::overlay::Platform;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, ResizeObserver, Window};

/// What the overlay covers and follows.
pub enum HostTarget {
    /// Full window, canvas appended to `<body>`.
    Viewport,
    /// A container element; the canvas is appended inside it.
    Element(HtmlElement),
}

/// Live resize subscription.
pub enum ResizeSubscription {
    Window,
    Observer(ResizeObserver),
    /// Subscribing failed; nothing to release.
    None,
}

pub struct BrowserHost {
    window: Window,
    canvas: HtmlCanvasElement,
    target: HostTarget,
    on_frame: Closure<dyn FnMut(f64)>,
    on_resize: Closure<dyn FnMut()>,
}

impl BrowserHost {
    pub fn new(
        window: Window,
        canvas: HtmlCanvasElement,
        target: HostTarget,
        on_frame: Closure<dyn FnMut(f64)>,
        on_resize: Closure<dyn FnMut()>,
    ) -> Self {
        Self {
            window,
            canvas,
            target,
            on_frame,
            on_resize,
        }
    }
}

impl Platform for BrowserHost {
    /// `None` when the browser refused the request.
    type Frame = Option<i32>;
    type Listener = ResizeSubscription;

    fn now(&self) -> f64 {
        self.window.performance().map_or_else(js_sys::Date::now, |p| p.now())
    }

    fn host_size(&self) -> Size {
        match &self.target {
            HostTarget::Viewport => {
                let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
                Size::from_layout(dim(self.window.inner_width()), dim(self.window.inner_height()))
            }
            HostTarget::Element(el) => {
                let rect = el.get_bounding_client_rect();
                Size::from_layout(rect.width(), rect.height())
            }
        }
    }

    fn attach(&mut self) {
        let parent: Option<HtmlElement> = match &self.target {
            HostTarget::Viewport => self.window.document().and_then(|d| d.body()),
            HostTarget::Element(el) => Some(el.clone()),
        };
        match parent {
            Some(parent) => {
                if let Err(e) = parent.append_child(&self.canvas) {
                    log::error!("could not attach overlay canvas: {e:?}");
                }
            }
            None => log::error!("no host element to attach overlay canvas to"),
        }
    }

    fn detach(&mut self) {
        self.canvas.remove();
    }

    fn resize_surface(&mut self, size: Size) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn request_frame(&mut self) -> Option<i32> {
        match self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, frame: Option<i32>) {
        if let Some(id) = frame {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    fn listen_resize(&mut self) -> ResizeSubscription {
        let callback = self.on_resize.as_ref().unchecked_ref();
        let subscribed = match &self.target {
            HostTarget::Viewport => self
                .window
                .add_event_listener_with_callback("resize", callback)
                .map(|()| ResizeSubscription::Window),
            HostTarget::Element(el) => ResizeObserver::new(callback).map(|observer| {
                observer.observe(el);
                ResizeSubscription::Observer(observer)
            }),
        };
        subscribed.unwrap_or_else(|e| {
            log::error!("could not subscribe to resize: {e:?}");
            ResizeSubscription::None
        })
    }

    fn unlisten_resize(&mut self, listener: ResizeSubscription) {
        match listener {
            ResizeSubscription::Window => {
                let _ = self.window.remove_event_listener_with_callback(
                    "resize",
                    self.on_resize.as_ref().unchecked_ref(),
                );
            }
            ResizeSubscription::Observer(observer) => observer.disconnect(),
            ResizeSubscription::None => {}
        }
    }
}
