//! WASM bridge for Lumen: exposes the four overlay widgets to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. Each widget mounts its own
//! `<canvas>`, runs its own `requestAnimationFrame` loop, and is torn down
//! with `destroy()`:
//!
//! ```js
//! const aurora = new AuroraBackground();
//! const sparks = new ClickSpark(document.querySelector("#card"), '{"sparkCount": 12}');
//! // ...
//! aurora.destroy();
//! sparks.destroy();
//! ```

mod canvas2d;
mod host;

use canvas2d::Canvas2d;
use host::{BrowserHost, HostTarget};
use lumen_core::overlay::{Effect, Overlay};
use lumen_core::spark::{SparkConfig, SparkField};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent};

/// Fixed behind page content; never intercepts input.
const BACKDROP_CSS: &str =
    "position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: -1; pointer-events: none;";

/// Covers its container; never intercepts input.
const CONTAINER_CSS: &str = "position: absolute; top: 0; left: 0; width: 100%; height: 100%; \
                             pointer-events: none; user-select: none;";

// ─── Shared widget plumbing ──────────────────────────────────────────────

/// The overlay lives behind `Rc<RefCell<Option<_>>>`: the browser callbacks
/// are created before the overlay exists and reach it through a `Weak`.
type Slot<E> = Rc<RefCell<Option<Overlay<E, BrowserHost>>>>;

struct Widget<E: Effect> {
    slot: Slot<E>,
    canvas: HtmlCanvasElement,
}

impl<E: Effect + 'static> Widget<E> {
    fn mount(effect: E, target: HostTarget, css: &str) -> Result<Self, JsValue> {
        console_error_panic_hook_setup();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.style().set_css_text(css);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D canvas context unavailable")?
            .dyn_into()?;

        let slot: Slot<E> = Rc::new(RefCell::new(None));

        let on_frame = {
            let weak = Rc::downgrade(&slot);
            let mut painter = Canvas2d::new(ctx);
            Closure::wrap(Box::new(move |_timestamp: f64| {
                with_overlay(&weak, |overlay| {
                    overlay.on_frame(&mut painter);
                });
            }) as Box<dyn FnMut(f64)>)
        };

        let on_resize = {
            let weak = Rc::downgrade(&slot);
            Closure::wrap(Box::new(move || {
                with_overlay(&weak, |overlay| overlay.on_resize());
            }) as Box<dyn FnMut()>)
        };

        let host = BrowserHost::new(window, canvas.clone(), target, on_frame, on_resize);
        *slot.borrow_mut() = Some(Overlay::mount(effect, host));

        Ok(Self { slot, canvas })
    }

    /// Returns `true` if this call tore the overlay down.
    fn destroy(&self) -> bool {
        self.slot
            .borrow_mut()
            .as_mut()
            .is_some_and(|overlay| overlay.destroy())
    }

    fn is_running(&self) -> bool {
        self.slot
            .borrow()
            .as_ref()
            .is_some_and(|overlay| overlay.is_running())
    }

    fn weak(&self) -> Weak<RefCell<Option<Overlay<E, BrowserHost>>>> {
        Rc::downgrade(&self.slot)
    }
}

impl<E: Effect> Drop for Widget<E> {
    fn drop(&mut self) {
        // The frame and resize closures die with the overlay; make sure the
        // browser is no longer holding them.
        if let Ok(mut slot) = self.slot.try_borrow_mut()
            && let Some(overlay) = slot.as_mut()
        {
            overlay.destroy();
        }
    }
}

fn with_overlay<E: Effect, R>(
    weak: &Weak<RefCell<Option<Overlay<E, BrowserHost>>>>,
    f: impl FnOnce(&mut Overlay<E, BrowserHost>) -> R,
) -> Option<R> {
    let slot = weak.upgrade()?;
    let mut slot = slot.borrow_mut();
    slot.as_mut().map(f)
}

// ─── Background widgets ──────────────────────────────────────────────────

/// Full-viewport aurora backdrop: layered wave gradients and twinkling stars.
#[wasm_bindgen]
pub struct AuroraBackground {
    widget: Widget<lumen_core::Aurora>,
}

#[wasm_bindgen]
impl AuroraBackground {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<AuroraBackground, JsValue> {
        let widget = Widget::mount(lumen_core::Aurora, HostTarget::Viewport, BACKDROP_CSS)?;
        Ok(Self { widget })
    }

    /// Stop the loop and remove the canvas. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.widget.destroy();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.widget.is_running()
    }
}

/// Full-viewport gradient backdrop with rotating, twirling wave strokes.
#[wasm_bindgen]
pub struct FloatingLines {
    widget: Widget<lumen_core::FloatingLines>,
}

#[wasm_bindgen]
impl FloatingLines {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<FloatingLines, JsValue> {
        let widget = Widget::mount(lumen_core::FloatingLines, HostTarget::Viewport, BACKDROP_CSS)?;
        Ok(Self { widget })
    }

    pub fn destroy(&mut self) {
        self.widget.destroy();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.widget.is_running()
    }
}

/// Full-viewport rotating prisms with floating particles.
#[wasm_bindgen]
pub struct PrismBackground {
    widget: Widget<lumen_core::PrismBackground>,
}

#[wasm_bindgen]
impl PrismBackground {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PrismBackground, JsValue> {
        let widget = Widget::mount(lumen_core::PrismBackground, HostTarget::Viewport, BACKDROP_CSS)?;
        Ok(Self { widget })
    }

    pub fn destroy(&mut self) {
        self.widget.destroy();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.widget.is_running()
    }
}

// ─── ClickSpark ──────────────────────────────────────────────────────────

/// Radial spark bursts on every click inside a container.
#[wasm_bindgen]
pub struct ClickSpark {
    widget: Widget<SparkField>,
    host: HtmlElement,
    on_click: Option<Closure<dyn FnMut(MouseEvent)>>,
}

#[wasm_bindgen]
impl ClickSpark {
    /// Mount on `host`. `config` is a JSON object (see `SparkConfig`);
    /// omitted keys take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(host: HtmlElement, config: Option<String>) -> Result<ClickSpark, JsValue> {
        let config = SparkConfig::from_json(config.as_deref().unwrap_or(""))
            .map_err(|e| JsValue::from_str(&e))?;
        log::debug!("click spark config: {config:?}");

        let widget = Widget::mount(
            SparkField::new(config),
            HostTarget::Element(host.clone()),
            CONTAINER_CSS,
        )?;

        let on_click = {
            let weak = widget.weak();
            let canvas = widget.canvas.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let y = event.client_y() as f64 - rect.top();
                with_overlay(&weak, |overlay| {
                    let at = overlay.elapsed_ms();
                    overlay.effect_mut().burst(x, y, at);
                });
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        host.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        Ok(Self {
            widget,
            host,
            on_click: Some(on_click),
        })
    }

    /// Stop the loop, stop listening for clicks and remove the canvas.
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(on_click) = self.on_click.take() {
            let _ = self
                .host
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }
        self.widget.destroy();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.widget.is_running()
    }

    /// Sparks currently in flight. Counts against the clock rather than the
    /// last drawn frame, so a throttled tab doesn't report expired sparks.
    pub fn active_sparks(&self) -> u32 {
        with_overlay(&self.widget.weak(), |overlay| {
            let now = overlay.elapsed_ms();
            overlay.effect().live_count(now) as u32
        })
        .unwrap_or(0)
    }
}

impl Drop for ClickSpark {
    fn drop(&mut self) {
        self.destroy();
    }
}

// ─── Standalone functions ────────────────────────────────────────────────

/// Validate a ClickSpark config. Returns JSON: `{"ok":true}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_spark_config(json: &str) -> String {
    match SparkConfig::from_json(json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e }).to_string(),
    }
}

/// Route `log` output to the browser console. `level` is one of `error`,
/// `warn`, `info`, `debug`, `trace` (default `info`). Only the first call
/// installs the logger.
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    let level = level
        .as_deref()
        .and_then(|l| l.parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);
    INIT.call_once(|| wasm_logger::init(wasm_logger::Config::new(level)));
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Lumen WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
