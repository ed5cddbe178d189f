//! Browser glue
//!
//! Every handle here owns its JS closure and unregisters it on drop, so a
//! torn-down toy never receives another callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, HtmlElement};

use crate::interaction::{CanvasRect, ColorPicker};
use crate::palette::FillColor;

/// An event listener removed when dropped
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Option<Self>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to add {} listener: {:?}", event, e);
            return None;
        }
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// A `setInterval` timer cleared when dropped
pub struct Interval {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new<F>(period_ms: i32, callback: F) -> Option<Self>
    where
        F: FnMut() + 'static,
    {
        let window = web_sys::window()?;
        let closure = Closure::<dyn FnMut()>::new(callback);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .ok()?;
        Some(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop stopped when dropped
pub struct AnimationLoop {
    callback: FrameCallback,
    handle: Rc<Cell<i32>>,
    running: Rc<Cell<bool>>,
}

impl AnimationLoop {
    /// Calls `frame` with the rAF timestamp (ms) on every display refresh
    pub fn start<F>(mut frame: F) -> Option<Self>
    where
        F: FnMut(f64) + 'static,
    {
        let window = web_sys::window()?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(0));
        let running = Rc::new(Cell::new(true));

        {
            let next = callback.clone();
            let handle = handle.clone();
            let running = running.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                if !running.get() {
                    return;
                }
                frame(time);
                if let (Some(window), Some(cb)) = (web_sys::window(), next.borrow().as_ref()) {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        handle.set(id);
                    }
                }
            }));
        }

        let first = {
            let cb = callback.borrow();
            let cb = cb.as_ref()?;
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .ok()?
        };
        handle.set(first);

        Some(Self {
            callback,
            handle,
            running,
        })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.running.set(false);
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(self.handle.get());
        }
        // Breaks the closure's reference to itself
        self.callback.borrow_mut().take();
    }
}

/// On-screen origin of the canvas content box (inside any CSS border)
pub fn canvas_rect(canvas: &HtmlCanvasElement) -> CanvasRect {
    let rect = canvas.get_bounding_client_rect();
    CanvasRect::new(rect.left() as f32, rect.top() as f32)
        .inset(canvas.client_left() as f32, canvas.client_top() as f32)
}

/// Color menu backed by DOM elements: one swatch per palette entry
pub struct DomColorPicker {
    menu: Element,
    swatches: Vec<(FillColor, Element)>,
}

impl DomColorPicker {
    /// Build the (hidden) menu under `parent`
    pub fn new(document: &Document, parent: &Element, palette: &[FillColor]) -> Option<Self> {
        let menu = document.create_element("div").ok()?;
        menu.set_attribute("class", "color-menu hidden").ok()?;

        let mut swatches = Vec::with_capacity(palette.len());
        for &color in palette {
            let swatch = document.create_element("div").ok()?;
            swatch.set_attribute("class", "color-option").ok()?;
            swatch.set_attribute("data-color", color.as_str()).ok()?;
            if let Some(el) = swatch.dyn_ref::<HtmlElement>() {
                let _ = el.style().set_property("background-color", color.as_str());
            }
            menu.append_child(&swatch).ok()?;
            swatches.push((color, swatch));
        }

        parent.append_child(&menu).ok()?;
        Some(Self { menu, swatches })
    }

    /// Swatch elements with the color each one picks
    pub fn swatches(&self) -> impl Iterator<Item = (FillColor, &Element)> {
        self.swatches.iter().map(|(c, el)| (*c, el))
    }
}

impl ColorPicker for DomColorPicker {
    fn show(&mut self, palette: &[FillColor]) {
        for (color, swatch) in &self.swatches {
            let class = if palette.contains(color) {
                "color-option"
            } else {
                "color-option hidden"
            };
            let _ = swatch.set_attribute("class", class);
        }
        let _ = self.menu.set_attribute("class", "color-menu");
    }

    fn hide(&mut self) {
        let _ = self.menu.set_attribute("class", "color-menu hidden");
    }
}

impl Drop for DomColorPicker {
    fn drop(&mut self) {
        self.menu.remove();
    }
}
