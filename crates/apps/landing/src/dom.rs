//! Thin DOM helpers: element lookup, scrolling, event listeners and the
//! animation-frame loop. Listeners and the loop detach themselves on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use foundation::time::Millis;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, EventTarget, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions, Window,
};

use crate::wheel_nav::Navigation;

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

/// Wall-clock time; matches the timestamps stored on generated points.
pub fn now() -> Millis {
    Millis(js_sys::Date::now())
}

pub fn scroll_to_top(window: &Window) {
    let opts = ScrollToOptions::new();
    opts.set_top(0.0);
    opts.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
}

/// Smooth-scrolls the element with `id` into view; missing ids are ignored.
pub fn scroll_into_view(document: &Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        el.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

/// Follows a navigation target. A route that is already the current page
/// scrolls back to the top instead of reloading.
pub fn navigate(window: &Window, nav: Navigation) -> Result<(), JsValue> {
    match nav {
        Navigation::Anchor(anchor) => {
            if let Some(doc) = window.document() {
                scroll_into_view(&doc, anchor.trim_start_matches('#'));
            }
            Ok(())
        }
        Navigation::Route(route) => {
            let location = window.location();
            if location.pathname().map(|p| p == route).unwrap_or(false) {
                scroll_to_top(window);
                Ok(())
            } else {
                location.set_href(route)
            }
        }
    }
}

/// An event listener that is removed when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling `requestAnimationFrame` loop, cancelled on drop.
///
/// Must not be dropped from inside its own frame callback.
pub struct AnimationLoop {
    request_id: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(None));

        let next_callback = callback.clone();
        let next_id = request_id.clone();
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            on_frame(timestamp);
            if next_id.get().is_none() {
                return;
            }
            let id = next_callback.borrow().as_ref().and_then(|cb| {
                web_sys::window()?
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .ok()
            });
            next_id.set(id);
        }));

        let id = match callback.borrow().as_ref() {
            Some(cb) => window()?.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(JsValue::from_str("animation callback missing")),
        };
        request_id.set(Some(id));
        Ok(Self {
            request_id,
            callback,
        })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.request_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Breaks the closure's reference cycle to itself.
        self.callback.borrow_mut().take();
    }
}
