//! DOM side of the page: looks up the static markup once at mount and keeps
//! it in sync with `PageState`.

use foundation::time::Millis;
use layers::access_log::LogEntry;
use layers::fluorescent::FluorescentLayer;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
    HtmlTextAreaElement, Window,
};

use crate::ai_input::{AiInput, clamp_height};
use crate::app::PageState;
use crate::dom::element_by_id;
use crate::layout::{CanvasLayout, EXCHANGE_LABEL, Viewport, format_exchange_count};
use crate::navbar::{NAV_ITEMS, TubelightNavbar};
use crate::render::draw_frame;
use crate::scroll_spy::{SECTIONS, SectionBox};

pub const CANVAS_ID: &str = "globe-canvas";
pub const NAVBAR_ID: &str = "tubelight-navbar";
pub const INDICATOR_ID: &str = "page-indicator";
pub const AI_INPUT_ID: &str = "ai-input";
pub const AI_SUBMIT_ID: &str = "ai-input-submit";

/// Entries shown in the compact log under the globe on small screens.
const MOBILE_LOG_ENTRIES: usize = 5;

pub fn viewport(window: &Window) -> Viewport {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport {
        inner_width: read(window.inner_width()),
        inner_height: read(window.inner_height()),
        device_pixel_ratio: window.device_pixel_ratio(),
    }
}

fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let el = document.create_element(tag)?;
    el.set_class_name(class);
    el.dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("<{tag}> has an unexpected element type")))
}

fn set_class(el: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    el.class_list().toggle_with_force(class, on).map(|_| ())
}

pub struct PageView {
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    globe_view: HtmlElement,
    error_view: HtmlElement,
    error_detail: HtmlElement,
    counter: HtmlElement,
    log_list: HtmlElement,
    log_list_mobile: Option<HtmlElement>,
    textarea: HtmlTextAreaElement,
    submit_button: HtmlElement,
    status: HtmlElement,
    navbar: HtmlElement,
    indicator: HtmlElement,
    layout: CanvasLayout,
}

impl PageView {
    pub fn bind(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = element_by_id(document, CANVAS_ID)?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let label: HtmlElement = element_by_id(document, "exchange-label")?;
        label.set_text_content(Some(EXCHANGE_LABEL));

        Ok(Self {
            document: document.clone(),
            ctx,
            canvas,
            globe_view: element_by_id(document, "globe-view")?,
            error_view: element_by_id(document, "globe-error")?,
            error_detail: element_by_id(document, "globe-error-detail")?,
            counter: element_by_id(document, "exchange-count")?,
            log_list: element_by_id(document, "access-log")?,
            log_list_mobile: element_by_id(document, "access-log-mobile").ok(),
            textarea: element_by_id(document, AI_INPUT_ID)?,
            submit_button: element_by_id(document, AI_SUBMIT_ID)?,
            status: element_by_id(document, "ai-input-status")?,
            navbar: element_by_id(document, NAVBAR_ID)?,
            indicator: element_by_id(document, INDICATOR_ID)?,
            layout: CanvasLayout::fit(1.0, 1.0, Viewport {
                inner_width: 1.0,
                inner_height: 1.0,
                device_pixel_ratio: 1.0,
            }),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Sizes the canvas backing store and CSS box for the viewport.
    pub fn apply_layout(&mut self, width: f64, height: f64, viewport: Viewport) -> Result<(), JsValue> {
        let layout = CanvasLayout::fit(width, height, viewport);
        self.canvas.set_width(layout.backing_width);
        self.canvas.set_height(layout.backing_height);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", layout.width))?;
        style.set_property("height", &format!("{}px", layout.height))?;
        self.layout = layout;
        Ok(())
    }

    pub fn draw(&self, page: &PageState, now: Millis) -> Result<(), JsValue> {
        draw_frame(&self.ctx, page.globe(), &self.layout, now)
    }

    /// Canvas-relative pointer position in CSS pixels.
    pub fn canvas_position(&self, client_x: f64, client_y: f64) -> [f64; 2] {
        let rect = self.canvas.get_bounding_client_rect();
        [client_x - rect.left(), client_y - rect.top()]
    }

    pub fn show_error(&self, message: &str) {
        self.error_detail.set_text_content(Some(message));
        self.error_view.set_hidden(false);
        self.globe_view.set_hidden(true);
    }

    pub fn sync_counter(&self, exchanges: u64) {
        self.counter
            .set_text_content(Some(&format_exchange_count(exchanges)));
    }

    fn render_log(&self, list: &HtmlElement, entries: &[&LogEntry], empty: &str) -> Result<(), JsValue> {
        list.set_inner_html("");
        if entries.is_empty() {
            let placeholder: HtmlElement = create(&self.document, "div", "log-empty")?;
            placeholder.set_text_content(Some(empty));
            list.append_child(&placeholder)?;
            return Ok(());
        }
        let newest = entries.len() - 1;
        for (i, entry) in entries.iter().enumerate() {
            let row: HtmlElement = create(&self.document, "div", "log-entry")?;
            row.set_attribute("data-id", &entry.id.to_string())?;
            set_class(&row, "log-entry-enter", i == newest)?;
            let dot: HtmlElement = create(&self.document, "span", "log-dot")?;
            dot.style().set_property("background-color", &entry.color)?;
            let text: HtmlElement = create(&self.document, "span", "log-text")?;
            text.set_text_content(Some(&entry.message));
            row.append_child(&dot)?;
            row.append_child(&text)?;
            list.append_child(&row)?;
        }
        list.set_scroll_top(list.scroll_height());
        Ok(())
    }

    /// Redraws both log panels, oldest entry first.
    pub fn sync_log(&self, layer: &FluorescentLayer) -> Result<(), JsValue> {
        let entries: Vec<&LogEntry> = layer.log().iter().collect();
        self.render_log(&self.log_list, &entries, "Awaiting connection...")?;
        if let Some(mobile) = &self.log_list_mobile {
            let tail = &entries[entries.len().saturating_sub(MOBILE_LOG_ENTRIES)..];
            self.render_log(mobile, tail, "Awaiting...")?;
        }
        Ok(())
    }

    pub fn sync_ai_input(&self, input: &AiInput) -> Result<(), JsValue> {
        let view = input.view();
        if self.textarea.value() != view.value {
            self.textarea.set_value(view.value);
        }
        self.textarea.set_disabled(view.disabled);
        self.textarea
            .set_attribute("placeholder", &input.config().placeholder)?;
        self.submit_button.toggle_attribute_with_force("disabled", view.disabled)?;
        set_class(&self.submit_button, "is-submitted", view.submitted)?;
        set_class(&self.submit_button, "has-value", !view.value.is_empty())?;
        self.status.set_text_content(Some(view.status));

        let cfg = input.config();
        let style = self.textarea.style();
        style.set_property("height", "auto")?;
        let content = f64::from(self.textarea.scroll_height());
        let height = if view.value.is_empty() {
            cfg.min_height
        } else {
            clamp_height(content, cfg.min_height, cfg.max_height)
        };
        style.set_property("height", &format!("{height}px"))?;
        Ok(())
    }

    /// Builds the navbar links once; `sync_navbar` keeps them current.
    pub fn build_navbar(&self, navbar: &TubelightNavbar) -> Result<(), JsValue> {
        self.navbar.set_inner_html("");
        for item in &NAV_ITEMS {
            let link: HtmlElement = create(&self.document, "a", "nav-item")?;
            link.set_attribute("href", item.url)?;
            link.set_attribute("data-nav", item.name)?;
            link.set_attribute("aria-label", item.name)?;
            let caption: HtmlElement = create(&self.document, "span", "nav-caption")?;
            let indicator: HtmlElement = create(&self.document, "span", "nav-indicator")?;
            link.append_child(&caption)?;
            link.append_child(&indicator)?;
            self.navbar.append_child(&link)?;
        }
        self.sync_navbar(navbar)
    }

    pub fn sync_navbar(&self, navbar: &TubelightNavbar) -> Result<(), JsValue> {
        let links = self.navbar.children();
        for (i, item) in NAV_ITEMS.iter().enumerate() {
            let Some(link) = links.item(i as u32) else {
                continue;
            };
            set_class(&link, "is-active", navbar.active().name == item.name)?;
            if let Some(caption) = link.first_element_child() {
                caption.set_text_content(Some(navbar.caption(item)));
            }
        }
        Ok(())
    }

    pub fn build_indicators(&self) -> Result<(), JsValue> {
        self.indicator.set_inner_html("");
        for (id, label) in SECTIONS {
            let button: HtmlElement = create(&self.document, "button", "indicator")?;
            button.set_attribute("type", "button")?;
            button.set_attribute("data-section", id)?;
            button.set_attribute("aria-label", label)?;
            let dot: HtmlElement = create(&self.document, "span", "indicator-dot")?;
            let text: HtmlElement = create(&self.document, "span", "indicator-label")?;
            text.set_text_content(Some(label));
            button.append_child(&dot)?;
            button.append_child(&text)?;
            self.indicator.append_child(&button)?;
        }
        Ok(())
    }

    pub fn sync_indicators(&self, active: &str) -> Result<(), JsValue> {
        let buttons = self.indicator.children();
        for i in 0..buttons.length() {
            if let Some(button) = buttons.item(i) {
                let is_active = button.get_attribute("data-section").as_deref() == Some(active);
                set_class(&button, "is-active", is_active)?;
            }
        }
        Ok(())
    }

    /// Measured extent of every narrative section, in `SECTIONS` order.
    pub fn section_boxes(&self) -> Vec<Option<SectionBox>> {
        SECTIONS
            .iter()
            .map(|(id, _)| {
                let el = self.document.get_element_by_id(id)?;
                let el = el.dyn_into::<HtmlElement>().ok()?;
                Some(SectionBox {
                    top: f64::from(el.offset_top()),
                    height: f64::from(el.offset_height()),
                })
            })
            .collect()
    }
}

/// Value of `data-<name>` on the closest ancestor of the event target that has it.
pub fn closest_data(event: &web_sys::Event, name: &str) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let attr = format!("data-{name}");
    let holder = target.closest(&format!("[{attr}]")).ok()??;
    holder.get_attribute(&attr)
}
