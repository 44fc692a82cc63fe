//! Landing page with a rotating dotted globe, compiled to WebAssembly.
//!
//! `mount` binds the static markup, starts the animation loop and fetches the
//! land data; `unmount` releases the loop, every listener and every timer.

use std::cell::RefCell;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlTextAreaElement, KeyboardEvent, MouseEvent, WheelEvent};

pub mod ai_input;
pub mod app;
pub mod config;
pub mod dom;
pub mod globe;
pub mod globe_controller;
pub mod land_source;
pub mod layout;
pub mod logging;
pub mod navbar;
pub mod render;
pub mod scroll_spy;
pub mod timers;
pub mod views;
pub mod wheel_nav;

use app::{MountContext, PageState};
use config::PageConfig;
use dom::{AnimationLoop, Listener};
use globe::LandState;
use scroll_spy::{ScrollTarget, probe_y, scroll_target};
use views::{AI_INPUT_ID, AI_SUBMIT_ID, INDICATOR_ID, NAVBAR_ID, PageView, closest_data};
use wheel_nav::Navigation;

// Guard to prevent double-initialization of global state (relevant during hot reload).
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

struct Mounted {
    /// Distinguishes this mount from earlier ones, so a land response that
    /// outlives its page is dropped.
    epoch: u64,
    page: PageState,
    view: PageView,
}

/// Browser resources that call back into `STATE`. Kept apart from it so
/// they are never dropped while `STATE` is borrowed.
struct Handles {
    _listeners: Vec<Listener>,
    _animation: AnimationLoop,
}

thread_local! {
    static STATE: RefCell<Option<Mounted>> = const { RefCell::new(None) };
    static HANDLES: RefCell<Option<Handles>> = const { RefCell::new(None) };
    static NEXT_EPOCH: RefCell<u64> = const { RefCell::new(0) };
}

/// Runs `f` against the mounted page. Returns the default when nothing is
/// mounted, the page is already borrowed, or TLS is being torn down.
fn with_page<F, R>(f: F) -> R
where
    F: FnOnce(&mut Mounted) -> R,
    R: Default,
{
    STATE
        .try_with(|cell| match cell.try_borrow_mut() {
            Ok(mut slot) => slot.as_mut().map(f).unwrap_or_default(),
            Err(_) => R::default(),
        })
        .unwrap_or_default()
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(console_error_panic_hook::set_once);
}

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (hi << 32) | lo
}

fn report(context: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!(error = ?err, "{context} failed");
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    init_panic_hook();
    Ok(())
}

/// Mounts the page. `config_json` overrides defaults; when absent the canvas
/// `data-config` attribute is used. Mounting again replaces the previous page.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsValue> {
    init_panic_hook();
    unmount();

    let window = dom::window()?;
    let document = dom::document()?;
    let mut view = PageView::bind(&document)?;
    let raw = config_json.or_else(|| view.canvas().get_attribute("data-config"));
    let config = PageConfig::from_json(raw.as_deref())
        .map_err(|err| JsValue::from_str(&format!("invalid page config: {err}")))?;
    logging::init(&config.globe.log_filter);

    let location = window.location();
    let path = location.pathname().unwrap_or_default();
    let hash = location.hash().unwrap_or_default();
    let viewport = views::viewport(&window);
    let (width, height) = (config.globe.width, config.globe.height);
    let land_url = config.globe.land_url.clone();

    let page = PageState::new(
        config,
        MountContext {
            path: &path,
            hash: &hash,
            viewport_width: viewport.inner_width,
            seed: random_seed(),
        },
        dom::now(),
    );

    view.apply_layout(width, height, viewport)?;
    view.build_navbar(page.navbar())?;
    view.build_indicators()?;
    view.sync_indicators(page.spy().active())?;
    view.sync_counter(0);
    view.sync_log(page.globe().layer())?;
    view.sync_ai_input(page.ai_input())?;

    let epoch = NEXT_EPOCH.with(|e| {
        let mut e = e.borrow_mut();
        *e += 1;
        *e
    });
    STATE.with(|s| *s.borrow_mut() = Some(Mounted { epoch, page, view }));

    let listeners = install_listeners(&window, &document)?;
    let animation = AnimationLoop::start(|_| on_animation_frame())?;
    HANDLES.with(|h| {
        *h.borrow_mut() = Some(Handles {
            _listeners: listeners,
            _animation: animation,
        })
    });

    on_scroll();
    spawn_local(load_land(land_url, epoch));
    tracing::info!(path = %path, "landing page mounted");
    Ok(())
}

/// Stops the animation loop, removes every listener and cancels every timer.
#[wasm_bindgen]
pub fn unmount() {
    let handles = HANDLES.with(|h| h.borrow_mut().take());
    drop(handles);
    let mounted = STATE.with(|s| s.borrow_mut().take());
    if let Some(mut mounted) = mounted {
        mounted.page.teardown();
        tracing::info!("landing page unmounted");
    }
}

/// Number of live fluorescent points.
#[wasm_bindgen]
pub fn point_count() -> u32 {
    with_page(|m| m.page.globe().layer().population().len() as u32)
}

/// Points generated since mount.
#[wasm_bindgen]
pub fn exchange_count() -> f64 {
    with_page(|m| m.page.globe().layer().exchanges() as f64)
}

async fn load_land(url: String, epoch: u64) {
    let result = land_source::fetch_land(&url).await;
    with_page(|m| {
        if m.epoch != epoch {
            return;
        }
        m.page.on_land_result(result, dom::now());
        match m.page.globe().land_state() {
            LandState::Failed(message) => m.view.show_error(message),
            LandState::Ready(_) | LandState::Loading => {
                m.view.sync_counter(m.page.globe().layer().exchanges());
                report("log sync", m.view.sync_log(m.page.globe().layer()));
            }
        }
    });
}

fn on_animation_frame() {
    let navigations = with_page(|m| {
        let now = dom::now();
        let outcome = m.page.on_frame(now);
        report("draw", m.view.draw(&m.page, now));
        if outcome.points_added > 0 {
            m.view.sync_counter(m.page.globe().layer().exchanges());
            report("log sync", m.view.sync_log(m.page.globe().layer()));
        }
        if outcome.input_changed {
            report("input sync", m.view.sync_ai_input(m.page.ai_input()));
        }
        outcome.navigations
    });
    follow(navigations);
}

fn follow(navigations: Vec<Navigation>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    for nav in navigations {
        report("navigation", dom::navigate(&window, nav));
    }
}

fn on_scroll() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let inner_height = views::viewport(&window).inner_height;
    with_page(|m| {
        let boxes = m.view.section_boxes();
        let update = m
            .page
            .on_scroll(probe_y(scroll_y, inner_height), &boxes, dom::now());
        if update.active_changed {
            report("indicator sync", m.view.sync_indicators(m.page.spy().active()));
        }
        if update.start_auto_type {
            report("input sync", m.view.sync_ai_input(m.page.ai_input()));
        }
    });
}

fn on_resize() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let viewport = views::viewport(&window);
    with_page(|m| {
        let (width, height) = (m.page.globe().config().width, m.page.globe().config().height);
        report("layout", m.view.apply_layout(width, height, viewport));
        if m.page.navbar_mut().on_resize(viewport.inner_width) {
            report("navbar sync", m.view.sync_navbar(m.page.navbar()));
        }
    });
}

fn submit_ai_input() {
    with_page(|m| {
        if m.page.submit(dom::now()).is_some() {
            report("input sync", m.view.sync_ai_input(m.page.ai_input()));
        }
    });
}

fn install_listeners(
    window: &web_sys::Window,
    document: &web_sys::Document,
) -> Result<Vec<Listener>, JsValue> {
    let canvas = with_page(|m| Some(m.view.canvas().clone()))
        .ok_or_else(|| JsValue::from_str("page not mounted"))?;
    let navbar = dom::element_by_id::<web_sys::Element>(document, NAVBAR_ID)?;
    let indicator = dom::element_by_id::<web_sys::Element>(document, INDICATOR_ID)?;
    let textarea = dom::element_by_id::<web_sys::Element>(document, AI_INPUT_ID)?;
    let submit = dom::element_by_id::<web_sys::Element>(document, AI_SUBMIT_ID)?;

    let mut listeners = Vec::new();

    listeners.push(Listener::new(canvas.as_ref(), "mousedown", |event: Event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        mouse.prevent_default();
        let (x, y) = (f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        with_page(|m| {
            let pos = m.view.canvas_position(x, y);
            m.page.on_pointer_down(pos);
        });
    })?);

    listeners.push(Listener::new(document.as_ref(), "mousemove", |event: Event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let (x, y) = (f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        with_page(|m| {
            let pos = m.view.canvas_position(x, y);
            if m.page.on_pointer_move(pos) {
                report("draw", m.view.draw(&m.page, dom::now()));
            }
        });
    })?);

    listeners.push(Listener::new(document.as_ref(), "mouseup", |_event: Event| {
        with_page(|m| m.page.on_pointer_up(dom::now()));
    })?);

    listeners.push(Listener::new(canvas.as_ref(), "wheel", |event: Event| {
        let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
            return;
        };
        wheel.prevent_default();
        let delta = wheel.delta_y();
        with_page(|m| m.page.on_wheel(delta, dom::now()));
    })?);

    listeners.push(Listener::new(window.as_ref(), "scroll", |_event: Event| on_scroll())?);
    listeners.push(Listener::new(window.as_ref(), "resize", |_event: Event| on_resize())?);

    listeners.push(Listener::new(navbar.as_ref(), "click", |event: Event| {
        let Some(name) = closest_data(&event, "nav") else {
            return;
        };
        let url = with_page(|m| {
            let url = m.page.on_nav_click(&name);
            report("navbar sync", m.view.sync_navbar(m.page.navbar()));
            url
        });
        if let Some(url) = url {
            event.prevent_default();
            follow(vec![Navigation::for_destination(url)]);
        }
    })?);

    listeners.push(Listener::new(indicator.as_ref(), "click", |event: Event| {
        let Some(section) = closest_data(&event, "section") else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        match scroll_target(&section) {
            Some(ScrollTarget::Top) => dom::scroll_to_top(&window),
            Some(ScrollTarget::Element(id)) => {
                if let Some(document) = window.document() {
                    dom::scroll_into_view(&document, id);
                }
            }
            None => {}
        }
    })?);

    listeners.push(Listener::new(textarea.as_ref(), "input", |event: Event| {
        let Some(value) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok())
            .map(|t| t.value())
        else {
            return;
        };
        with_page(|m| {
            m.page.on_input(&value);
            report("input sync", m.view.sync_ai_input(m.page.ai_input()));
        });
    })?);

    listeners.push(Listener::new(textarea.as_ref(), "keydown", |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if ai_input::is_submit_key(&key.key(), key.shift_key()) {
            key.prevent_default();
            submit_ai_input();
        }
    })?);

    listeners.push(Listener::new(submit.as_ref(), "click", |_event: Event| submit_ai_input())?);

    Ok(listeners)
}
