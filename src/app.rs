//! Browser host integration
//!
//! Wires the field to the page: canvas lookup, pointer/resize/visibility
//! listeners, the animation-frame loop, and teardown. The backdrop is
//! decorative, so every failure here degrades to "no animation" instead of
//! surfacing an error to the page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, VisibilityState, Window};

use crate::platform::{self, FrameHandle};
use crate::renderer::CanvasRenderer;
use crate::settings::Settings;
use crate::sim::{self, FieldConfig, FieldState};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
}

/// Field plus its drawing surface
struct App {
    field: FieldState,
    renderer: CanvasRenderer,
    canvas: HtmlCanvasElement,
}

impl App {
    /// One animation-frame callback: step, and redraw only when physics ran
    fn frame(&mut self, now_ms: f64) {
        if sim::step(&mut self.field, now_ms) {
            self.renderer.render(&self.field);
        }
    }

    /// Viewport changed: resize the surface and regenerate the field
    fn resize(&mut self, css_width: f64, css_height: f64) {
        self.renderer.resize(&self.canvas, css_width, css_height);
        self.field.rebuild(css_width as f32, css_height as f32);
    }
}

/// One wired event listener, kept so dispose can unhook it
struct Listener {
    target: EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        name: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target: target.clone(),
            name,
            closure,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.closure.as_ref().unchecked_ref());
    }
}

type LoopClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct AppInner {
    listeners: Vec<Listener>,
    raf: Rc<RefCell<FrameHandle>>,
    running: Rc<Cell<bool>>,
    loop_closure: LoopClosure,
}

/// Handle returned to the host page. Dropping it on the JS side without
/// calling `dispose` leaves the backdrop running for the page's lifetime,
/// which matches how the original component behaved.
#[wasm_bindgen]
pub struct FieldApp {
    inner: Option<AppInner>,
}

#[wasm_bindgen]
impl FieldApp {
    /// Stop the frame loop and unhook every listener. Safe to call more
    /// than once; later calls find nothing left to tear down.
    pub fn dispose(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };
        inner.running.set(false);
        if let Some(id) = inner.raf.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        for listener in &inner.listeners {
            listener.detach();
        }
        inner.loop_closure.borrow_mut().take();
        log::info!("Backdrop disposed");
    }

    /// Whether the backdrop is animating (false for degraded mounts and
    /// after dispose)
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    fn inert() -> Self {
        Self { inner: None }
    }
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

/// Mount the backdrop onto an existing canvas element and start animating.
/// A missing canvas or 2d context yields an inert handle and a blank page
/// region; the rest of the site is unaffected.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> FieldApp {
    let Some(window) = web_sys::window() else {
        return FieldApp::inert();
    };
    let Some(document) = window.document() else {
        return FieldApp::inert();
    };
    let Some(canvas) = document
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        log::warn!("No canvas '{canvas_id}', backdrop disabled");
        return FieldApp::inert();
    };

    let dpr = window.device_pixel_ratio();
    let Some(renderer) = CanvasRenderer::new(&canvas, dpr) else {
        log::warn!("2d context unavailable, backdrop disabled");
        return FieldApp::inert();
    };

    let settings = Settings::load();
    let config = FieldConfig::from_settings(&settings);
    let (width, height) = viewport_size(&window);
    let seed = platform::now_ms() as u64;

    renderer.resize(&canvas, width, height);
    let field = FieldState::new(width as f32, height as f32, seed, config);
    log::info!(
        "Backdrop mounted: {}x{} css px, {} particles, seed {seed}",
        width,
        height,
        field.particle_count()
    );

    let app = Rc::new(RefCell::new(App {
        field,
        renderer,
        canvas,
    }));

    let mut listeners = Vec::new();

    // Pointer moves anywhere on the page steer the attraction force
    {
        let app = app.clone();
        let listener = Listener::attach(&window, "mousemove", move |event: Event| {
            let Ok(event) = event.dyn_into::<MouseEvent>() else {
                return;
            };
            app.borrow_mut()
                .field
                .set_pointer(event.client_x() as f32, event.client_y() as f32);
        });
        listeners.extend(listener);
    }

    // Viewport resize regenerates the whole field
    {
        let app = app.clone();
        let resize_window = window.clone();
        let listener = Listener::attach(&window, "resize", move |_event: Event| {
            let (width, height) = viewport_size(&resize_window);
            app.borrow_mut().resize(width, height);
        });
        listeners.extend(listener);
    }

    // Hidden tabs pause physics to save CPU; state survives the pause
    {
        let app = app.clone();
        let vis_document = document.clone();
        let listener = Listener::attach(&document, "visibilitychange", move |_event: Event| {
            let visible = vis_document.visibility_state() != VisibilityState::Hidden;
            app.borrow_mut().field.set_visible(visible);
            log::info!("Backdrop {}", if visible { "resumed" } else { "paused" });
        });
        listeners.extend(listener);
    }

    let raf = Rc::new(RefCell::new(FrameHandle::new()));
    let running = Rc::new(Cell::new(true));
    let loop_closure = start_loop(&window, app, raf.clone(), running.clone());

    FieldApp {
        inner: Some(AppInner {
            listeners,
            raf,
            running,
            loop_closure,
        }),
    }
}

/// Start the self-rescheduling animation-frame loop. The closure is held in
/// a cell so dispose can drop it; gated frames still reschedule.
fn start_loop(
    window: &Window,
    app: Rc<RefCell<App>>,
    raf: Rc<RefCell<FrameHandle>>,
    running: Rc<Cell<bool>>,
) -> LoopClosure {
    let closure_cell: LoopClosure = Rc::new(RefCell::new(None));

    let cell = closure_cell.clone();
    let loop_window = window.clone();
    let loop_raf = raf.clone();
    *closure_cell.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
        if !running.get() {
            return;
        }
        app.borrow_mut().frame(now_ms);
        if let Some(callback) = cell.borrow().as_ref() {
            if let Ok(id) = loop_window.request_animation_frame(callback.as_ref().unchecked_ref())
            {
                loop_raf.borrow_mut().arm(id);
            }
        }
    }));

    if let Some(callback) = closure_cell.borrow().as_ref() {
        if let Ok(id) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            raf.borrow_mut().arm(id);
        }
    }
    closure_cell
}
