//! Browser runtime: wires DOM events and timers to [`PageCore`].
//!
//! DESIGN
//! ======
//! One `Runtime` lives in a thread-local for the life of the page. Event
//! closures hold only a `Weak` to it, so dropping the runtime detaches
//! everything. Each handler first advances the core's clock to real time,
//! then applies the event, paints the resulting effects, and re-arms a
//! single sleep for the scheduler's next deadline.
//!
//! Sleeps are tagged with a generation number; a sleep whose generation is
//! stale when it wakes does nothing. Teardown bumps the generation, drops
//! every listener and clears the scheduler, so no callback mutates the page
//! after `pagehide`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo_timers::future::sleep;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Event, EventTarget, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollToOptions,
};

use crate::consts::FORM_MESSAGE_HIDE_MS;
use crate::contact::{FetchTransport, FormView, Outcome, Transport};
use crate::dom::{Dom, query_all, report};
use crate::effect::Effect;
use crate::engine::PageCore;
use crate::error::DomError;
use crate::prefs::LocalStore;

type Shared = Rc<RefCell<Runtime>>;

thread_local! {
    static RUNTIME: RefCell<Option<Shared>> = const { RefCell::new(None) };
}

/// An attached event listener, removed on drop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        report(
            "remove listener",
            self.target.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref()),
        );
    }
}

struct Runtime {
    core: PageCore<LocalStore>,
    dom: Dom,
    form: FormView,
    endpoint: String,
    origin_ms: f64,
    timer_generation: u64,
    armed_deadline: Option<u64>,
    message_generation: u64,
    listeners: Vec<Listener>,
    live: bool,
}

impl Runtime {
    /// Milliseconds since mount.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now(&self) -> u64 {
        let now = self.dom.window.performance().map_or(self.origin_ms, |p| p.now());
        (now - self.origin_ms).max(0.0) as u64
    }

    fn paint(&mut self, effects: &[Effect]) {
        for effect in effects {
            self.dom.apply(effect);
        }
        // Freshly armed reveals need a measurement without waiting for a scroll.
        if effects.iter().any(|e| matches!(e, Effect::PrepareReveal(_))) {
            let sample = self.dom.sample(&self.core.observer().pending());
            for effect in self.core.on_scroll(&sample) {
                self.dom.apply(&effect);
            }
        }
    }

    fn shutdown(&mut self) {
        self.live = false;
        self.timer_generation += 1;
        self.message_generation += 1;
        // The caller may be one of these closures (pagehide); free them once it returns.
        let listeners = std::mem::take(&mut self.listeners);
        wasm_bindgen_futures::spawn_local(async move { drop(listeners) });
        self.core.teardown();
        log::info!("folio detached");
    }
}

/// Entry point, run when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("logger already installed: {err}");
    }

    match mount() {
        Ok(rt) => RUNTIME.with(|slot| *slot.borrow_mut() = Some(rt)),
        Err(err) => log::error!("folio failed to start: {err}"),
    }
}

/// Detach every listener and pending timer.
#[wasm_bindgen]
pub fn teardown() {
    let rt = RUNTIME.with(|slot| slot.borrow_mut().take());
    if let Some(rt) = rt {
        rt.borrow_mut().shutdown();
    }
}

fn mount() -> Result<Shared, DomError> {
    let dom = Dom::bind()?;
    let config = dom.config();
    let endpoint = config.submit_endpoint.clone();
    let model = dom.model();
    let core = PageCore::new(config, LocalStore::open(), model).with_random(js_sys::Math::random);
    let origin_ms = dom.window.performance().map_or(0.0, |p| p.now());
    let scroll_y = dom.window.scroll_y().unwrap_or(0.0);
    let already_loaded = dom.document.ready_state() == "complete";

    let rt = Rc::new(RefCell::new(Runtime {
        core,
        dom,
        form: FormView::default(),
        endpoint,
        origin_ms,
        timer_generation: 0,
        armed_deadline: None,
        message_generation: 0,
        listeners: Vec::new(),
        live: true,
    }));

    dispatch(&rt, |core, _| core.boot(scroll_y));
    let listeners = wire(&rt);
    rt.borrow_mut().listeners = listeners;
    if already_loaded {
        dispatch(&rt, |core, _| core.on_load());
    }
    Ok(rt)
}

/// Advance the clock, run `event`, paint, and re-arm the timer.
fn dispatch(rt: &Shared, event: impl FnOnce(&mut PageCore<LocalStore>, &Dom) -> Vec<Effect>) {
    {
        let mut guard = rt.borrow_mut();
        if !guard.live {
            return;
        }
        let now = guard.now();
        let rt = &mut *guard;
        let mut effects = rt.core.advance(now);
        effects.extend(event(&mut rt.core, &rt.dom));
        rt.paint(&effects);
    }
    rearm(rt);
}

fn rearm(rt: &Shared) {
    let (generation, delay) = {
        let mut guard = rt.borrow_mut();
        let Some(deadline) = guard.core.next_deadline() else {
            return;
        };
        if guard.armed_deadline == Some(deadline) {
            return;
        }
        guard.armed_deadline = Some(deadline);
        guard.timer_generation += 1;
        (guard.timer_generation, deadline.saturating_sub(guard.now()))
    };

    let weak = Rc::downgrade(rt);
    wasm_bindgen_futures::spawn_local(async move {
        sleep(Duration::from_millis(delay)).await;
        let Some(rt) = weak.upgrade() else {
            return;
        };
        {
            let mut guard = rt.borrow_mut();
            if guard.timer_generation != generation {
                return;
            }
            guard.armed_deadline = None;
        }
        dispatch(&rt, |_, _| Vec::new());
    });
}

fn listen(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Listener> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    match target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        Ok(()) => Some(Listener { target: target.clone(), event, callback }),
        Err(err) => {
            log::warn!("could not listen for {event}: {err:?}");
            None
        }
    }
}

/// Listen on `target`, handing the live runtime to `handler`.
fn on(rt: &Shared, target: &EventTarget, event: &'static str, handler: impl Fn(&Shared, &Event) + 'static) -> Option<Listener> {
    let weak = Rc::downgrade(rt);
    listen(target, event, move |ev| {
        if let Some(rt) = weak.upgrade() {
            handler(&rt, &ev);
        }
    })
}

fn wire(rt: &Shared) -> Vec<Listener> {
    let guard = rt.borrow();
    let dom = &guard.dom;
    let window: &EventTarget = dom.window.as_ref();
    let mut listeners = Vec::new();

    listeners.extend(on(rt, window, "scroll", |rt, _| {
        dispatch(rt, |core, dom| {
            let sample = dom.sample(&core.observer().pending());
            core.on_scroll(&sample)
        });
    }));
    listeners.extend(on(rt, window, "load", |rt, _| dispatch(rt, |core, _| core.on_load())));
    listeners.extend(listen(window, "pagehide", |_| teardown()));

    if let Some(toggle) = &dom.theme_toggle {
        listeners.extend(on(rt, toggle, "click", |rt, _| dispatch(rt, |core, _| core.toggle_theme())));
    }
    if let Some(hamburger) = &dom.hamburger {
        listeners.extend(on(rt, hamburger, "click", |rt, _| dispatch(rt, |core, _| core.toggle_menu())));
    }
    for link in query_all(&dom.document, ".nav-link") {
        listeners.extend(on(rt, &link, "click", |rt, _| dispatch(rt, |core, _| core.close_menu())));
    }

    for anchor in query_all(&dom.document, "a[href^=\"#\"]") {
        let document = dom.document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        listeners.extend(listen(&anchor, "click", move |ev| {
            ev.prevent_default();
            if href.len() < 2 {
                return;
            }
            if let Ok(Some(target)) = document.query_selector(&href) {
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                opts.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        }));
    }

    if let Some(button) = &dom.scroll_top {
        let window = dom.window.clone();
        listeners.extend(listen(button, "click", move |_| {
            let opts = ScrollToOptions::new();
            opts.set_top(0.0);
            opts.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&opts);
        }));
    }

    if let Some(form) = &dom.contact_form {
        listeners.extend(on(rt, form, "submit", |rt, ev| {
            ev.prevent_default();
            wasm_bindgen_futures::spawn_local(submit_contact(Rc::downgrade(rt)));
        }));
    }

    listeners.extend(wire_hover(dom));
    for button in query_all(&dom.document, ".btn-primary, .btn-outline") {
        listeners.extend(on(rt, &button.clone(), "click", move |rt, _| flash_loading(rt, &button)));
    }

    log::info!("folio attached {} listeners", listeners.len());
    listeners
}

fn wire_hover(dom: &Dom) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let mut hover = |el: &HtmlElement, target: HtmlElement, over: &'static str, out: &'static str| {
        let enter = target.clone();
        listeners.extend(listen(el, "mouseenter", move |_| {
            report("hover", enter.style().set_property("transform", over));
        }));
        listeners.extend(listen(el, "mouseleave", move |_| {
            report("hover", target.style().set_property("transform", out));
        }));
    };
    for item in query_all(&dom.document, ".portfolio-item") {
        hover(&item, item.clone(), "translateY(-10px) scale(1.02)", "translateY(0) scale(1)");
    }
    for icon in query_all(&dom.document, ".skill-icon") {
        if let Ok(Some(glyph)) = icon.query_selector("i")
            && let Ok(glyph) = glyph.dyn_into::<HtmlElement>()
        {
            hover(&icon, glyph, "rotateY(360deg) scale(1.2)", "rotateY(0deg) scale(1)");
        }
    }
    listeners
}

/// Add the transient `loading` class to a clicked button for one second.
fn flash_loading(rt: &Shared, button: &HtmlElement) {
    let classes = button.class_list();
    if classes.contains("loading") {
        return;
    }
    report("loading", classes.add_1("loading"));
    let weak = Rc::downgrade(rt);
    wasm_bindgen_futures::spawn_local(async move {
        sleep(Duration::from_millis(1000)).await;
        if weak.upgrade().is_some_and(|rt| rt.borrow().live) {
            report("loading", classes.remove_1("loading"));
        }
    });
}

async fn submit_contact(weak: Weak<RefCell<Runtime>>) {
    let Some((fields, endpoint)) = begin_submit(&weak) else {
        return;
    };
    let result = FetchTransport::new(endpoint).post(fields).await;

    let generation = {
        let Some(rt) = weak.upgrade() else {
            return;
        };
        let mut guard = rt.borrow_mut();
        let rt = &mut *guard;
        if !rt.live {
            return;
        }
        let outcome = rt.form.finish(result);
        if outcome == Outcome::Sent {
            rt.dom.reset_form();
        }
        rt.dom.paint_form(&rt.form);
        rt.message_generation += 1;
        if outcome != Outcome::Sent {
            return;
        }
        rt.message_generation
    };

    sleep(Duration::from_millis(FORM_MESSAGE_HIDE_MS)).await;
    if let Some(rt) = weak.upgrade() {
        let mut guard = rt.borrow_mut();
        let rt = &mut *guard;
        if rt.live && rt.message_generation == generation {
            rt.form.dismiss();
            rt.dom.paint_form(&rt.form);
        }
    }
}

fn begin_submit(weak: &Weak<RefCell<Runtime>>) -> Option<(Vec<(String, String)>, String)> {
    let rt = weak.upgrade()?;
    let mut guard = rt.borrow_mut();
    let rt = &mut *guard;
    if !rt.live || rt.form.submitting {
        return None;
    }
    let form = rt.dom.read_form();
    let fields = rt.form.begin(form);
    rt.dom.paint_form(&rt.form);
    Some((fields?, rt.endpoint.clone()))
}
