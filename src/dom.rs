//! Page binding: element lookup, model extraction and effect painting.
//!
//! Requires a browser environment. Missing optional elements are logged
//! once at bind time and their effects are skipped; the rest of the page
//! keeps working.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, Window,
};

use crate::config::{CONFIG_ATTRIBUTE, FolioConfig};
use crate::contact::{ContactForm, Field, FormView};
use crate::effect::{BarFamily, Effect, Particle};
use crate::engine::PageModel;
use crate::error::DomError;
use crate::reveal::{Rect, WatchId, WatchKind};
use crate::scroll::ScrollSample;
use crate::stage::{StageModel, parse_counter_target, parse_percent};

/// Log a failed browser call and carry on.
pub(crate) fn report<T>(what: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        log::warn!("{what}: {err:?}");
    }
}

/// Downcast a JS object, `None` if it is some other type.
fn cast<T: JsCast>(value: impl JsCast) -> Option<T> {
    match value.dyn_into::<T>() {
        Ok(cast) => Some(cast),
        Err(_) => None,
    }
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    report(property, el.style().set_property(property, value));
}

fn by_id(document: &Document, id: &'static str) -> Option<HtmlElement> {
    let found = document.get_element_by_id(id).and_then(cast::<HtmlElement>);
    if found.is_none() {
        log::warn!("{}", DomError::MissingElement(id));
    }
    found
}

/// All elements matching `selector`, in document order.
pub(crate) fn query_all(root: &Document, selector: &str) -> Vec<HtmlElement> {
    let list = match root.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("bad selector {selector}: {err:?}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(cast::<HtmlElement>)
        .collect()
}

fn first(root: &Document, selector: &str) -> Option<HtmlElement> {
    match root.query_selector(selector) {
        Ok(found) => found.and_then(cast::<HtmlElement>),
        Err(err) => {
            log::warn!("bad selector {selector}: {err:?}");
            None
        }
    }
}

/// References to every element the page behaviour touches.
pub struct Dom {
    pub window: Window,
    pub document: Document,
    body: HtmlElement,
    pub theme_toggle: Option<HtmlElement>,
    navbar: Option<HtmlElement>,
    pub hamburger: Option<HtmlElement>,
    nav_menu: Option<HtmlElement>,
    page_loader: Option<HtmlElement>,
    progress_fill: Option<HtmlElement>,
    progress_percent: Option<HtmlElement>,
    pub scroll_top: Option<HtmlElement>,
    pub contact_form: Option<HtmlFormElement>,
    submit_button: Option<HtmlButtonElement>,
    form_message: Option<HtmlElement>,
    hero: Option<HtmlElement>,
    hero_image: Option<HtmlElement>,
    hero_title: Option<HtmlElement>,
    watched: Vec<(HtmlElement, WatchKind)>,
    counters: Vec<HtmlElement>,
    skill_bars: Vec<HtmlElement>,
    progress_bars: Vec<HtmlElement>,
    categories: Vec<HtmlElement>,
}

impl Dom {
    /// Locate the page's elements.
    ///
    /// # Errors
    ///
    /// Fails only without a window, document or body.
    pub fn bind() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let document = window.document().ok_or(DomError::NoWindow)?;
        let body = document.body().ok_or(DomError::MissingElement("body"))?;

        let watched = WatchKind::ALL
            .into_iter()
            .flat_map(|kind| query_all(&document, kind.selector()).into_iter().map(move |el| (el, kind)))
            .collect();
        let contact_form = by_id(&document, "contactForm").and_then(cast::<HtmlFormElement>);
        let submit_button = by_id(&document, "submitBtn").and_then(cast::<HtmlButtonElement>);

        Ok(Self {
            theme_toggle: by_id(&document, "themeToggle"),
            navbar: by_id(&document, "navbar"),
            hamburger: by_id(&document, "hamburger"),
            nav_menu: by_id(&document, "navMenu"),
            page_loader: by_id(&document, "pageLoader"),
            progress_fill: by_id(&document, "progressFill"),
            progress_percent: by_id(&document, "progressPercent"),
            scroll_top: by_id(&document, "scrollToTop"),
            contact_form,
            submit_button,
            form_message: by_id(&document, "formMessage"),
            hero: first(&document, ".hero"),
            hero_image: first(&document, ".profile-image"),
            hero_title: first(&document, ".hero-title"),
            watched,
            counters: query_all(&document, ".stat-number"),
            skill_bars: query_all(&document, ".skill-progress"),
            progress_bars: query_all(&document, ".progress-fill"),
            categories: query_all(&document, ".skill-category"),
            window,
            document,
            body,
        })
    }

    /// Settings from the body's config attribute.
    #[must_use]
    pub fn config(&self) -> FolioConfig {
        FolioConfig::from_attribute(self.body.get_attribute(CONFIG_ATTRIBUTE).as_deref())
    }

    /// Static facts read from markup, indexed like the bound element lists.
    #[must_use]
    pub fn model(&self) -> PageModel {
        let watched = self
            .watched
            .iter()
            .map(|(el, kind)| {
                let id = el.id();
                ((!id.is_empty()).then_some(id), *kind)
            })
            .collect();
        let attr = |els: &[HtmlElement], name: &str| -> Vec<Option<String>> {
            els.iter().map(|el| el.get_attribute(name)).collect()
        };
        let stage = StageModel {
            counters: attr(&self.counters, "data-target")
                .iter()
                .map(|raw| raw.as_deref().and_then(parse_counter_target))
                .collect(),
            skill_bars: attr(&self.skill_bars, "data-width")
                .iter()
                .map(|raw| raw.as_deref().and_then(parse_percent))
                .collect(),
            progress_bars: attr(&self.progress_bars, "data-progress")
                .iter()
                .map(|raw| raw.as_deref().and_then(parse_percent))
                .collect(),
            categories: self.categories.len(),
        };
        let hero_title = self.hero_title.as_ref().and_then(|el| el.text_content()).filter(|t| !t.is_empty());
        PageModel { watched, stage, hero_title }
    }

    /// Current scroll position with rects for the `pending` elements.
    #[must_use]
    pub fn sample(&self, pending: &[WatchId]) -> ScrollSample {
        let offset_y = self.window.scroll_y().unwrap_or(0.0);
        let viewport_height = self.window.inner_height().map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
        let rects = pending
            .iter()
            .filter_map(|id| {
                let (el, _) = self.watched.get(id.0)?;
                let rect = el.get_bounding_client_rect();
                Some((*id, Rect { top: rect.top(), height: rect.height() }))
            })
            .collect();
        ScrollSample { offset_y, viewport_height, rects }
    }

    /// Paint one effect.
    #[allow(clippy::cast_precision_loss)]
    pub fn apply(&self, effect: &Effect) {
        match effect {
            Effect::SetTheme(theme) => report("data-theme", self.body.set_attribute("data-theme", theme.as_str())),
            Effect::SetToggleIcon { icon_class, title } => {
                if let Some(toggle) = &self.theme_toggle {
                    if let Ok(Some(icon)) = toggle.query_selector("i") {
                        icon.set_class_name(icon_class);
                    }
                    toggle.set_title(title);
                }
            }
            Effect::SpinToggle(spun) => {
                if let Some(toggle) = &self.theme_toggle {
                    set_style(toggle, "transform", if *spun { "rotate(360deg)" } else { "rotate(0deg)" });
                }
            }
            Effect::SetNavbarBackground(color) => {
                if let Some(navbar) = &self.navbar {
                    set_style(navbar, "background", color);
                }
            }
            Effect::SetScrollTopVisible(visible) => {
                if let Some(button) = &self.scroll_top {
                    set_style(button, "opacity", if *visible { "1" } else { "0" });
                    set_style(button, "visibility", if *visible { "visible" } else { "hidden" });
                }
            }
            Effect::SetParallax(offset) => {
                if let Some(image) = &self.hero_image {
                    set_style(image, "transform", &format!("translateY({offset}px)"));
                }
            }
            Effect::PrepareReveal(ids) => {
                for (el, _) in ids.iter().filter_map(|id| self.watched.get(id.0)) {
                    report("animate-on-scroll", el.class_list().add_1("animate-on-scroll"));
                }
            }
            Effect::MarkRevealed(id) => {
                if let Some((el, _)) = self.watched.get(id.0) {
                    report("animated", el.class_list().add_1("animated"));
                }
            }
            Effect::SetCounterText { index, text } => {
                if let Some(el) = self.counters.get(*index) {
                    el.set_text_content(Some(text));
                }
            }
            Effect::SetBarWidth { family, index, percent } => {
                let bars = match family {
                    BarFamily::Skill => &self.skill_bars,
                    BarFamily::Progress => &self.progress_bars,
                };
                if let Some(bar) = bars.get(*index) {
                    set_style(bar, "width", &format!("{percent}%"));
                }
            }
            Effect::StaggerCategory { index, delay_ms } => {
                if let Some(el) = self.categories.get(*index) {
                    set_style(el, "animation-delay", &format!("{}s", *delay_ms as f64 / 1000.0));
                    report("fade-in", el.class_list().add_1("fade-in"));
                }
            }
            Effect::SetLoaderProgress { percent, label } => {
                if let Some(fill) = &self.progress_fill {
                    set_style(fill, "width", &format!("{percent}%"));
                }
                if let Some(text) = &self.progress_percent {
                    text.set_text_content(Some(label));
                }
            }
            Effect::FadeLoader => {
                if let Some(loader) = &self.page_loader {
                    set_style(loader, "opacity", "0");
                }
            }
            Effect::HideLoader => {
                if let Some(loader) = &self.page_loader {
                    set_style(loader, "display", "none");
                }
            }
            Effect::SetMenuOpen(open) => {
                for el in [&self.hamburger, &self.nav_menu].into_iter().flatten() {
                    report("menu active", el.class_list().toggle_with_force("active", *open));
                }
            }
            Effect::SetHeroTitle(text) => {
                if let Some(title) = &self.hero_title {
                    title.set_text_content(Some(text));
                }
            }
            Effect::SpawnParticles(particles) => self.spawn_particles(particles),
        }
    }

    fn spawn_particles(&self, particles: &[Particle]) {
        let Some(hero) = &self.hero else {
            return;
        };
        for p in particles {
            let el = match self.document.create_element("div") {
                Ok(el) => el,
                Err(err) => {
                    log::warn!("particle: {err:?}");
                    return;
                }
            };
            el.set_class_name("particle");
            let css = format!(
                "position: absolute; width: 2px; height: 2px; background: rgba(59, 130, 246, 0.5); \
                 border-radius: 50%; pointer-events: none; \
                 animation: float {:.2}s ease-in-out infinite; left: {:.2}%; top: {:.2}%; \
                 animation-delay: {:.2}s;",
                p.duration_s, p.left_pct, p.top_pct, p.delay_s
            );
            report("particle style", el.set_attribute("style", &css));
            report("particle append", hero.append_child(&el));
        }
    }

    // --- Contact form ---

    /// Current form values.
    #[must_use]
    pub fn read_form(&self) -> ContactForm {
        let Some(form) = &self.contact_form else {
            return ContactForm::default();
        };
        let value = |field: Field| -> String {
            let selector = format!("[name=\"{}\"]", field.name());
            match form.query_selector(&selector) {
                Ok(Some(el)) => input_value(&el),
                _ => String::new(),
            }
        };
        let mut hidden = Vec::new();
        if let Ok(list) = form.query_selector_all("input[type=\"hidden\"]") {
            for node in (0..list.length()).filter_map(|i| list.item(i)) {
                if let Some(input) = cast::<HtmlInputElement>(node) {
                    hidden.push((input.name(), input.value()));
                }
            }
        }
        ContactForm {
            full_name: value(Field::FullName),
            email: value(Field::Email),
            mobile: value(Field::Mobile),
            subject: value(Field::Subject),
            message: value(Field::Message),
            hidden,
        }
    }

    /// Clear the form's inputs.
    pub fn reset_form(&self) {
        if let Some(form) = &self.contact_form {
            form.reset();
        }
    }

    /// Mirror the form view: inline errors, summary and button state.
    pub fn paint_form(&self, view: &FormView) {
        for field in Field::ALL {
            let message = view.field_errors.iter().find(|e| e.field == field).map_or("", |e| e.message);
            if let Some(el) = self.document.get_element_by_id(field.error_id()) {
                el.set_text_content(Some(message));
            }
        }

        if let Some(el) = &self.form_message {
            match view.summary {
                Some((text, tone)) => {
                    el.set_text_content(Some(text));
                    el.set_class_name(&format!("form-message {}", tone.class()));
                    set_style(el, "display", "block");
                }
                None => set_style(el, "display", "none"),
            }
        }

        if let Some(button) = &self.submit_button {
            button.set_disabled(view.submitting);
            let (text_display, loading_display) =
                if view.submitting { ("none", "inline-flex") } else { ("inline", "none") };
            for (selector, display) in [(".btn-text", text_display), (".btn-loading", loading_display)] {
                if let Ok(Some(el)) = button.query_selector(selector)
                    && let Some(el) = cast::<HtmlElement>(el)
                {
                    set_style(&el, "display", display);
                }
            }
        }
    }
}

fn input_value(el: &Element) -> String {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}
