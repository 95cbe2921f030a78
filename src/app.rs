//! Page assembly: element lookup, controller construction, event wiring.
//!
//! ARCHITECTURE
//! ============
//! All controllers live in one [`App`] behind `Rc<RefCell<_>>`. DOM listeners
//! hold strong references (they live as long as the page); timers hold weak
//! ones through [`BrowserScheduler`]. Every handler borrows the app for the
//! duration of one event, so each event's state changes and re-render finish
//! before the next event is handled.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, ScrollBehavior, ScrollToOptions, TouchEvent, Window,
};
use widgets::carousel::{Carousel, NavButton};
use widgets::config::PageConfig;
use widgets::deterrent::Deterrent;
use widgets::input::{Intercept, Key, Modifiers};
use widgets::scroll::{AnchorOutcome, AnchorScroll};
use widgets::skills::SkillBars;
use widgets::theme::{Theme, ThemeController};
use widgets::timer::{Scheduler, Task, TimerId};

use crate::dom::{self, roles};
use crate::error::MountError;
use crate::scheduler::BrowserScheduler;
use crate::views::{DocumentTheme, DomCarousel, DomOverlay, DomSkillBars, LocalStorage};

/// Every element the page behaviors need, resolved up front.
struct Elements {
    root: HtmlElement,
    theme_toggle: HtmlElement,
    track: HtmlElement,
    prev: HtmlElement,
    next: HtmlElement,
    dot_container: HtmlElement,
    slides: Vec<HtmlElement>,
    skill_bars: Vec<HtmlElement>,
    popup: HtmlElement,
    popup_close: HtmlElement,
    anchors: Vec<HtmlElement>,
}

impl Elements {
    fn lookup(document: &Document) -> Result<Self, MountError> {
        let root = document
            .document_element()
            .ok_or_else(|| MountError::Missing { role: "document root", selector: "html".into() })?
            .dyn_into::<HtmlElement>()
            .map_err(|_| MountError::NotHtml { role: "document root", selector: "html".into() })?;
        let popup = dom::require_by_id(document, "inspection popup", roles::POPUP)?;
        let popup_close = dom::require_within(&popup, "popup close control", roles::POPUP_CLOSE)?;

        Ok(Self {
            root,
            theme_toggle: dom::require_by_id(document, "theme toggle", roles::THEME_TOGGLE)?,
            track: dom::require_by_id(document, "carousel track", roles::CAROUSEL_TRACK)?,
            prev: dom::require_by_id(document, "previous button", roles::PREV_BUTTON)?,
            next: dom::require_by_id(document, "next button", roles::NEXT_BUTTON)?,
            dot_container: dom::require_by_id(document, "dot container", roles::CAROUSEL_DOTS)?,
            slides: dom::query_all(document, "slide", roles::SLIDES)?,
            skill_bars: dom::query_all(document, "skill bar", roles::SKILL_BARS)?,
            popup,
            popup_close,
            anchors: dom::query_all(document, "fragment anchor", roles::FRAGMENT_ANCHORS)?,
        })
    }
}

/// Page state shared by every listener and timer.
pub struct App {
    scheduler: BrowserScheduler,
    theme: ThemeController<DocumentTheme, LocalStorage>,
    carousel: Carousel<DomCarousel>,
    skills: SkillBars<DomSkillBars>,
    deterrent: Deterrent<DomOverlay>,
    body: Option<HtmlElement>,
    fade_in_ms: u32,
}

impl App {
    fn start(&mut self, prefers_dark: bool) {
        self.theme.initialize(prefers_dark);
        self.carousel.init(&mut self.scheduler);

        if let Some(body) = &self.body {
            let style = body.style();
            let _ = style.set_property("opacity", "0");
            let _ = style.set_property("transition", "opacity 0.3s ease");
            self.scheduler.set_timeout(self.fade_in_ms, Task::RevealPage);
        }
    }

    /// Route a fired timer to its controller.
    pub fn on_timer(&mut self, id: TimerId, task: Task) {
        self.scheduler.mark_fired(id);
        log::trace!("timer {} fired: {task:?} ({} armed)", id.raw(), self.scheduler.active_timers());
        match task {
            Task::Carousel(t) => self.carousel.handle_task(t, &mut self.scheduler),
            Task::Theme(t) => self.theme.handle_task(t),
            Task::RestoreSkillBar(index) => self.skills.restore(index),
            Task::RevealPage => {
                if let Some(body) = &self.body {
                    let _ = body.style().set_property("opacity", "1");
                }
            }
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(&mut self.scheduler)
    }

    /// Document-level keydown: shortcut filter first, then arrow navigation.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Intercept {
        let verdict = self.deterrent.on_key_down(key, modifiers);
        self.carousel.on_key_down(key, &mut self.scheduler);
        verdict
    }
}

fn with_app<R>(app: &Rc<RefCell<App>>, f: impl FnOnce(&mut App) -> R) -> Option<R> {
    match app.try_borrow_mut() {
        Ok(mut guard) => Some(f(&mut *guard)),
        Err(_) => {
            log::warn!("event dropped: page state busy");
            None
        }
    }
}

/// Build the controllers and attach every listener.
pub fn mount(window: &Window, document: &Document, config: &PageConfig) -> Result<Rc<RefCell<App>>, MountError> {
    let el = Elements::lookup(document)?;
    show_current_year(document);

    let prefers_dark = prefers_dark(window);
    let storage = match window.local_storage() {
        Ok(storage) => storage,
        Err(e) => {
            log::debug!("storage: localStorage denied: {}", crate::error::describe(&e));
            None
        }
    };

    let app = Rc::new_cyclic(|weak| {
        RefCell::new(App {
            scheduler: BrowserScheduler::new(weak.clone()),
            theme: ThemeController::new(
                DocumentTheme::new(el.root.clone(), el.theme_toggle.clone()),
                LocalStorage::new(storage),
                config.theme.clone(),
            ),
            carousel: Carousel::new(
                DomCarousel::new(
                    document.clone(),
                    el.track.clone(),
                    el.slides.clone(),
                    el.dot_container.clone(),
                    el.prev.clone(),
                    el.next.clone(),
                ),
                el.slides.len(),
                config.carousel.clone(),
            ),
            skills: SkillBars::new(DomSkillBars::new(el.skill_bars.clone()), config.skills.clone()),
            deterrent: Deterrent::new(DomOverlay::new(el.popup.clone())),
            body: document.body(),
            fade_in_ms: config.fade_in_ms,
        })
    });
    app.borrow_mut().start(prefers_dark);

    wire_theme(&app, &el)?;
    wire_carousel(&app, window, &el)?;
    wire_keyboard(&app, document)?;
    wire_anchors(window, document, &el, &AnchorScroll::new(&config.scroll))?;
    observe_skill_bars(&app, &el, config.skills.visibility_threshold)?;
    wire_deterrent(&app, document, &el)?;

    log::info!(
        "page mounted: {} slides, {} skill bars, {} anchors",
        el.slides.len(),
        el.skill_bars.len(),
        el.anchors.len()
    );
    Ok(app)
}

fn show_current_year(document: &Document) {
    if let Some(node) = document.get_element_by_id(roles::CURRENT_YEAR) {
        let year = js_sys::Date::new_0().get_full_year();
        node.set_text_content(Some(&year.to_string()));
    }
}

fn prefers_dark(window: &Window) -> bool {
    matches!(window.match_media("(prefers-color-scheme: dark)"), Ok(Some(query)) if query.matches())
}

fn wire_theme(app: &Rc<RefCell<App>>, el: &Elements) -> Result<(), MountError> {
    let handle = Rc::clone(app);
    dom::listen(&el.theme_toggle, "click", move |_| {
        with_app(&handle, App::toggle_theme);
    })
}

fn wire_carousel(app: &Rc<RefCell<App>>, window: &Window, el: &Elements) -> Result<(), MountError> {
    for (button, element) in [(NavButton::Prev, &el.prev), (NavButton::Next, &el.next)] {
        let handle = Rc::clone(app);
        dom::listen(element, "click", move |_| {
            with_app(&handle, |app| app.carousel.on_button_click(button, &mut app.scheduler));
        })?;
    }

    let dots = app.borrow().carousel.view().dots().to_vec();
    for (index, dot) in dots.iter().enumerate() {
        let handle = Rc::clone(app);
        dom::listen(dot, "click", move |_| {
            with_app(&handle, |app| app.carousel.on_dot_click(index, &mut app.scheduler));
        })?;
    }

    let handle = Rc::clone(app);
    dom::listen(&el.track, "touchstart", move |event| {
        if let Some(x) = touch_x(&event, false) {
            with_app(&handle, |app| app.carousel.on_touch_start(x, &mut app.scheduler));
        }
    })?;

    let handle = Rc::clone(app);
    dom::listen(&el.track, "touchend", move |event| {
        if let Some(x) = touch_x(&event, true) {
            with_app(&handle, |app| app.carousel.on_touch_end(x, &mut app.scheduler));
        }
    })?;

    let handle = Rc::clone(app);
    dom::listen(&el.track, "mouseenter", move |_| {
        with_app(&handle, |app| app.carousel.on_pointer_enter(&mut app.scheduler));
    })?;

    let handle = Rc::clone(app);
    dom::listen(&el.track, "mouseleave", move |_| {
        with_app(&handle, |app| app.carousel.on_pointer_leave(&mut app.scheduler));
    })?;

    let handle = Rc::clone(app);
    dom::listen(window, "resize", move |_| {
        with_app(&handle, |app| app.carousel.render());
    })
}

/// Horizontal position of the first active (or changed) touch point.
fn touch_x(event: &Event, changed: bool) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?;
    let list = if changed { touch.changed_touches() } else { touch.touches() };
    list.get(0).map(|t| f64::from(t.client_x()))
}

fn wire_keyboard(app: &Rc<RefCell<App>>, document: &Document) -> Result<(), MountError> {
    let handle = Rc::clone(app);
    dom::listen(document, "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::new(key_event.key());
        let modifiers = Modifiers {
            shift: key_event.shift_key(),
            ctrl: key_event.ctrl_key(),
            alt: key_event.alt_key(),
            meta: key_event.meta_key(),
        };
        if with_app(&handle, |app| app.on_key_down(&key, modifiers)).is_some_and(Intercept::prevents_default) {
            event.prevent_default();
        }
    })
}

fn wire_anchors(window: &Window, document: &Document, el: &Elements, scroll: &AnchorScroll) -> Result<(), MountError> {
    for anchor in &el.anchors {
        let link = anchor.clone();
        let window = window.clone();
        let document = document.clone();
        let scroll = scroll.clone();
        dom::listen(anchor, "click", move |event| {
            let href = link.get_attribute("href").unwrap_or_default();
            let outcome = scroll.on_anchor_click(&href, |selector| element_top(&document, selector));
            if outcome.prevents_default() {
                event.prevent_default();
            }
            if let AnchorOutcome::ScrollTo { top } = outcome {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }
        })?;
    }
    Ok(())
}

fn element_top(document: &Document, selector: &str) -> Option<f64> {
    match document.query_selector(selector) {
        Ok(Some(target)) => target.dyn_into::<HtmlElement>().ok().map(|t| f64::from(t.offset_top())),
        Ok(None) => None,
        Err(_) => {
            log::debug!("scroll: {selector} is not a valid selector");
            None
        }
    }
}

fn observe_skill_bars(app: &Rc<RefCell<App>>, el: &Elements, threshold: f64) -> Result<(), MountError> {
    if el.skill_bars.is_empty() {
        return Ok(());
    }

    let handle = Rc::clone(app);
    let bars = el.skill_bars.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = bars.iter().position(|bar| {
                    let bar: &Element = bar;
                    *bar == target
                }) else {
                    continue;
                };
                let ratio = entry.intersection_ratio();
                let started = with_app(&handle, |app| app.skills.on_visibility(index, ratio, &mut app.scheduler));
                if started == Some(true) {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        .map_err(|e| MountError::dom("IntersectionObserver", &e))?;
    for bar in &el.skill_bars {
        observer.observe(bar);
    }
    // The observer calls back for the page's lifetime.
    callback.forget();
    Ok(())
}

fn wire_deterrent(app: &Rc<RefCell<App>>, document: &Document, el: &Elements) -> Result<(), MountError> {
    let handle = Rc::clone(app);
    dom::listen(document, "contextmenu", move |event| {
        if with_app(&handle, |app| app.deterrent.on_context_menu()).is_none_or(Intercept::prevents_default) {
            event.prevent_default();
        }
    })?;

    let handle = Rc::clone(app);
    dom::listen(&el.popup_close, "click", move |_| {
        with_app(&handle, |app| app.deterrent.close());
    })
}
