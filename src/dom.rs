//! DOM contract and `web-sys` lookup / listener helpers.
//!
//! The page markup is expected to carry these roles. Everything except the
//! year text node is required; a missing one aborts mounting.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList};

use crate::error::MountError;

pub mod roles {
    pub const THEME_TOGGLE: &str = "themeToggle";
    pub const CURRENT_YEAR: &str = "currentYear";
    pub const CAROUSEL_TRACK: &str = "carouselTrack";
    pub const PREV_BUTTON: &str = "prevBtn";
    pub const NEXT_BUTTON: &str = "nextBtn";
    pub const CAROUSEL_DOTS: &str = "carouselDots";
    pub const POPUP: &str = "dev-protect-popup";

    pub const SLIDES: &str = ".carousel-slide";
    pub const SKILL_BARS: &str = ".level-bar";
    pub const POPUP_CLOSE: &str = ".close-btn";
    pub const FRAGMENT_ANCHORS: &str = r##"a[href^="#"]"##;
}

pub const ACTIVE_CLASS: &str = "active";
pub const DOT_CLASS: &str = "carousel-dot";
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Look up a required element by id.
pub fn require_by_id(document: &Document, role: &'static str, id: &str) -> Result<HtmlElement, MountError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| MountError::Missing { role, selector: format!("#{id}") })?;
    into_html(element, role, &format!("#{id}"))
}

/// Look up a required descendant of `parent` by selector.
pub fn require_within(parent: &Element, role: &'static str, selector: &str) -> Result<HtmlElement, MountError> {
    let element = parent
        .query_selector(selector)
        .map_err(|e| MountError::dom("querySelector", &e))?
        .ok_or_else(|| MountError::Missing { role, selector: selector.to_owned() })?;
    into_html(element, role, selector)
}

/// All HTML elements in the document matching `selector`, in document order.
pub fn query_all(document: &Document, role: &'static str, selector: &str) -> Result<Vec<HtmlElement>, MountError> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| MountError::dom("querySelectorAll", &e))?;
    collect_html(&list, role, selector)
}

fn collect_html(list: &NodeList, role: &'static str, selector: &str) -> Result<Vec<HtmlElement>, MountError> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|node| {
            node.dyn_into::<HtmlElement>()
                .map_err(|_| MountError::NotHtml { role, selector: selector.to_owned() })
        })
        .collect()
}

fn into_html(element: Element, role: &'static str, selector: &str) -> Result<HtmlElement, MountError> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| MountError::NotHtml { role, selector: selector.to_owned() })
}

/// Attach a listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), MountError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| MountError::dom("addEventListener", &e))?;
    // Listeners are never removed; the page owns them until unload.
    closure.forget();
    Ok(())
}
