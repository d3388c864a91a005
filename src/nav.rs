// Navigation: the overlay menu used on narrow screens and the side-dot
// indicator of the section currently in view.

use crate::utils;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

pub const TOGGLE_ID: &str = "navToggle";
pub const MENU_ID: &str = "navMenu";
pub const LINK_SELECTOR: &str = ".nav-link";
pub const SIDE_DOT_SELECTOR: &str = ".side-dot";

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MobileNav {
    open: bool,
}

impl MobileNav {
    // Keep in sync with the stylesheet breakpoint for the overlay menu
    pub const OVERLAY_BREAKPOINT: f64 = 1600.0;

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    // Wide viewports show the inline menu, so the overlay must not stay open
    pub fn on_resize(&mut self, viewport_width: f64) -> bool {
        if viewport_width > MobileNav::OVERLAY_BREAKPOINT {
            self.close();
            true
        } else {
            false
        }
    }
}

struct NavElements {
    toggle: Element,
    menu: HtmlElement,
    body: HtmlElement,
}

impl NavElements {
    fn render(&self, nav: MobileNav) {
        let open = nav.is_open();
        let _ = self.toggle.class_list().toggle_with_force("active", open);
        let _ = self.menu.class_list().toggle_with_force("open", open);
        // locks page scroll behind the overlay
        let _ = self.body.class_list().toggle_with_force("nav-open", open);
        if open {
            self.menu.set_scroll_top(0);
        }
    }
}

pub fn mount_mobile_nav() -> Result<bool, JsValue> {
    let (toggle, menu) = match (
        utils::element_by_id::<Element>(TOGGLE_ID)?,
        utils::element_by_id::<HtmlElement>(MENU_ID)?,
    ) {
        (Some(toggle), Some(menu)) => (toggle, menu),
        _ => return Ok(false),
    };
    let elements = Rc::new(NavElements {
        toggle: toggle.clone(),
        menu: menu.clone(),
        body: utils::body()?,
    });
    let state = Rc::new(Cell::new(MobileNav::default()));

    {
        let (state, elements) = (state.clone(), elements.clone());
        utils::listen(&toggle, "click", move |_: web_sys::Event| {
            let mut nav = state.get();
            nav.toggle();
            state.set(nav);
            elements.render(nav);
        })?;
    }
    for link in utils::query_all_in::<Element>(&menu, LINK_SELECTOR)? {
        let (state, elements) = (state.clone(), elements.clone());
        utils::listen(&link, "click", move |_: web_sys::Event| {
            let mut nav = state.get();
            nav.close();
            state.set(nav);
            elements.render(nav);
        })?;
    }
    let window = utils::window()?;
    for kind in &["resize", "orientationchange"] {
        let (state, elements) = (state.clone(), elements.clone());
        utils::listen(&window, kind, move |_: web_sys::Event| {
            let mut nav = state.get();
            if nav.on_resize(utils::inner_width().unwrap_or(0.0)) {
                state.set(nav);
                elements.render(nav);
            }
        })?;
    }
    Ok(true)
}

// The side dot linked to a section, by its `href="#id"`
pub fn dot_targets(href: Option<&str>, section_id: &str) -> bool {
    match href {
        Some(href) => href.strip_prefix('#') == Some(section_id),
        None => false,
    }
}

pub struct SectionTracker {
    observer: IntersectionObserver,
    // kept alive for as long as the observer may call it
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl SectionTracker {
    // Only a band between 40% from the top and 50% from the bottom counts
    pub const ROOT_MARGIN: &'static str = "-40% 0px -50% 0px";

    #[allow(deprecated)]
    pub fn mount() -> Result<Option<SectionTracker>, JsValue> {
        let sections = utils::query_all::<Element>("section")?;
        let dots = utils::query_all::<Element>(SIDE_DOT_SELECTOR)?;
        if sections.is_empty() || dots.is_empty() {
            return Ok(None);
        }

        let on_entries = move |entries: js_sys::Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = match entry.dyn_into() {
                    Ok(entry) => entry,
                    Err(_) => continue,
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let id = entry.target().id();
                for dot in &dots {
                    let active = dot_targets(dot.get_attribute("href").as_deref(), &id);
                    let _ = dot.class_list().toggle_with_force("active", active);
                }
            }
        };
        let callback = Closure::wrap(
            Box::new(on_entries) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>,
        );

        let mut options = IntersectionObserverInit::new();
        options.root_margin(SectionTracker::ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for section in &sections {
            observer.observe(section);
        }
        Ok(Some(SectionTracker {
            observer,
            _callback: callback,
        }))
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let mut nav = MobileNav::default();
        assert!(nav.toggle());
        assert!(nav.is_open());
        assert!(!nav.toggle());
    }

    #[test]
    fn close_is_idempotent() {
        let mut nav = MobileNav::default();
        nav.toggle();
        nav.close();
        nav.close();
        assert!(!nav.is_open());
    }

    #[test]
    fn resize_closes_only_past_breakpoint() {
        let mut nav = MobileNav::default();
        nav.toggle();
        assert!(!nav.on_resize(1600.0));
        assert!(nav.is_open());
        assert!(nav.on_resize(1601.0));
        assert!(!nav.is_open());
    }

    #[test]
    fn dots_match_on_fragment() {
        assert!(dot_targets(Some("#about"), "about"));
        assert!(!dot_targets(Some("#about"), "projects"));
        assert!(!dot_targets(Some("about"), "about"));
        assert!(!dot_targets(None, "about"));
    }
}
