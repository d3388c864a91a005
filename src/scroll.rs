// Scroll-linked chrome: the reading progress bar and the compact navbar state.

use crate::utils;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

pub const PROGRESS_ID: &str = "scrollProgress";
pub const NAVBAR_ID: &str = "navbar";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const NAVBAR_THRESHOLD: f64 = 60.0;

// Percentage of the scrollable distance covered, None when the page does
// not scroll
pub fn progress_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Option<f64> {
    let scrollable = scroll_height - viewport_height;
    if scrollable > 0.0 {
        Some(scroll_y / scrollable * 100.0)
    } else {
        None
    }
}

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_THRESHOLD
}

pub struct ScrollChrome;

impl ScrollChrome {
    // Returns whether anything was found to drive
    pub fn mount() -> Result<bool, JsValue> {
        let bar = utils::element_by_id::<HtmlElement>(PROGRESS_ID)?;
        let navbar = utils::element_by_id::<Element>(NAVBAR_ID)?;
        if bar.is_none() && navbar.is_none() {
            return Ok(false);
        }
        let window = utils::window()?;
        let scroller = utils::document()?.document_element();

        let on_scroll = {
            let window = window.clone();
            move |_: web_sys::Event| {
                let scroll_y = window.scroll_y().unwrap_or(0.0);
                if let (Some(bar), Some(root)) = (bar.as_ref(), scroller.as_ref()) {
                    let viewport = utils::inner_height().unwrap_or(0.0);
                    let height = root.scroll_height() as f64;
                    if let Some(pct) = progress_percent(scroll_y, height, viewport) {
                        utils::set_style(bar, "width", &format!("{}%", pct));
                    }
                }
                if let Some(navbar) = navbar.as_ref() {
                    let _ = navbar
                        .class_list()
                        .toggle_with_force(SCROLLED_CLASS, navbar_scrolled(scroll_y));
                }
            }
        };
        utils::listen(&window, "scroll", on_scroll)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_fraction_of_scrollable_height() {
        assert_eq!(progress_percent(0.0, 3000.0, 1000.0), Some(0.0));
        assert_eq!(progress_percent(1000.0, 3000.0, 1000.0), Some(50.0));
        assert_eq!(progress_percent(2000.0, 3000.0, 1000.0), Some(100.0));
    }

    #[test]
    fn short_pages_have_no_progress() {
        assert_eq!(progress_percent(0.0, 800.0, 800.0), None);
        assert_eq!(progress_percent(0.0, 600.0, 800.0), None);
    }

    #[test]
    fn navbar_compacts_past_sixty_pixels() {
        assert!(!navbar_scrolled(0.0));
        assert!(!navbar_scrolled(60.0));
        assert!(navbar_scrolled(60.5));
    }
}
