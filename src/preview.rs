// Modal overlay that shows a linked document (certificates, letters) in an
// embedded viewer.

use crate::utils;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

pub const MODAL_ID: &str = "pdfModal";
pub const VIEWER_ID: &str = "pdfViewer";
pub const CLOSE_ID: &str = "pdfModalClose";
pub const ACTIVE_CLASS: &str = "active";
pub const SOURCE_ATTRIBUTE: &str = "data-pdf";
pub const CLICK_CARDS: &str = ".award[data-pdf], .testimonial-card[data-pdf]";
pub const KEYBOARD_CARDS: &str = ".cert[data-pdf]";

// Keys that activate a focused card
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewState {
    active: bool,
    source: Option<String>,
    // bumped on every open so a stale delayed clear can be told apart
    generation: u64,
}

impl PreviewState {
    pub const CLEAR_DELAY_MS: i32 = 350;

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn open(&mut self, source: &str) -> bool {
        if source.is_empty() {
            return false;
        }
        self.active = true;
        self.source = Some(source.to_owned());
        self.generation += 1;
        true
    }

    // Returns the generation a delayed clear should carry, None if already closed
    pub fn close(&mut self) -> Option<u64> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(self.generation)
    }

    // Drops the document once the closing transition is over, unless the
    // overlay was opened again in the meantime
    pub fn clear(&mut self, generation: u64) -> bool {
        if self.active || generation != self.generation {
            return false;
        }
        self.source = None;
        true
    }
}

struct Overlay {
    modal: Element,
    viewer: Element,
    body: HtmlElement,
    state: RefCell<PreviewState>,
}

impl Overlay {
    fn open(&self, source: &str) {
        if !self.state.borrow_mut().open(source) {
            return;
        }
        let encoded = String::from(js_sys::encode_uri(source));
        let _ = self.viewer.set_attribute("src", &encoded);
        let _ = self.modal.class_list().add_1(ACTIVE_CLASS);
        utils::set_style(&self.body, "overflow", "hidden");
    }

    fn close(self: &Rc<Self>) {
        let generation = match self.state.borrow_mut().close() {
            Some(generation) => generation,
            None => return,
        };
        let _ = self.modal.class_list().remove_1(ACTIVE_CLASS);
        let _ = self.body.style().remove_property("overflow");
        let overlay = self.clone();
        let cleared = utils::set_timeout(PreviewState::CLEAR_DELAY_MS, move || {
            if overlay.state.borrow_mut().clear(generation) {
                let _ = overlay.viewer.set_attribute("src", "");
            }
        });
        if let Err(err) = cleared {
            web_sys::console::error_2(&"could not schedule viewer reset".into(), &err);
        }
    }

    fn open_from(&self, card: &Element) {
        if let Some(source) = card.get_attribute(SOURCE_ATTRIBUTE) {
            self.open(&source);
        }
    }
}

pub fn mount() -> Result<bool, JsValue> {
    let (modal, viewer, close_button) = match (
        utils::element_by_id::<Element>(MODAL_ID)?,
        utils::element_by_id::<Element>(VIEWER_ID)?,
        utils::element_by_id::<Element>(CLOSE_ID)?,
    ) {
        (Some(modal), Some(viewer), Some(close)) => (modal, viewer, close),
        _ => return Ok(false),
    };
    let overlay = Rc::new(Overlay {
        modal: modal.clone(),
        viewer,
        body: utils::body()?,
        state: RefCell::new(PreviewState::default()),
    });

    {
        let overlay = overlay.clone();
        utils::listen(&close_button, "click", move |_: web_sys::Event| overlay.close())?;
    }
    {
        let overlay = overlay.clone();
        let backdrop = modal.clone();
        utils::listen(&modal, "click", move |event: web_sys::Event| {
            let on_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map_or(false, |t| t == backdrop);
            if on_backdrop {
                overlay.close();
            }
        })?;
    }
    {
        let overlay = overlay.clone();
        let document = utils::document()?;
        utils::listen(&document, "keydown", move |event: KeyboardEvent| {
            if event.key() == "Escape" && overlay.state.borrow().is_active() {
                overlay.close();
            }
        })?;
    }

    for card in utils::query_all::<Element>(CLICK_CARDS)? {
        let (overlay, target) = (overlay.clone(), card.clone());
        utils::listen(&card, "click", move |_: web_sys::Event| overlay.open_from(&target))?;
    }
    for card in utils::query_all::<Element>(KEYBOARD_CARDS)? {
        {
            let (overlay, target) = (overlay.clone(), card.clone());
            utils::listen(&card, "click", move |_: web_sys::Event| overlay.open_from(&target))?;
        }
        let (overlay, target) = (overlay.clone(), card.clone());
        utils::listen(&card, "keydown", move |event: KeyboardEvent| {
            if is_activation_key(&event.key()) {
                event.prevent_default();
                overlay.open_from(&target);
            }
        })?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close_then_clear() {
        let mut s = PreviewState::default();
        assert!(s.open("docs/award.pdf"));
        assert!(s.is_active());
        let generation = s.close().unwrap();
        assert!(!s.is_active());
        // still showing during the closing transition
        assert_eq!(s.source(), Some("docs/award.pdf"));
        assert!(s.clear(generation));
        assert_eq!(s.source(), None);
    }

    #[test]
    fn empty_source_does_not_open() {
        let mut s = PreviewState::default();
        assert!(!s.open(""));
        assert!(!s.is_active());
    }

    #[test]
    fn closing_twice_schedules_one_clear() {
        let mut s = PreviewState::default();
        s.open("a.pdf");
        assert!(s.close().is_some());
        assert!(s.close().is_none());
    }

    #[test]
    fn reopening_cancels_pending_clear() {
        let mut s = PreviewState::default();
        s.open("a.pdf");
        let stale = s.close().unwrap();
        s.open("b.pdf");
        assert!(!s.clear(stale));
        assert_eq!(s.source(), Some("b.pdf"));
        let fresh = s.close().unwrap();
        assert!(!s.clear(stale));
        assert!(s.clear(fresh));
    }

    #[test]
    fn enter_and_space_activate() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Escape"));
    }
}
