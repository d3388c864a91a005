// Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use portfolio_fx::canvas::HeroCanvas;
use portfolio_fx::loader;
use portfolio_fx::nav::SectionTracker;
use portfolio_fx::preview;
use portfolio_fx::tween::Motion;
use portfolio_fx::typing;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str, width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    let style = canvas.style();
    style.set_property("display", "block").unwrap();
    style.set_property("width", &format!("{}px", width)).unwrap();
    style.set_property("height", &format!("{}px", height)).unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn add_element(tag: &str, id: &str) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document
        .create_element(tag)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    if !id.is_empty() {
        el.set_id(id);
    }
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn missing_canvas_is_a_no_op() {
    let mounted = HeroCanvas::mount("no-such-canvas").unwrap();
    assert!(mounted.is_none());
}

#[wasm_bindgen_test]
fn mounts_field_sized_to_element() {
    let canvas = add_canvas("fieldUnderTest", 800, 600);
    let hero = HeroCanvas::mount("fieldUnderTest").unwrap().unwrap();
    assert_eq!(hero.particle_count(), 70);
    assert_eq!(hero.size(), (800.0, 600.0));
    assert_eq!((canvas.width(), canvas.height()), (800, 600));
    assert!(hero.is_running());
    hero.stop();
    assert!(!hero.is_running());
    canvas.remove();
}

#[wasm_bindgen_test]
fn non_canvas_element_is_ignored() {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    div.set_id("notACanvas");
    document.body().unwrap().append_child(&div).unwrap();
    assert!(HeroCanvas::mount("notACanvas").unwrap().is_none());
    div.remove();
}

#[wasm_bindgen_test]
fn collaborators_without_markup_stay_off() {
    assert!(!typing::mount().unwrap());
    assert!(SectionTracker::mount().unwrap().is_none());
}

#[wasm_bindgen_test]
fn preview_opens_from_card_and_closes_on_escape() {
    let modal = add_element("div", "pdfModal");
    let viewer = add_element("iframe", "pdfViewer");
    let close = add_element("button", "pdfModalClose");
    let card = add_element("div", "");
    card.set_class_name("award");
    card.set_attribute("data-pdf", "docs/award letter.pdf").unwrap();

    assert!(preview::mount().unwrap());
    card.click();
    assert!(modal.class_list().contains("active"));
    assert_eq!(
        viewer.get_attribute("src").as_deref(),
        Some("docs/award%20letter.pdf")
    );

    let init = web_sys::KeyboardEventInit::new();
    init.set_key("Escape");
    let escape =
        web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    let page = web_sys::window().unwrap().document().unwrap();
    page.dispatch_event(&escape).unwrap();
    assert!(!modal.class_list().contains("active"));

    for el in &[modal, viewer, close, card] {
        el.remove();
    }
}

#[wasm_bindgen_test]
fn loader_fades_at_once_when_page_already_loaded() {
    let page = web_sys::window().unwrap().document().unwrap();
    assert_eq!(page.ready_state(), "complete");
    let screen = add_element("div", "loader");
    let motion = Motion::new();
    loader::mount(&motion).unwrap();
    assert_eq!(motion.running(), 1);
    screen.remove();
}
