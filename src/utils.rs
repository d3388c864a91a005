// Small browser helpers shared by every effect

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlElement, NodeList, Window};

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

macro_rules! log {
    ( $( $t:tt )* ) => {
        web_sys::console::log_1(&format!( $( $t )* ).into())
    }
}

macro_rules! log_error {
    ( $( $t:tt )* ) => {
        web_sys::console::error_1(&format!( $( $t )* ).into())
    }
}

// Wraps a block in console.time / console.timeEnd
#[cfg(feature = "profiling")]
pub struct Timer<'a> {
    name: &'a str,
}

#[cfg(feature = "profiling")]
impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

#[cfg(feature = "profiling")]
impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no `document`"))
}

pub fn body() -> Result<HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| JsValue::from_str("document has no `body`"))
}

pub fn inner_width() -> Result<f64, JsValue> {
    Ok(window()?.inner_width()?.as_f64().unwrap_or(0.0))
}

pub fn inner_height() -> Result<f64, JsValue> {
    Ok(window()?.inner_height()?.as_f64().unwrap_or(0.0))
}

// Looks up an element by id and casts it, None if missing or of another type
pub fn element_by_id<T: JsCast>(id: &str) -> Result<Option<T>, JsValue> {
    Ok(document()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok()))
}

pub fn query_all<T: JsCast>(selector: &str) -> Result<Vec<T>, JsValue> {
    Ok(collect(document()?.query_selector_all(selector)?))
}

pub fn query_all_in<T: JsCast>(root: &Element, selector: &str) -> Result<Vec<T>, JsValue> {
    Ok(collect(root.query_selector_all(selector)?))
}

fn collect<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

// Registers a listener that lives for the rest of the page
pub fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// Runs `f` once after `millis`, returns the timeout handle
pub fn set_timeout<F: FnOnce() + 'static>(millis: i32, f: F) -> Result<i32, JsValue> {
    let callback = Closure::once_into_js(f);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        millis,
    )
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = el.style().set_property(property, value) {
        console::error_2(&format!("failed to set `{}`", property).into(), &err);
    }
}
