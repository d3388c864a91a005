// requestAnimationFrame loop. The callback re-arms itself after every frame
// until `stop` is called.

use crate::utils;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameClosure = Closure<dyn FnMut(f64)>;

pub struct AnimationLoop {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl AnimationLoop {
    // `frame` receives the high resolution timestamp of the frame in ms
    pub fn start<F>(frame: F) -> Result<AnimationLoop, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let mut frame = frame;
        let running = Rc::new(Cell::new(true));
        let pending = Rc::new(Cell::new(None));
        let closure: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

        let next = closure.clone();
        let still_running = running.clone();
        let next_pending = pending.clone();
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            next_pending.set(None);
            if !still_running.get() {
                return;
            }
            frame(timestamp);
            if let Some(callback) = next.borrow().as_ref() {
                match request_animation_frame(callback) {
                    Ok(id) => next_pending.set(Some(id)),
                    Err(err) => {
                        still_running.set(false);
                        web_sys::console::error_2(&"animation loop stopped".into(), &err);
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(callback) = closure.borrow().as_ref() {
            pending.set(Some(request_animation_frame(callback)?));
        }

        Ok(AnimationLoop {
            running,
            pending,
            closure,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    // Cancels the queued frame and releases the closure, which also breaks
    // the closure's reference to itself. Must not be called from inside the
    // frame callback.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.pending.take() {
            if let Ok(window) = utils::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.closure.borrow_mut().take();
    }
}

fn request_animation_frame(callback: &FrameClosure) -> Result<i32, JsValue> {
    utils::window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}
