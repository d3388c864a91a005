// Intro sequence: once the page has fully loaded, fade the loading screen
// out, then arm the scroll reveals; the hero entrance starts right away.

use crate::hero;
use crate::reveal;
use crate::tween::{Animation, Ease, Motion, Tween};
use crate::utils;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub const LOADER_ID: &str = "loader";
pub const HIDDEN_CLASS: &str = "hidden";
pub const FADE_DELAY: f64 = 1.6;
pub const FADE_DURATION: f64 = 0.6;

// `document.readyState` once the `load` event has been dispatched
fn load_has_fired(ready_state: &str) -> bool {
    ready_state == "complete"
}

fn fade_out(loader: HtmlElement, motion: Motion) -> Animation {
    let target = loader.clone();
    Animation::new(
        vec![Tween::new(1.0, 0.0, FADE_DURATION, Ease::Power2InOut).delayed(FADE_DELAY)],
        move |v: &[f64]| utils::set_style(&target, "opacity", &v[0].to_string()),
    )
    .on_complete(move || {
        let _ = loader.class_list().add_1(HIDDEN_CLASS);
        // layout is final only once the loader is gone
        arm_reveals(&motion);
    })
}

fn arm_reveals(motion: &Motion) {
    if let Err(err) = reveal::mount(motion) {
        log_error!("scroll reveal setup failed: {:?}", err);
    }
}

fn on_load(motion: &Motion) {
    match utils::element_by_id::<HtmlElement>(LOADER_ID) {
        Ok(Some(loader)) => motion.play(fade_out(loader, motion.clone())),
        _ => arm_reveals(motion),
    }
    if let Err(err) = hero::play(motion) {
        log_error!("hero timeline failed: {:?}", err);
    }
}

// Runs the sequence on `load`, or immediately if that has already fired
pub fn mount(motion: &Motion) -> Result<(), JsValue> {
    if load_has_fired(&utils::document()?.ready_state()) {
        on_load(motion);
        return Ok(());
    }
    let motion = motion.clone();
    let window = utils::window()?;
    let mut fired = false;
    utils::listen(&window, "load", move |_: web_sys::Event| {
        if !fired {
            fired = true;
            on_load(&motion);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_complete_document_skips_waiting() {
        assert!(load_has_fired("complete"));
        assert!(!load_has_fired("interactive"));
        assert!(!load_has_fired("loading"));
    }
}
