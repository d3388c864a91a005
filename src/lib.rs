#[macro_use]
mod utils;

pub mod animation;
pub mod canvas;
pub mod color;
pub mod cursor;
pub mod field;
pub mod hero;
pub mod loader;
pub mod nav;
pub mod particle;
pub mod preview;
pub mod reveal;
pub mod scroll;
pub mod surface;
pub mod tilt;
pub mod timeline;
pub mod tween;
pub mod typing;

use crate::animation::AnimationLoop;
use crate::canvas::HeroCanvas;
use crate::cursor::Cursor;
use crate::nav::SectionTracker;
use crate::tween::Motion;
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Everything that keeps running after `initialize` returns
struct Site {
    motion: Option<AnimationLoop>,
    hero_canvas: Option<HeroCanvas>,
    cursor: Option<Cursor>,
    sections: Option<SectionTracker>,
}

impl Site {
    fn stop(&self) {
        if let Some(motion) = &self.motion {
            motion.stop();
        }
        if let Some(hero_canvas) = &self.hero_canvas {
            hero_canvas.stop();
        }
        if let Some(cursor) = &self.cursor {
            cursor.stop();
        }
        if let Some(sections) = &self.sections {
            sections.disconnect();
        }
    }
}

thread_local! {
    static SITE: RefCell<Option<Site>> = RefCell::new(None);
    // Listeners and timers outlive `shutdown`, so the site never mounts twice
    static SHUT_DOWN: Cell<bool> = Cell::new(false);
}

fn is_mounted() -> bool {
    SITE.with(|site| site.borrow().is_some())
}

// Each effect mounts on its own; a missing element turns only that effect
// off and a failing one is reported without stopping the rest
fn mounted<T>(
    name: &'static str,
    result: Result<Option<T>, JsValue>,
    names: &mut Vec<&'static str>,
) -> Option<T> {
    match result {
        Ok(Some(value)) => {
            names.push(name);
            Some(value)
        }
        Ok(None) => None,
        Err(err) => {
            log_error!("{} failed to start: {:?}", name, err);
            None
        }
    }
}

fn present(result: Result<bool, JsValue>) -> Result<Option<()>, JsValue> {
    result.map(|found| if found { Some(()) } else { None })
}

#[wasm_bindgen(start)]
pub fn initialize() -> Result<(), JsValue> {
    if is_mounted() || SHUT_DOWN.with(Cell::get) {
        return Ok(());
    }
    utils::set_panic_hook();

    let mut names = Vec::new();
    let motion = Motion::new();
    let motion_frames = mounted("motion", motion.drive().map(Some), &mut names);

    let hero_canvas = mounted("particles", HeroCanvas::mount(HeroCanvas::CANVAS_ID), &mut names);
    let cursor = mounted("cursor", Cursor::mount(), &mut names);
    mounted("scroll", present(scroll::ScrollChrome::mount()), &mut names);
    mounted("mobile-nav", present(nav::mount_mobile_nav()), &mut names);
    let sections = mounted("sections", SectionTracker::mount(), &mut names);
    mounted("typing", present(typing::mount()), &mut names);
    mounted("tilt", present(tilt::mount(&motion).map(|cards| cards > 0)), &mut names);
    mounted("preview", present(preview::mount()), &mut names);
    mounted("intro", loader::mount(&motion).map(Some), &mut names);

    log!("portfolio-fx mounted: {}", names.join(", "));

    SITE.with(|site| {
        *site.borrow_mut() = Some(Site {
            motion: motion_frames,
            hero_canvas,
            cursor,
            sections,
        })
    });
    Ok(())
}

// Stops every frame loop and observer started by `initialize`. Final: a later
// `initialize` is a no-op.
#[wasm_bindgen]
pub fn shutdown() {
    SHUT_DOWN.with(|flag| flag.set(true));
    SITE.with(|site| {
        if let Some(site) = site.borrow_mut().take() {
            site.stop();
        }
    });
}
