// One-shot entrance animations fired as elements scroll into the lower part
// of the viewport, plus the animated stat counters.

use crate::tween::{Animation, Ease, Motion, Tween};
use crate::utils;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

pub const REVEAL_SELECTOR: &str = ".reveal-up";
pub const COUNTER_SELECTOR: &str = ".stat-num";

// An element fires once its top edge reaches 88% of the viewport height
pub const TRIGGER_FRACTION: f64 = 0.88;
pub const REVEAL_OFFSET: f64 = 40.0;
pub const REVEAL_DURATION: f64 = 0.65;
pub const SIBLING_STAGGER: f64 = 0.06;
pub const COUNTER_DURATION: f64 = 1.4;

pub fn in_trigger_zone(top: f64, viewport_height: f64) -> bool {
    top <= viewport_height * TRIGGER_FRACTION
}

pub fn stagger_delay(sibling_index: usize) -> f64 {
    sibling_index as f64 * SIBLING_STAGGER
}

// Unparseable counts animate to zero
pub fn parse_count(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn counter_text(value: f64) -> String {
    format!("{}", value.round() as i64)
}

// Removes and returns every entry whose top is inside the trigger zone
pub fn take_triggered<T, F>(pending: &mut Vec<T>, viewport_height: f64, top_of: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let mut fired = Vec::new();
    let mut i = 0;
    while i < pending.len() {
        if in_trigger_zone(top_of(&pending[i]), viewport_height) {
            fired.push(pending.remove(i));
        } else {
            i += 1;
        }
    }
    fired
}

pub fn fade_up_style(el: &HtmlElement, opacity: f64, offset_y: f64) {
    utils::set_style(el, "opacity", &opacity.to_string());
    utils::set_style(el, "transform", &format!("translateY({}px)", offset_y));
}

// Fades `el` in while sliding it up from `offset_y` pixels below
pub fn fade_up(el: HtmlElement, offset_y: f64, duration: f64, ease: Ease, delay: f64) -> Animation {
    Animation::new(
        vec![
            Tween::new(0.0, 1.0, duration, ease).delayed(delay),
            Tween::new(offset_y, 0.0, duration, ease).delayed(delay),
        ],
        move |v: &[f64]| fade_up_style(&el, v[0], v[1]),
    )
}

fn count_up(el: Element, target: f64) -> Animation {
    Animation::new(
        vec![Tween::new(0.0, target, COUNTER_DURATION, Ease::Power2Out)],
        move |v: &[f64]| el.set_text_content(Some(counter_text(v[0]).as_str())),
    )
}

enum Pending {
    Reveal { el: HtmlElement, delay: f64 },
    Counter { el: Element, target: f64 },
}

impl Pending {
    fn element(&self) -> &Element {
        match self {
            Pending::Reveal { el, .. } => el.as_ref(),
            Pending::Counter { el, .. } => el,
        }
    }

    fn into_animation(self) -> Animation {
        match self {
            Pending::Reveal { el, delay } => {
                fade_up(el, REVEAL_OFFSET, REVEAL_DURATION, Ease::Power3Out, delay)
            }
            Pending::Counter { el, target } => count_up(el, target),
        }
    }
}

fn sibling_index(el: &Element) -> usize {
    let parent = match el.parent_element() {
        Some(parent) => parent,
        None => return 0,
    };
    let children = parent.children();
    (0..children.length())
        .position(|i| children.item(i).as_ref() == Some(el))
        .unwrap_or(0)
}

// Hides every reveal target and starts watching the scroll position.
// Returns how many elements are waiting to fire.
pub fn mount(motion: &Motion) -> Result<usize, JsValue> {
    let mut pending = Vec::new();
    for el in utils::query_all::<HtmlElement>(REVEAL_SELECTOR)? {
        fade_up_style(&el, 0.0, REVEAL_OFFSET);
        let delay = stagger_delay(sibling_index(&el));
        pending.push(Pending::Reveal { el, delay });
    }
    for el in utils::query_all::<Element>(COUNTER_SELECTOR)? {
        let target = parse_count(el.get_attribute("data-count").as_deref());
        pending.push(Pending::Counter { el, target });
    }
    let count = pending.len();
    if count == 0 {
        return Ok(0);
    }

    let pending = Rc::new(RefCell::new(pending));
    let check = {
        let motion = motion.clone();
        let pending = pending.clone();
        move || {
            let viewport = utils::inner_height().unwrap_or(0.0);
            let fired = {
                let mut pending = pending.borrow_mut();
                take_triggered(&mut *pending, viewport, |p| {
                    p.element().get_bounding_client_rect().top()
                })
            };
            for p in fired {
                motion.play(p.into_animation());
            }
        }
    };
    check();
    let window = utils::window()?;
    for kind in &["scroll", "resize"] {
        let check = check.clone();
        utils::listen(&window, kind, move |_: web_sys::Event| check())?;
    }
    Ok(count)
}
