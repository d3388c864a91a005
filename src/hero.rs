// Entrance sequence for the hero text: the name's words rise out of their
// clipping box one after another, then the supporting lines fade up.

use crate::reveal::fade_up;
use crate::timeline::{Position, Timeline};
use crate::tween::{Animation, Ease, Motion, Tween};
use crate::utils;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub const START_DELAY: f64 = 1.8;
pub const WORD_SELECTOR: &str = ".hero-name .word";
pub const WORD_DURATION: f64 = 0.9;
pub const WORD_STAGGER: f64 = 0.12;
pub const WORD_DROP_PERCENT: f64 = 110.0;
pub const FADE_OFFSET: f64 = 20.0;

pub struct FadeStep {
    pub selector: &'static str,
    pub duration: f64,
    pub overlap: f64,
}

pub const FADE_STEPS: &[FadeStep] = &[
    FadeStep {
        selector: ".hero-badge",
        duration: 0.6,
        overlap: 0.4,
    },
    FadeStep {
        selector: ".hero-desc",
        duration: 0.6,
        overlap: 0.3,
    },
    FadeStep {
        selector: ".hero-btns",
        duration: 0.5,
        overlap: 0.2,
    },
    FadeStep {
        selector: ".hero-socials",
        duration: 0.5,
        overlap: 0.2,
    },
];

#[derive(Clone, Debug, PartialEq)]
pub struct HeroSchedule {
    // absolute start of each word, in seconds after the sequence is played
    pub words: Vec<f64>,
    // absolute start of each entry of FADE_STEPS
    pub fades: Vec<f64>,
}

pub fn schedule(word_count: usize) -> HeroSchedule {
    let mut timeline = Timeline::new(START_DELAY);
    let words = timeline.add_staggered(word_count, WORD_DURATION, WORD_STAGGER, Position::End);
    let fades = FADE_STEPS
        .iter()
        .map(|step| timeline.add(step.duration, Position::Relative(-step.overlap)))
        .collect();
    HeroSchedule { words, fades }
}

fn rise(word: HtmlElement, start: f64) -> Animation {
    Animation::new(
        vec![Tween::new(WORD_DROP_PERCENT, 0.0, WORD_DURATION, Ease::Power4Out).delayed(start)],
        move |v: &[f64]| utils::set_style(&word, "transform", &format!("translateY({}%)", v[0])),
    )
}

// Queues the whole sequence; returns how many elements take part
pub fn play(motion: &Motion) -> Result<usize, JsValue> {
    let words = utils::query_all::<HtmlElement>(WORD_SELECTOR)?;
    let plan = schedule(words.len());
    let mut animated = words.len();
    for (word, start) in words.into_iter().zip(plan.words) {
        motion.play(rise(word, start));
    }
    for (step, start) in FADE_STEPS.iter().zip(plan.fades) {
        for el in utils::query_all::<HtmlElement>(step.selector)? {
            motion.play(fade_up(el, FADE_OFFSET, step.duration, Ease::Power2Out, start));
            animated += 1;
        }
    }
    Ok(animated)
}
