// Custom cursor: a dot pinned to the pointer and a ring that trails it with
// exponential smoothing. The ring grows over interactive elements.

use crate::animation::AnimationLoop;
use crate::utils;
use std::cell::RefCell;
use std::rc::Rc;
use vecmath::{vec2_add, vec2_scale, vec2_sub, Vector2};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

pub const DOT_ID: &str = "cursorDot";
pub const RING_ID: &str = "cursorRing";
pub const HOVER_CLASS: &str = "hover";
pub const INTERACTIVE_SELECTOR: &str = "a, button, .btn-glow, .btn-ghost, .proj-card, .cert, \
     .contact-card, .award, .stat, .nav-toggle, .testimonial-card, .pdf-modal-close";

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CursorFollower {
    pub pointer: Vector2<f64>,
    pub ring: Vector2<f64>,
}

impl CursorFollower {
    pub const SMOOTHING: f64 = 0.15;
    pub const START: Vector2<f64> = [-100.0, -100.0];
    pub const DOT_OFFSET: f64 = 3.0;
    pub const RING_OFFSET: f64 = 18.0;

    pub fn new() -> CursorFollower {
        CursorFollower {
            pointer: CursorFollower::START,
            ring: CursorFollower::START,
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pointer = [x, y];
    }

    // Moves the ring a fixed fraction of the way toward the pointer
    pub fn step(&mut self) {
        let gap = vec2_sub(self.pointer, self.ring);
        self.ring = vec2_add(self.ring, vec2_scale(gap, CursorFollower::SMOOTHING));
    }

    pub fn dot_transform(&self) -> String {
        translate(self.pointer, CursorFollower::DOT_OFFSET)
    }

    pub fn ring_transform(&self) -> String {
        translate(self.ring, CursorFollower::RING_OFFSET)
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        CursorFollower::new()
    }
}

fn translate(pos: Vector2<f64>, offset: f64) -> String {
    format!("translate({}px, {}px)", pos[0] - offset, pos[1] - offset)
}

pub struct Cursor {
    frames: AnimationLoop,
}

impl Cursor {
    pub fn mount() -> Result<Option<Cursor>, JsValue> {
        let (dot, ring) = match (
            utils::element_by_id::<HtmlElement>(DOT_ID)?,
            utils::element_by_id::<HtmlElement>(RING_ID)?,
        ) {
            (Some(dot), Some(ring)) => (dot, ring),
            _ => return Ok(None),
        };

        let follower = Rc::new(RefCell::new(CursorFollower::new()));
        let window = utils::window()?;
        let document = utils::document()?;

        {
            let follower = follower.clone();
            utils::listen(&window, "mousemove", move |event: MouseEvent| {
                follower
                    .borrow_mut()
                    .move_to(event.client_x() as f64, event.client_y() as f64);
            })?;
        }
        for &(kind, hovering) in &[("mouseover", true), ("mouseout", false)] {
            let ring = ring.clone();
            utils::listen(&document, kind, move |event: MouseEvent| {
                if !is_interactive(&event) {
                    return;
                }
                let classes = ring.class_list();
                let _ = if hovering {
                    classes.add_1(HOVER_CLASS)
                } else {
                    classes.remove_1(HOVER_CLASS)
                };
            })?;
        }

        let frames = AnimationLoop::start(move |_| {
            let mut follower = follower.borrow_mut();
            follower.step();
            utils::set_style(&dot, "transform", &follower.dot_transform());
            utils::set_style(&ring, "transform", &follower.ring_transform());
        })?;

        Ok(Some(Cursor { frames }))
    }

    pub fn stop(&self) {
        self.frames.stop();
    }
}

fn is_interactive(event: &MouseEvent) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
        .is_some()
}
