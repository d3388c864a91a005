// Typewriter effect cycling through a list of role titles.

use crate::utils;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub const ROLE_TEXT_ID: &str = "roleText";

pub const ROLES: &[&str] = &[
    "Robotics Developer",
    "Full Stack Developer",
    "AI Enthusiast",
];

// One state of the typewriter: the text to show and how long to wait, in
// milliseconds, before the next step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub text: String,
    pub wait: u32,
}

#[derive(Clone, Debug)]
pub struct TypingRotator {
    roles: Vec<String>,
    role: usize,
    chars: usize,
    deleting: bool,
}

impl TypingRotator {
    pub const START_DELAY: u32 = 2600;
    pub const TYPE_DELAY: u32 = 65;
    pub const DELETE_DELAY: u32 = 35;
    pub const HOLD_DELAY: u32 = 2000;

    pub fn new<S: AsRef<str>>(roles: &[S]) -> TypingRotator {
        TypingRotator {
            roles: roles.iter().map(|r| r.as_ref().to_owned()).collect(),
            role: 0,
            chars: 0,
            deleting: false,
        }
    }

    pub fn role_index(&self) -> usize {
        self.role
    }

    // Types or deletes one character. A fully typed role is held for
    // `HOLD_DELAY` before deleting starts; once empty the next role begins.
    pub fn step(&mut self) -> Frame {
        let current = match self.roles.get(self.role) {
            Some(role) => role,
            None => {
                return Frame {
                    text: String::new(),
                    wait: TypingRotator::HOLD_DELAY,
                }
            }
        };
        let len = current.chars().count();

        if !self.deleting {
            self.chars = (self.chars + 1).min(len);
            let text = current.chars().take(self.chars).collect();
            if self.chars == len {
                self.deleting = true;
                return Frame {
                    text,
                    wait: TypingRotator::HOLD_DELAY,
                };
            }
            Frame {
                text,
                wait: TypingRotator::TYPE_DELAY,
            }
        } else {
            self.chars = self.chars.saturating_sub(1);
            let text = current.chars().take(self.chars).collect();
            if self.chars == 0 {
                self.deleting = false;
                self.role = (self.role + 1) % self.roles.len();
            }
            let wait = if self.deleting {
                TypingRotator::DELETE_DELAY
            } else {
                TypingRotator::TYPE_DELAY
            };
            Frame { text, wait }
        }
    }
}

// Starts the effect on `#roleText`; false when the element is missing.
pub fn mount() -> Result<bool, JsValue> {
    let el = match utils::element_by_id::<Element>(ROLE_TEXT_ID)? {
        Some(el) => el,
        None => return Ok(false),
    };
    let rotator = Rc::new(RefCell::new(TypingRotator::new(ROLES)));
    schedule(el, rotator, TypingRotator::START_DELAY)?;
    Ok(true)
}

fn schedule(el: Element, rotator: Rc<RefCell<TypingRotator>>, wait: u32) -> Result<(), JsValue> {
    utils::set_timeout(wait as i32, move || {
        let frame = rotator.borrow_mut().step();
        el.set_text_content(Some(frame.text.as_str()));
        if let Err(err) = schedule(el, rotator, frame.wait) {
            web_sys::console::error_2(&"typing effect stopped".into(), &err);
        }
    })?;
    Ok(())
}
