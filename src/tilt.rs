// 3D tilt on hover: cards lean toward the pointer and settle back flat when
// it leaves.

use crate::tween::{Animation, Ease, Motion, Tween};
use crate::utils;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{DomRect, HtmlElement, MouseEvent};

pub const TILT_SELECTOR: &str = ".tilt";
pub const MAX_ANGLE: f64 = 6.0;
pub const PERSPECTIVE: f64 = 700.0;
pub const FOLLOW_DURATION: f64 = 0.3;
pub const RESET_DURATION: f64 = 0.5;

// Target (rotateX, rotateY) in degrees for a pointer at `x, y` over a box
pub fn tilt_angles(x: f64, y: f64, left: f64, top: f64, width: f64, height: f64) -> (f64, f64) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let dx = (x - left) / width - 0.5;
    let dy = (y - top) / height - 0.5;
    (-dy * MAX_ANGLE, dx * MAX_ANGLE)
}

pub fn tilt_transform(rotate_x: f64, rotate_y: f64) -> String {
    format!(
        "perspective({}px) rotateX({}deg) rotateY({}deg)",
        PERSPECTIVE, rotate_x, rotate_y
    )
}

// Tweens from wherever the card is now, so a new target picks up smoothly
fn tilt_to(
    card: &HtmlElement,
    current: &Rc<Cell<(f64, f64)>>,
    target: (f64, f64),
    duration: f64,
    key: &str,
) -> Animation {
    let (from_x, from_y) = current.get();
    let card = card.clone();
    let current = current.clone();
    Animation::new(
        vec![
            Tween::new(from_x, target.0, duration, Ease::Power2Out),
            Tween::new(from_y, target.1, duration, Ease::Power2Out),
        ],
        move |v: &[f64]| {
            current.set((v[0], v[1]));
            utils::set_style(&card, "transform", &tilt_transform(v[0], v[1]));
        },
    )
    .with_key(key)
}

pub fn mount(motion: &Motion) -> Result<usize, JsValue> {
    let cards = utils::query_all::<HtmlElement>(TILT_SELECTOR)?;
    for (i, card) in cards.iter().enumerate() {
        let key = format!("tilt-{}", i);
        let current = Rc::new(Cell::new((0.0, 0.0)));
        {
            let (motion, current, key, target) =
                (motion.clone(), current.clone(), key.clone(), card.clone());
            utils::listen(card, "mousemove", move |event: MouseEvent| {
                let rect: DomRect = target.get_bounding_client_rect();
                let angles = tilt_angles(
                    event.client_x() as f64,
                    event.client_y() as f64,
                    rect.left(),
                    rect.top(),
                    rect.width(),
                    rect.height(),
                );
                motion.play(tilt_to(&target, &current, angles, FOLLOW_DURATION, &key));
            })?;
        }
        {
            let (motion, target) = (motion.clone(), card.clone());
            utils::listen(card, "mouseleave", move |_: MouseEvent| {
                motion.play(tilt_to(&target, &current, (0.0, 0.0), RESET_DURATION, &key));
            })?;
        }
    }
    Ok(cards.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pointer_is_flat() {
        assert_eq!(tilt_angles(150.0, 100.0, 100.0, 50.0, 100.0, 100.0), (0.0, 0.0));
    }

    #[test]
    fn corners_reach_half_the_max_angle() {
        // top-left corner: lean back and to the left
        let (rx, ry) = tilt_angles(0.0, 0.0, 0.0, 0.0, 200.0, 100.0);
        assert_eq!((rx, ry), (3.0, -3.0));
        let (rx, ry) = tilt_angles(200.0, 100.0, 0.0, 0.0, 200.0, 100.0);
        assert_eq!((rx, ry), (-3.0, 3.0));
    }

    #[test]
    fn degenerate_box_does_not_tilt() {
        assert_eq!(tilt_angles(10.0, 10.0, 0.0, 0.0, 0.0, 50.0), (0.0, 0.0));
    }

    #[test]
    fn transform_includes_perspective() {
        assert_eq!(
            tilt_transform(-1.5, 2.0),
            "perspective(700px) rotateX(-1.5deg) rotateY(2deg)"
        );
    }
}
