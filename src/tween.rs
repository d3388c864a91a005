// Minimal tweening: easing curves, single-value tweens and an animator that
// drives groups of tweens from the page's frame loop.
//
// Durations and delays are in seconds, frame timestamps in milliseconds.

use crate::animation::AnimationLoop;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;

// The "powerN" easing family. `Power2Out` decelerates with a cubic curve,
// `Power3Out` quartic and `Power4Out` quintic.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power3Out,
    Power4Out,
    Power2InOut,
}

impl Ease {
    // Maps linear progress in [0, 1] to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.max(0.0).min(1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => ease_out(t, 3),
            Ease::Power3Out => ease_out(t, 4),
            Ease::Power4Out => ease_out(t, 5),
            Ease::Power2InOut => {
                if t < 0.5 {
                    (2.0 * t).powi(3) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(3) / 2.0
                }
            }
        }
    }
}

fn ease_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub delay: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: f64, ease: Ease) -> Tween {
        Tween {
            from,
            to,
            delay: 0.0,
            duration,
            ease,
        }
    }

    pub fn delayed(mut self, delay: f64) -> Tween {
        self.delay = delay.max(0.0);
        self
    }

    pub fn end(&self) -> f64 {
        self.delay + self.duration
    }

    // Value `elapsed` seconds after the tween was started. Holds `from`
    // through the delay and `to` once finished.
    pub fn sample(&self, elapsed: f64) -> f64 {
        let local = elapsed - self.delay;
        if local <= 0.0 {
            return self.from;
        }
        if self.duration <= 0.0 || local >= self.duration {
            return self.to;
        }
        let progress = self.ease.apply(local / self.duration);
        self.from + (self.to - self.from) * progress
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.end()
    }
}

// A group of tweens that start together and feed one sink.
pub struct Animation {
    tweens: Vec<Tween>,
    apply: Box<dyn FnMut(&[f64])>,
    on_complete: Option<Box<dyn FnOnce()>>,
    key: Option<String>,
    started_at: Option<f64>,
}

impl Animation {
    pub fn new<F>(tweens: Vec<Tween>, apply: F) -> Animation
    where
        F: FnMut(&[f64]) + 'static,
    {
        Animation {
            tweens,
            apply: Box::new(apply),
            on_complete: None,
            key: None,
            started_at: None,
        }
    }

    // Starting another animation with the same key replaces this one.
    pub fn with_key<K: Into<String>>(mut self, key: K) -> Animation {
        self.key = Some(key.into());
        self
    }

    pub fn on_complete<F: FnOnce() + 'static>(mut self, f: F) -> Animation {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn duration(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }

    fn sample(&mut self, elapsed: f64) {
        let values: Vec<f64> = self.tweens.iter().map(|t| t.sample(elapsed)).collect();
        (self.apply)(&values);
    }
}

pub type Completion = Box<dyn FnOnce()>;

#[derive(Default)]
pub struct Animator {
    running: Vec<Animation>,
}

impl Animator {
    pub fn new() -> Animator {
        Animator::default()
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    // Queues `animation` and renders its starting values right away.
    pub fn add(&mut self, mut animation: Animation) {
        if let Some(key) = animation.key.as_ref() {
            self.running.retain(|a| a.key.as_ref() != Some(key));
        }
        animation.sample(0.0);
        self.running.push(animation);
    }

    // Advances every animation to `now` (ms). An animation's clock starts on
    // the first tick after it was added. Completion callbacks of finished
    // animations are handed back so the caller can run them with no borrow
    // of the animator held.
    pub fn tick(&mut self, now: f64) -> Vec<Completion> {
        let mut done = Vec::new();
        let mut i = 0;
        while i < self.running.len() {
            let animation = &mut self.running[i];
            let started_at = *animation.started_at.get_or_insert(now);
            let elapsed = (now - started_at) / 1000.0;
            animation.sample(elapsed);
            if elapsed >= animation.duration() {
                let mut finished = self.running.remove(i);
                if let Some(callback) = finished.on_complete.take() {
                    done.push(callback);
                }
            } else {
                i += 1;
            }
        }
        done
    }
}

// Page-wide handle to one animator, shared by every effect.
#[derive(Clone, Default)]
pub struct Motion {
    animator: Rc<RefCell<Animator>>,
}

impl Motion {
    pub fn new() -> Motion {
        Motion::default()
    }

    pub fn play(&self, animation: Animation) {
        self.animator.borrow_mut().add(animation);
    }

    // Animations still running or waiting on their delay
    pub fn running(&self) -> usize {
        self.animator.borrow().len()
    }

    pub fn tick(&self, now: f64) {
        let done = self.animator.borrow_mut().tick(now);
        for callback in done {
            callback();
        }
    }

    pub fn drive(&self) -> Result<AnimationLoop, JsValue> {
        let motion = self.clone();
        AnimationLoop::start(move |now| motion.tick(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn eases_hit_endpoints() {
        for ease in &[
            Ease::Linear,
            Ease::Power2Out,
            Ease::Power3Out,
            Ease::Power4Out,
            Ease::Power2InOut,
        ] {
            assert!(close(ease.apply(0.0), 0.0), "{:?}", ease);
            assert!(close(ease.apply(1.0), 1.0), "{:?}", ease);
        }
    }

    #[test]
    fn out_eases_lead_linear() {
        assert!(close(Ease::Power2Out.apply(0.5), 0.875));
        assert!(Ease::Power4Out.apply(0.3) > Ease::Power2Out.apply(0.3));
        assert!(close(Ease::Power2InOut.apply(0.5), 0.5));
        assert!(Ease::Power2InOut.apply(0.25) < 0.25);
    }

    #[test]
    fn tween_holds_through_delay_and_after_end() {
        let t = Tween::new(0.0, 40.0, 1.0, Ease::Linear).delayed(0.5);
        assert_eq!(t.sample(0.2), 0.0);
        assert!(close(t.sample(1.0), 20.0));
        assert_eq!(t.sample(3.0), 40.0);
        assert!(!t.is_finished(1.4));
        assert!(t.is_finished(1.5));
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let t = Tween::new(1.0, 0.0, 0.0, Ease::Power2Out);
        assert_eq!(t.sample(0.001), 0.0);
    }

    #[test]
    fn animator_applies_from_values_on_add() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut animator = Animator::new();
        animator.add(Animation::new(
            vec![Tween::new(0.0, 1.0, 0.5, Ease::Linear)],
            move |v: &[f64]| sink.borrow_mut().push(v[0]),
        ));
        assert_eq!(*seen.borrow(), vec![0.0]);
    }

    #[test]
    fn animator_finishes_and_returns_completion() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let completed = Rc::new(Cell::new(false));
        let flag = completed.clone();
        let mut animator = Animator::new();
        animator.add(
            Animation::new(
                vec![Tween::new(0.0, 10.0, 1.0, Ease::Linear)],
                move |v: &[f64]| sink.borrow_mut().push(v[0]),
            )
            .on_complete(move || flag.set(true)),
        );

        assert!(animator.tick(1000.0).is_empty());
        assert!(animator.tick(1500.0).is_empty());
        let done = animator.tick(2000.0);
        assert_eq!(done.len(), 1);
        assert!(animator.is_empty());
        assert!(!completed.get());
        for callback in done {
            callback();
        }
        assert!(completed.get());
        assert_eq!(*seen.borrow(), vec![0.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn same_key_overwrites_running_animation() {
        let keyed = |from: f64, key: &str| {
            Animation::new(vec![Tween::new(from, 1.0 - from, 1.0, Ease::Linear)], |_: &[f64]| {})
                .with_key(key)
        };
        let mut animator = Animator::new();
        animator.add(keyed(0.0, "card-0"));
        animator.add(keyed(0.0, "card-1"));
        animator.add(keyed(1.0, "card-0"));
        assert_eq!(animator.len(), 2);
    }

    #[test]
    fn motion_runs_completions_outside_borrow() {
        let motion = Motion::new();
        let chained = Rc::new(Cell::new(false));
        let flag = chained.clone();
        let inner = motion.clone();
        motion.play(
            Animation::new(vec![Tween::new(0.0, 1.0, 0.1, Ease::Linear)], |_: &[f64]| {})
                .on_complete(move || {
                    inner.play(Animation::new(
                        vec![Tween::new(0.0, 1.0, 0.1, Ease::Linear)],
                        |_: &[f64]| {},
                    ));
                    flag.set(true);
                }),
        );
        motion.tick(0.0);
        motion.tick(200.0);
        assert!(chained.get());
        assert_eq!(motion.animator.borrow().len(), 1);
    }
}
