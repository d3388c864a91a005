// Hooks a `ParticleField` up to a <canvas> on the page: sizes the drawing
// buffer to the element, follows the pointer, and redraws every frame.

use crate::animation::AnimationLoop;
use crate::field::ParticleField;
use crate::utils;
#[cfg(feature = "profiling")]
use crate::utils::Timer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

pub struct HeroCanvas {
    field: Rc<RefCell<ParticleField>>,
    frames: AnimationLoop,
}

impl HeroCanvas {
    pub const CANVAS_ID: &'static str = "heroCanvas";

    // Ok(None) when there is no such canvas or it has no 2d context
    pub fn mount(canvas_id: &str) -> Result<Option<HeroCanvas>, JsValue> {
        let canvas = match utils::element_by_id::<HtmlCanvasElement>(canvas_id)? {
            Some(canvas) => canvas,
            None => return Ok(None),
        };
        let context = match canvas.get_context("2d")? {
            Some(context) => context
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| JsValue::from_str("`2d` context is not a CanvasRenderingContext2d"))?,
            None => return Ok(None),
        };

        let (width, height) = fit_to_element(&canvas);
        let mut rng = rand::thread_rng();
        let field = Rc::new(RefCell::new(ParticleField::new(width, height, &mut rng)));

        {
            let field = field.clone();
            let canvas = canvas.clone();
            let window = utils::window()?;
            utils::listen(&window, "resize", move |_: web_sys::Event| {
                let (width, height) = fit_to_element(&canvas);
                field.borrow_mut().resize(width, height);
            })?;
        }
        {
            let field = field.clone();
            let target = canvas.clone();
            utils::listen(&canvas, "mousemove", move |event: MouseEvent| {
                let rect = target.get_bounding_client_rect();
                field.borrow_mut().set_pointer(
                    event.client_x() as f64 - rect.left(),
                    event.client_y() as f64 - rect.top(),
                );
            })?;
        }
        {
            let field = field.clone();
            utils::listen(&canvas, "mouseleave", move |_: MouseEvent| {
                field.borrow_mut().clear_pointer();
            })?;
        }

        let frames = {
            let field = field.clone();
            let mut context = context;
            AnimationLoop::start(move |_| {
                #[cfg(feature = "profiling")]
                let _timer = Timer::new("HeroCanvas::frame");
                if let Err(err) = field.borrow_mut().tick(&mut context) {
                    console::error_2(&"particle frame failed".into(), &err);
                }
            })?
        };

        Ok(Some(HeroCanvas { field, frames }))
    }

    pub fn particle_count(&self) -> usize {
        self.field.borrow().particles().len()
    }

    pub fn size(&self) -> (f64, f64) {
        self.field.borrow().size()
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    pub fn stop(&self) {
        self.frames.stop();
    }
}

// Matches the drawing buffer to the rendered size of the element
fn fit_to_element(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let width = canvas.offset_width().max(0) as u32;
    let height = canvas.offset_height().max(0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width as f64, height as f64)
}
