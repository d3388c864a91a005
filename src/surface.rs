// Drawing target for the particle field. The browser canvas is the real
// implementation; anything that can clear, fill a circle and stroke a line
// will do.

use crate::color::Color;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color)
        -> Result<(), JsValue>;

    // `alpha` overrides the color's own alpha channel
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        line_width: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), JsValue>;
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    #[allow(deprecated)]
    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    ) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.fill();
        Ok(())
    }

    #[allow(deprecated)]
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        line_width: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.begin_path();
        self.move_to(from[0], from[1]);
        self.line_to(to[0], to[1]);
        self.set_stroke_style(&JsValue::from_str(&color.to_css_with_alpha(alpha)));
        self.set_line_width(line_width);
        self.stroke();
        Ok(())
    }
}

// Records draw calls instead of painting, for tests
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear { width: f64, height: f64 },
    Circle { center: Vector2<f64>, radius: f64 },
    Line {
        from: Vector2<f64>,
        to: Vector2<f64>,
        alpha: f64,
    },
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn circles(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        _color: Color,
    ) -> Result<(), JsValue> {
        self.calls.push(DrawCall::Circle { center, radius });
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        _line_width: f64,
        _color: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.calls.push(DrawCall::Line { from, to, alpha });
        Ok(())
    }
}
