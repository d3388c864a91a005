// Particle field: a fixed set of drifting points that bounce off the
// surface edges, shy away from the pointer, and are joined by faint lines
// when close together.

use crate::color::Color;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;
use vecmath::Vector2;
use wasm_bindgen::JsValue;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub connect_distance: f64,
    pub max_line_alpha: f64,
    pub line_width: f64,
    pub repel_radius: f64,
    pub repel_push: f64,
    pub velocity_span: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub color: Color,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 70,
            connect_distance: 130.0,
            max_line_alpha: 0.2,
            line_width: 0.5,
            repel_radius: 100.0,
            repel_push: 0.8,
            velocity_span: 0.35,
            min_radius: 0.8,
            max_radius: 2.6,
            color: Color::from_u32(0xa5b4fc99),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub alpha: f64,
}

pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    // None while the pointer is off the surface
    pointer: Option<Vector2<f64>>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(width: f64, height: f64, rng: &mut R) -> ParticleField {
        ParticleField::with_config(FieldConfig::default(), width, height, rng)
    }

    pub fn with_config<R: Rng + ?Sized>(
        config: FieldConfig,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> ParticleField {
        let particles = (0..config.particle_count)
            .map(|_| {
                Particle::random(
                    rng,
                    width,
                    height,
                    config.velocity_span,
                    config.min_radius,
                    config.max_radius,
                )
            })
            .collect();
        ParticleField {
            config,
            width,
            height,
            particles,
            pointer: None,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn pointer(&self) -> Option<Vector2<f64>> {
        self.pointer
    }

    // Only the surface changes, the particle set is kept as is
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        let FieldConfig {
            repel_radius,
            repel_push,
            ..
        } = self.config;
        for particle in &mut self.particles {
            particle.advance(width, height);
            if let Some(pointer) = self.pointer {
                particle.repel_from(pointer, repel_radius, repel_push);
            }
        }
    }

    pub fn line_opacity(&self, distance: f64) -> f64 {
        line_opacity(distance, self.config.connect_distance, self.config.max_line_alpha)
    }

    // Every unordered pair closer than the connect distance
    pub fn connections(&self) -> Vec<Connection> {
        let mut connections = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.distance_to(b);
                if distance < self.config.connect_distance {
                    connections.push(Connection {
                        from: a.pos,
                        to: b.pos,
                        alpha: self.line_opacity(distance),
                    });
                }
            }
        }
        connections
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), JsValue> {
        surface.clear(self.width, self.height);
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, self.config.color)?;
        }
        for c in self.connections() {
            surface.stroke_line(c.from, c.to, self.config.line_width, self.config.color, c.alpha)?;
        }
        Ok(())
    }

    // One animation frame
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), JsValue> {
        self.update();
        self.render(surface)
    }
}

// Linear fade from `max_alpha` at distance 0 to nothing at `threshold`
pub fn line_opacity(distance: f64, threshold: f64, max_alpha: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (max_alpha * (1.0 - distance / threshold)).max(0.0)
}
