// Simple particle struct to keep track of individual position, velocity, and size

use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
        }
    }

    // Uniform position over the surface, velocity centered on zero with
    // the given total span per axis, radius in [min_radius, max_radius)
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        velocity_span: f64,
        min_radius: f64,
        max_radius: f64,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * velocity_span;
        let vel_y = (rng.gen::<f64>() - 0.5) * velocity_span;
        let radius = rng.gen::<f64>() * (max_radius - min_radius) + min_radius;
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius)
    }

    // Advance one frame and bounce off the edges. The position is not
    // clamped, so a particle may sit up to one velocity step outside.
    // Returns which axes flipped.
    pub fn advance(&mut self, width: f64, height: f64) -> [bool; 2] {
        self.pos = vec2_add(self.pos, self.vel);
        let mut flipped = [false, false];
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
            flipped[0] = true;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
            flipped[1] = true;
        }
        flipped
    }

    // Nudge directly away from the pointer when it is within `radius`.
    // Coincident positions are left alone.
    pub fn repel_from(&mut self, pointer: Vector2<f64>, radius: f64, push: f64) -> bool {
        let away = vec2_sub(self.pos, pointer);
        let distance = vec2_len(away);
        if distance > 0.0 && distance < radius {
            self.pos = vec2_add(self.pos, vec2_scale(away, push / distance));
            true
        } else {
            false
        }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vec2_len(vec2_sub(self.pos, other.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_particle_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, 800.0, 600.0, 0.35, 0.8, 2.6);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 600.0);
            assert!(p.vel[0].abs() <= 0.175 && p.vel[1].abs() <= 0.175);
            assert!(p.radius >= 0.8 && p.radius <= 2.6);
        }
    }

    #[test]
    fn advance_moves_by_velocity() {
        let mut p = Particle::new(10.0, 10.0, 0.1, -0.1, 1.0);
        assert_eq!(p.advance(100.0, 100.0), [false, false]);
        assert!((p.pos[0] - 10.1).abs() < 1e-12);
        assert!((p.pos[1] - 9.9).abs() < 1e-12);
    }

    #[test]
    fn crossing_right_edge_flips_only_horizontal() {
        let mut p = Particle::new(99.95, 50.0, 0.1, 0.1, 1.0);
        assert_eq!(p.advance(100.0, 100.0), [true, false]);
        assert!(p.vel[0] < 0.0);
        assert!(p.vel[1] > 0.0);
        // overshoot is kept, not clamped
        assert!(p.pos[0] > 100.0);
    }

    #[test]
    fn crossing_top_edge_flips_only_vertical() {
        let mut p = Particle::new(50.0, 0.05, -0.1, -0.1, 1.0);
        assert_eq!(p.advance(100.0, 100.0), [false, true]);
        assert!(p.vel[0] < 0.0);
        assert!(p.vel[1] > 0.0);
    }

    #[test]
    fn repel_pushes_away_by_fixed_step() {
        let mut p = Particle::new(30.0, 40.0, 0.0, 0.0, 1.0);
        assert!(p.repel_from([0.0, 0.0], 100.0, 0.8));
        assert!((p.pos[0] - 30.48).abs() < 1e-9);
        assert!((p.pos[1] - 40.64).abs() < 1e-9);
    }

    #[test]
    fn repel_ignores_coincident_and_distant_pointer() {
        let mut p = Particle::new(30.0, 40.0, 0.0, 0.0, 1.0);
        assert!(!p.repel_from([30.0, 40.0], 100.0, 0.8));
        assert!(!p.repel_from([200.0, 40.0], 100.0, 0.8));
        assert_eq!(p.pos, [30.0, 40.0]);
    }
}
