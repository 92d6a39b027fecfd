//! Confetti particle simulation.
//!
//! A fixed pool of square particles falls through the viewport forever.
//! Particles leaving the viewport are respawned above the top edge instead of
//! being removed, so the pool never grows or shrinks after creation.

use rand::Rng;
use std::f64::consts::TAU;

/// Simulation constants. Velocities are in pixels per frame.
pub mod defaults {
    pub const POOL_SIZE: usize = 50;
    pub const PALETTE: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD"];
    pub const SPAWN_Y: f64 = -20.0;
    pub const GRAVITY: f64 = 0.5;
    pub const DRAG: f64 = 0.075;
    pub const TERMINAL_VELOCITY: f64 = 8.0;
    pub const VEL_X_RANGE: (f64, f64) = (-5.0, 5.0);
    pub const VEL_Y_RANGE: (f64, f64) = (-20.0, -5.0);
    pub const SIZE_RANGE: (f64, f64) = (6.0, 16.0);
    pub const ROTATE_SPEED_RANGE: (f64, f64) = (-0.1, 0.1);
}

use defaults::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub size: f64,
    pub color: &'static str,
    pub rotation: f64,
    pub rotate_speed: f64,
}

impl Particle {
    /// A fresh particle just above the top edge of a viewport `width` wide.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f64) -> Self {
        let x = if width > 0.0 { rng.random_range(0.0..width) } else { 0.0 };
        Particle {
            x,
            y: SPAWN_Y,
            vel_x: rng.random_range(VEL_X_RANGE.0..VEL_X_RANGE.1),
            vel_y: rng.random_range(VEL_Y_RANGE.0..VEL_Y_RANGE.1),
            size: rng.random_range(SIZE_RANGE.0..SIZE_RANGE.1),
            color: PALETTE[rng.random_range(0..PALETTE.len())],
            rotation: rng.random_range(0.0..TAU),
            rotate_speed: rng.random_range(ROTATE_SPEED_RANGE.0..ROTATE_SPEED_RANGE.1),
        }
    }

    /// Advance one frame of kinematics. Does not check bounds.
    pub fn advance(&mut self) {
        self.vel_y += GRAVITY;
        self.vel_x *= 1.0 - DRAG;
        self.vel_y = self.vel_y.min(TERMINAL_VELOCITY);

        self.x += self.vel_x;
        self.y += self.vel_y;
        self.rotation += self.rotate_speed;
    }

    /// Below the bottom edge, or past either side, by more than its own size.
    pub fn is_outside(&self, width: f64, height: f64) -> bool {
        self.y > height + self.size || self.x < -self.size || self.x > width + self.size
    }
}

/// Fixed-size particle pool bound to a viewport.
#[derive(Debug)]
pub struct ParticleField<R: Rng> {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(pool_size: usize, width: f64, height: f64, mut rng: R) -> Self {
        let particles = (0..pool_size)
            .map(|_| Particle::spawn(&mut rng, width))
            .collect();
        ParticleField { particles, width, height, rng }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// One animation frame: move every particle, recycling those that left.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance();
            if particle.is_outside(width, height) {
                *particle = Particle::spawn(&mut self.rng, width);
            }
        }
    }
}
