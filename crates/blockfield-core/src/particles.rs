use crate::blocks::symmetric_vec3;
use crate::constants::{
    PARTICLE_DRIFT_RADIUS, PARTICLE_MAX_SPEED, PARTICLE_RESEED_HALF_EXTENT,
    PARTICLE_SPAWN_HALF_EXTENT,
};
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Displacement applied once per frame.
    pub velocity: Vec3,
}

/// Drifting point cloud. Particles that wander past the drift radius are
/// reseeded near the origin instead of being dropped, so the count never
/// changes.
pub struct ParticleField {
    particles: Vec<Particle>,
    rng: StdRng,
    reseeds: u64,
}

impl ParticleField {
    pub fn new(count: usize, mut rng: StdRng) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                position: symmetric_vec3(&mut rng, PARTICLE_SPAWN_HALF_EXTENT),
                velocity: symmetric_vec3(&mut rng, PARTICLE_MAX_SPEED),
            })
            .collect();
        Self::from_particles(particles, rng)
    }

    /// Field with hand-placed particles; `rng` only feeds later reseeds.
    pub fn from_particles(particles: Vec<Particle>, rng: StdRng) -> Self {
        Self {
            particles,
            rng,
            reseeds: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view; the slice keeps the count fixed.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Total reseeds since creation.
    pub fn reseeds(&self) -> u64 {
        self.reseeds
    }

    /// One explicit Euler step. Returns how many particles were reseeded.
    pub fn advance(&mut self) -> usize {
        let mut reseeded = 0;
        for p in &mut self.particles {
            p.position += p.velocity;
            if p.position.length() > PARTICLE_DRIFT_RADIUS {
                reseed(&mut self.rng, p);
                reseeded += 1;
            }
        }
        if reseeded > 0 {
            self.reseeds += reseeded as u64;
            log::debug!("[particles] reseeded {} (total {})", reseeded, self.reseeds);
        }
        reseeded
    }
}

fn reseed(rng: &mut StdRng, p: &mut Particle) {
    p.position = symmetric_vec3(rng, PARTICLE_RESEED_HALF_EXTENT);
    p.velocity = symmetric_vec3(rng, PARTICLE_MAX_SPEED);
}
