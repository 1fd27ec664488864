// Host-side tests for particle drift and the reseed boundary.

use blockfield_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field_with(position: Vec3, velocity: Vec3) -> ParticleField {
    ParticleField::from_particles(vec![Particle { position, velocity }], StdRng::seed_from_u64(17))
}

#[test]
fn zero_velocity_leaves_position_unchanged() {
    let start = Vec3::new(3.0, -4.0, 12.0);
    let mut field = field_with(start, Vec3::ZERO);
    for _ in 0..100 {
        field.advance();
    }
    assert_eq!(field.particles()[0].position, start);
    assert_eq!(field.reseeds(), 0);
}

#[test]
fn crossing_the_drift_radius_reseeds_into_small_cube() {
    let mut field = field_with(Vec3::new(19.9, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(field.advance(), 1);
    let p = &field.particles()[0];
    assert_ne!(p.position, Vec3::new(20.4, 0.0, 0.0));
    assert!(p.position.length() < PARTICLE_RESEED_HALF_EXTENT * 3.0_f32.sqrt());
    assert!(p.position.abs().max_element() <= PARTICLE_RESEED_HALF_EXTENT);
    assert!(p.velocity.abs().max_element() <= PARTICLE_MAX_SPEED);
}

#[test]
fn exactly_on_the_radius_is_not_reseeded() {
    let mut field = field_with(Vec3::new(PARTICLE_DRIFT_RADIUS, 0.0, 0.0), Vec3::ZERO);
    assert_eq!(field.advance(), 0);
    assert_eq!(field.particles()[0].position.x, PARTICLE_DRIFT_RADIUS);
}

#[test]
fn long_run_keeps_count_and_bounds() {
    let mut field = ParticleField::new(300, StdRng::seed_from_u64(3));
    // push everything outward fast so the boundary is exercised constantly
    for p in field.particles_mut() {
        p.velocity = p.position.normalize_or_zero() * 0.75;
    }
    for _ in 0..200 {
        field.advance();
        assert_eq!(field.len(), 300);
        for p in field.particles() {
            assert!(p.position.length() <= PARTICLE_DRIFT_RADIUS);
        }
    }
    assert!(field.reseeds() > 0);
}

#[test]
fn count_is_fixed_through_mutable_access() {
    let mut field = ParticleField::new(12, StdRng::seed_from_u64(8));
    for p in field.particles_mut() {
        p.position = Vec3::new(0.0, 30.0, 0.0);
    }
    assert_eq!(field.advance(), 12);
    assert_eq!(field.len(), 12);
    assert_eq!(field.particles().len(), 12);
}
