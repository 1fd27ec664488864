use crate::blocks::{Block, BlockGroup};
use crate::camera::Ray;
use glam::Vec3;

/// Slab test against an axis-aligned box. Returns the entry distance, or the
/// exit distance when the origin is inside the box.
#[inline]
pub fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = ray.dir.recip();
    let t0 = (min - ray.origin) * inv;
    let t1 = (max - ray.origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_near.is_nan() || t_far.is_nan() || t_far < t_near.max(0.0) {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub distance: f32,
}

/// Nearest block hit by a world-space ray. The ray is moved into the group's
/// frame, where every block is an axis-aligned cube. Equal distances keep the
/// lower index.
pub fn pick_nearest(blocks: &[Block], group: &BlockGroup, ray: &Ray) -> Option<Hit> {
    let to_local = group.rotation().inverse();
    let local = Ray {
        origin: to_local * ray.origin,
        dir: to_local * ray.dir,
    };
    let mut best: Option<Hit> = None;
    for (index, block) in blocks.iter().enumerate() {
        let h = Vec3::splat(block.half_extent());
        if let Some(t) = ray_aabb(&local, block.position - h, block.position + h) {
            match best {
                Some(b) if t >= b.distance => {}
                _ => best = Some(Hit { index, distance: t }),
            }
        }
    }
    best
}
