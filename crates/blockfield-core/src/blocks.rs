use crate::constants::{
    BLOCK_SIZE_MAX, BLOCK_SIZE_MIN, CLUSTER_CENTER_HALF_EXTENT, GROUP_ROTATION_STEP, REST_SCALE,
};
use glam::{Mat4, Quat, Vec3};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Blue,
    Green,
    White,
}

impl BlockColor {
    pub fn rgb(self) -> [f32; 3] {
        match self {
            BlockColor::Blue => [0.2, 0.45, 0.95],
            BlockColor::Green => [0.25, 0.85, 0.45],
            BlockColor::White => [0.95, 0.95, 0.95],
        }
    }
}

pub const DEFAULT_PALETTE: &[BlockColor] = &[BlockColor::Blue, BlockColor::Green, BlockColor::White];

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub position: Vec3,
    /// Cube edge length before hover scaling.
    pub size: f32,
    pub color: BlockColor,
    pub hover_scale: f32,
}

impl Block {
    pub fn half_extent(&self) -> f32 {
        0.5 * self.size * self.hover_scale
    }

    /// Transform of the block relative to its group.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.size * self.hover_scale),
            Quat::IDENTITY,
            self.position,
        )
    }
}

/// Rotation shared by every block; the whole cloud spins as one unit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlockGroup {
    pub rotation_x: f32,
    pub rotation_y: f32,
}

impl BlockGroup {
    /// Advance both angles by one frame's worth. Speed is tied to the refresh
    /// rate of the host.
    pub fn step(&mut self) {
        self.rotation_x += GROUP_ROTATION_STEP;
        self.rotation_y += GROUP_ROTATION_STEP;
    }

    /// X then Y intrinsic rotation.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_x(self.rotation_x) * Quat::from_rotation_y(self.rotation_y)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation())
    }
}

/// Uniform sample in `[-half_extent, half_extent)`.
#[inline]
pub(crate) fn symmetric<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> f32 {
    (rng.gen::<f32>() * 2.0 - 1.0) * half_extent
}

#[inline]
pub(crate) fn symmetric_vec3<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> Vec3 {
    Vec3::new(
        symmetric(rng, half_extent),
        symmetric(rng, half_extent),
        symmetric(rng, half_extent),
    )
}

pub fn pick_color<R: Rng + ?Sized>(rng: &mut R, palette: &[BlockColor]) -> BlockColor {
    palette.choose(rng).copied().unwrap_or(DEFAULT_PALETTE[0])
}

/// Place `count` blocks around independent, per-block cluster centers.
///
/// Each block draws its own center, so clustering only shows up statistically;
/// no cluster identity is kept.
pub fn generate_blocks<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    cluster_radius: f32,
    palette: &[BlockColor],
) -> Vec<Block> {
    let half_offset = 0.5 * cluster_radius;
    (0..count)
        .map(|_| {
            let center = symmetric_vec3(rng, CLUSTER_CENTER_HALF_EXTENT);
            let position = center + symmetric_vec3(rng, half_offset);
            let size = rng.gen_range(BLOCK_SIZE_MIN..BLOCK_SIZE_MAX);
            let color = pick_color(rng, palette);
            Block {
                position,
                size,
                color,
                hover_scale: REST_SCALE,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn zero_radius_puts_blocks_on_their_centers() {
        let mut rng = StdRng::seed_from_u64(3);
        let blocks = generate_blocks(&mut rng, 64, 0.0, DEFAULT_PALETTE);
        for b in &blocks {
            assert!(b.position.abs().max_element() <= CLUSTER_CENTER_HALF_EXTENT);
        }
    }

    #[test]
    fn empty_palette_falls_back_to_first_builtin_color() {
        let mut rng = StdRng::seed_from_u64(9);
        let blocks = generate_blocks(&mut rng, 8, 2.0, &[]);
        assert!(blocks.iter().all(|b| b.color == BlockColor::Blue));
    }

    #[test]
    fn group_step_is_fixed_per_call() {
        let mut g = BlockGroup::default();
        for _ in 0..10 {
            g.step();
        }
        assert!((g.rotation_x - 0.02).abs() < 1e-6);
        assert!((g.rotation_y - 0.02).abs() < 1e-6);
    }
}
