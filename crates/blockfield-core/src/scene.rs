use crate::blocks::{generate_blocks, Block, BlockColor, BlockGroup, DEFAULT_PALETTE};
use crate::config::SceneConfig;
use crate::particles::ParticleField;
use rand::prelude::*;

/// Everything that gets generated once and then animated: the block cloud,
/// its shared rotation and the particle field.
pub struct Scene {
    pub blocks: Vec<Block>,
    pub group: BlockGroup,
    pub particles: ParticleField,
    pub palette: Vec<BlockColor>,
    pub(crate) rng: StdRng,
    seed: u64,
}

impl Scene {
    /// Build from config, drawing a seed from entropy when none is set.
    pub fn new(config: &SceneConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| StdRng::from_entropy().gen());
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: &SceneConfig, seed: u64) -> Self {
        // Separate streams so particle reseeds never shift block or click draws
        let mut rng = StdRng::seed_from_u64(seed);
        let particle_rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
        let palette = DEFAULT_PALETTE.to_vec();
        let blocks = generate_blocks(&mut rng, config.block_count, config.cluster_radius, &palette);
        let particles = ParticleField::new(config.particle_count, particle_rng);
        log::info!(
            "[scene] seed={} blocks={} particles={} radius={:.2}",
            seed,
            blocks.len(),
            particles.len(),
            config.cluster_radius
        );
        Self {
            blocks,
            group: BlockGroup::default(),
            particles,
            palette,
            rng,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of blocks currently drawn enlarged.
    pub fn hovered_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.hover_scale != crate::constants::REST_SCALE)
            .count()
    }
}
