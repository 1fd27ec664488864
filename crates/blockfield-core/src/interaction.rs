use crate::blocks::{pick_color, Block, BlockColor, BlockGroup};
use crate::camera::Camera;
use crate::constants::{HOVER_SCALE, REST_SCALE};
use crate::picking::{pick_nearest, Hit};
use glam::Vec2;
use rand::Rng;

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    /// Last pointer position in normalized device coordinates.
    pub ndc: Vec2,
}

/// Hover and click resolution against the block cloud.
///
/// `hover` is an index into the block slice handed to each call; it never owns
/// the block.
#[derive(Default, Clone, Debug)]
pub struct PointerResolver {
    pub pointer: PointerState,
    hover: Option<usize>,
}

impl PointerResolver {
    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Record the pointer and move the hover highlight to whatever is under it.
    pub fn pointer_moved(
        &mut self,
        ndc: Vec2,
        camera: &Camera,
        blocks: &mut [Block],
        group: &BlockGroup,
    ) -> Option<usize> {
        self.pointer.ndc = ndc;
        let hit = self.hit_under_pointer(camera, blocks, group).map(|h| h.index);
        if hit == self.hover {
            return hit;
        }
        if let Some(prev) = self.hover.take() {
            if let Some(b) = blocks.get_mut(prev) {
                b.hover_scale = REST_SCALE;
            }
        }
        if let Some(i) = hit {
            blocks[i].hover_scale = HOVER_SCALE;
            self.hover = Some(i);
        }
        log::debug!("[hover] {:?}", self.hover);
        hit
    }

    /// Recolor the block under the last known pointer position. The new color
    /// may equal the old one.
    pub fn click<R: Rng + ?Sized>(
        &mut self,
        camera: &Camera,
        blocks: &mut [Block],
        group: &BlockGroup,
        palette: &[BlockColor],
        rng: &mut R,
    ) -> Option<usize> {
        let hit = self.hit_under_pointer(camera, blocks, group)?;
        let block = &mut blocks[hit.index];
        block.color = pick_color(rng, palette);
        log::info!("[click] block {} -> {:?}", hit.index, block.color);
        Some(hit.index)
    }

    fn hit_under_pointer(&self, camera: &Camera, blocks: &[Block], group: &BlockGroup) -> Option<Hit> {
        let ray = camera.ray_from_ndc(self.pointer.ndc);
        pick_nearest(blocks, group, &ray)
    }
}
