// Host-side tests for hover and click resolution.

use blockfield_core::*;
use glam::{Vec2, Vec3};

fn block_at(position: Vec3, color: BlockColor) -> Block {
    Block {
        position,
        size: 1.0,
        color,
        hover_scale: REST_SCALE,
    }
}

/// Empty generated scene with hand-placed blocks, viewed from the default
/// camera at +Z looking at the origin.
fn driver_with(blocks: Vec<Block>) -> FrameDriver {
    let config = SceneConfig {
        block_count: 0,
        particle_count: 0,
        seed: Some(1),
        ..SceneConfig::default()
    };
    let mut scene = Scene::new(&config);
    scene.blocks = blocks;
    FrameDriver::new(scene, 800, 600)
}

const CENTER: Vec2 = Vec2::ZERO;
const EMPTY_CORNER: Vec2 = Vec2::new(0.95, 0.95);

#[test]
fn hover_enlarges_nearest_block_only() {
    let mut d = driver_with(vec![
        block_at(Vec3::new(0.0, 0.0, -3.0), BlockColor::Blue),
        block_at(Vec3::ZERO, BlockColor::Green),
    ]);
    assert_eq!(d.pointer_moved(CENTER), Some(1));
    assert_eq!(d.resolver.hover(), Some(1));
    assert_eq!(d.scene.blocks[1].hover_scale, HOVER_SCALE);
    assert_eq!(d.scene.blocks[0].hover_scale, REST_SCALE);
    assert_eq!(d.scene.hovered_count(), 1);
}

#[test]
fn moving_off_a_block_restores_its_scale() {
    let mut d = driver_with(vec![block_at(Vec3::ZERO, BlockColor::Blue)]);
    d.pointer_moved(CENTER);
    assert_eq!(d.scene.hovered_count(), 1);
    assert_eq!(d.pointer_moved(EMPTY_CORNER), None);
    assert_eq!(d.resolver.hover(), None);
    assert_eq!(d.scene.blocks[0].hover_scale, REST_SCALE);
}

#[test]
fn hover_moves_between_blocks() {
    let left = Vec3::new(-4.0, 0.0, 0.0);
    let right = Vec3::new(4.0, 0.0, 0.0);
    let mut d = driver_with(vec![
        block_at(left, BlockColor::Blue),
        block_at(right, BlockColor::Blue),
    ]);
    let vp = d.camera.view_proj();
    let ndc_of = |p: Vec3| vp.project_point3(p).truncate();

    assert_eq!(d.pointer_moved(ndc_of(left)), Some(0));
    assert_eq!(d.pointer_moved(ndc_of(right)), Some(1));
    assert_eq!(d.scene.blocks[0].hover_scale, REST_SCALE);
    assert_eq!(d.scene.blocks[1].hover_scale, HOVER_SCALE);
    assert_eq!(d.scene.hovered_count(), 1);
}

#[test]
fn at_most_one_block_enlarged_across_random_moves() {
    let config = SceneConfig {
        seed: Some(8),
        ..SceneConfig::default()
    };
    let mut d = FrameDriver::new(Scene::new(&config), 800, 600);
    let steps = 40;
    for i in 0..steps {
        for j in 0..steps {
            let ndc = Vec2::new(
                -1.0 + 2.0 * i as f32 / (steps - 1) as f32,
                -1.0 + 2.0 * j as f32 / (steps - 1) as f32,
            );
            let hit = d.pointer_moved(ndc);
            assert!(d.scene.hovered_count() <= 1);
            assert_eq!(hit.is_some(), d.scene.hovered_count() == 1);
        }
    }
}

#[test]
fn click_over_empty_space_changes_nothing() {
    let config = SceneConfig {
        seed: Some(21),
        ..SceneConfig::default()
    };
    let mut d = FrameDriver::new(Scene::new(&config), 800, 600);
    // look away from the cloud entirely
    d.camera.target = Vec3::new(0.0, 0.0, 40.0);
    d.camera.eye = Vec3::new(0.0, 0.0, 30.0);
    let before: Vec<BlockColor> = d.scene.blocks.iter().map(|b| b.color).collect();
    d.pointer_moved(CENTER);
    for _ in 0..20 {
        assert_eq!(d.click(), None);
    }
    let after: Vec<BlockColor> = d.scene.blocks.iter().map(|b| b.color).collect();
    assert_eq!(before, after);
}

#[test]
fn click_recolors_block_under_pointer_from_palette() {
    let mut d = driver_with(vec![
        block_at(Vec3::ZERO, BlockColor::Blue),
        block_at(Vec3::new(4.0, 0.0, 0.0), BlockColor::Blue),
    ]);
    d.pointer_moved(CENTER);
    let mut seen_other = false;
    for _ in 0..50 {
        assert_eq!(d.click(), Some(0));
        let c = d.scene.blocks[0].color;
        assert!(d.scene.palette.contains(&c));
        seen_other |= c != BlockColor::Blue;
    }
    assert!(seen_other, "50 clicks never left blue");
    assert_eq!(d.scene.blocks[1].color, BlockColor::Blue);
}

#[test]
fn click_uses_last_pointer_position() {
    let mut d = driver_with(vec![block_at(Vec3::ZERO, BlockColor::White)]);
    d.pointer_moved(EMPTY_CORNER);
    assert_eq!(d.click(), None);
    d.pointer_moved(CENTER);
    assert_eq!(d.click(), Some(0));
}

#[test]
fn picking_follows_group_rotation() {
    // block sits off-axis; a quarter turn about Y swings it onto the view axis
    let mut d = driver_with(vec![block_at(Vec3::new(5.0, 0.0, 0.0), BlockColor::Green)]);
    assert_eq!(d.pointer_moved(CENTER), None);
    d.scene.group.rotation_y = -std::f32::consts::FRAC_PI_2;
    assert_eq!(d.pointer_moved(CENTER), Some(0));
}

#[test]
fn hit_distance_is_to_the_near_face() {
    let blocks = vec![block_at(Vec3::ZERO, BlockColor::Blue)];
    let ray = Ray::new(Vec3::new(0.0, 0.0, 15.0), Vec3::NEG_Z);
    let hit = pick_nearest(&blocks, &BlockGroup::default(), &ray).unwrap();
    assert_eq!(hit.index, 0);
    assert!((hit.distance - 14.5).abs() < 1e-4);
}
