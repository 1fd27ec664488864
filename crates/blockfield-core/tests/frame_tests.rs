// Host-side tests for the per-frame driver using a recording renderer.

use blockfield_core::*;
use glam::Vec3;

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<(f32, f32, Vec3)>,
    sizes: Vec<(u32, u32)>,
    fail: bool,
}

impl SceneRenderer for RecordingRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.sizes.push((width, height));
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("surface lost");
        }
        self.frames
            .push((scene.group.rotation_x, scene.group.rotation_y, camera.eye));
        Ok(())
    }
}

fn driver(seed: u64) -> FrameDriver {
    let config = SceneConfig {
        seed: Some(seed),
        ..SceneConfig::default()
    };
    FrameDriver::new(Scene::new(&config), 1280, 720)
}

#[test]
fn each_frame_rotates_by_a_fixed_step_before_rendering() {
    let mut d = driver(1);
    let mut r = RecordingRenderer::default();
    for _ in 0..3 {
        d.frame(&mut r).unwrap();
    }
    assert_eq!(r.frames.len(), 3);
    for (i, (rx, ry, _)) in r.frames.iter().enumerate() {
        let expected = GROUP_ROTATION_STEP * (i + 1) as f32;
        assert!((rx - expected).abs() < 1e-6);
        assert!((ry - expected).abs() < 1e-6);
    }
    assert_eq!(d.stats().total_frames(), 3);
}

#[test]
fn frame_advances_particles() {
    let mut d = driver(2);
    let before = d.scene.particles.particles().to_vec();
    d.frame(&mut RecordingRenderer::default()).unwrap();
    let moved = before
        .iter()
        .zip(d.scene.particles.particles())
        .filter(|(a, b)| a.position != b.position)
        .count();
    assert!(moved > 0);
    assert_eq!(d.scene.particles.len(), before.len());
}

#[test]
fn frame_integrates_pending_orbit() {
    let mut d = driver(3);
    let mut r = RecordingRenderer::default();
    d.controls.rotate_by_pixels(300.0, 0.0, 720.0);
    d.frame(&mut r).unwrap();
    let (_, _, eye) = r.frames[0];
    assert!((eye - CAMERA_EYE).length() > 1e-3);
}

#[test]
fn render_errors_surface_but_state_still_advances() {
    let mut d = driver(4);
    let mut r = RecordingRenderer {
        fail: true,
        ..Default::default()
    };
    assert!(d.frame(&mut r).is_err());
    assert!((d.scene.group.rotation_x - GROUP_ROTATION_STEP).abs() < 1e-6);
}

#[test]
fn resize_updates_aspect_and_ignores_zero() {
    let mut d = driver(5);
    let mut r = RecordingRenderer::default();
    d.resize(&mut r, 400, 200);
    assert!((d.camera.aspect - 2.0).abs() < 1e-6);
    d.resize(&mut r, 0, 200);
    assert_eq!(r.sizes, vec![(400, 200)]);
    assert!((d.camera.aspect - 2.0).abs() < 1e-6);
}
