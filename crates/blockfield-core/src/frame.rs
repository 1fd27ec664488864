use crate::camera::{Camera, OrbitControls};
use crate::interaction::PointerResolver;
use crate::scene::Scene;
use crate::stats::FrameStats;
use glam::Vec2;

/// Whatever draws a [`Scene`] from a [`Camera`]. The wgpu renderer implements
/// it behind the `gpu` feature; tests use a recording stub.
pub trait SceneRenderer {
    fn resize(&mut self, width: u32, height: u32);
    fn render(&mut self, scene: &Scene, camera: &Camera) -> anyhow::Result<()>;
}

/// Owns the animated state and runs one frame per host refresh callback.
pub struct FrameDriver {
    pub scene: Scene,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub resolver: PointerResolver,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new(scene: Scene, width: u32, height: u32) -> Self {
        let mut camera = Camera::default();
        camera.set_viewport(width, height);
        Self {
            scene,
            camera,
            controls: OrbitControls::default(),
            resolver: PointerResolver::default(),
            stats: FrameStats::default(),
        }
    }

    pub fn resize<R: SceneRenderer + ?Sized>(&mut self, renderer: &mut R, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_viewport(width, height);
        renderer.resize(width, height);
    }

    /// Rotate the group, drift particles, ease the camera, then draw. All
    /// increments are per call, so motion speed follows the refresh rate.
    pub fn frame<R: SceneRenderer + ?Sized>(&mut self, renderer: &mut R) -> anyhow::Result<()> {
        self.scene.group.step();
        self.scene.particles.advance();
        self.controls.update(&mut self.camera);
        self.stats.record();
        renderer.render(&self.scene, &self.camera)
    }

    pub fn pointer_moved(&mut self, ndc: Vec2) -> Option<usize> {
        self.resolver.pointer_moved(
            ndc,
            &self.camera,
            &mut self.scene.blocks,
            &self.scene.group,
        )
    }

    pub fn click(&mut self) -> Option<usize> {
        let scene = &mut self.scene;
        self.resolver.click(
            &self.camera,
            &mut scene.blocks,
            &scene.group,
            &scene.palette,
            &mut scene.rng,
        )
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}
