//! Per-instance data laid out for the GPU, plus the builders that flatten a
//! [`Scene`] into it. Kept free of wgpu so it can be tested on the host.

use crate::camera::Camera;
use crate::constants::{
    AMBIENT_INTENSITY, DIRECTIONAL_INTENSITY, DIRECTIONAL_LIGHT_POSITION, PARTICLE_COLOR,
    PARTICLE_SIZE,
};
use crate::scene::Scene;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    /// xyz: direction towards the light, w: directional intensity
    pub light_dir: [f32; 4],
    /// rgb: particle color, w: ambient intensity
    pub particle_color_ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlockInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
}

impl SceneUniforms {
    pub fn new(camera: &Camera) -> Self {
        let view = camera.view_matrix();
        // rows of the view rotation are the camera basis in world space
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();
        let light = DIRECTIONAL_LIGHT_POSITION.normalize();
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            light_dir: light.extend(DIRECTIONAL_INTENSITY).to_array(),
            particle_color_ambient: [
                PARTICLE_COLOR[0],
                PARTICLE_COLOR[1],
                PARTICLE_COLOR[2],
                AMBIENT_INTENSITY,
            ],
        }
    }
}

pub fn block_instances(scene: &Scene, out: &mut Vec<BlockInstance>) {
    out.clear();
    let group = scene.group.matrix();
    out.extend(scene.blocks.iter().map(|b| {
        let [r, g, bl] = b.color.rgb();
        BlockInstance {
            model: (group * b.local_matrix()).to_cols_array_2d(),
            color: [r, g, bl, 1.0],
        }
    }));
}

pub fn particle_instances(scene: &Scene, out: &mut Vec<ParticleInstance>) {
    out.clear();
    out.extend(scene.particles.particles().iter().map(|p| ParticleInstance {
        position: p.position.to_array(),
        size: PARTICLE_SIZE,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use glam::{Mat4, Vec3};

    #[test]
    fn block_instances_carry_group_rotation_and_hover_scale() {
        let mut scene = Scene::with_seed(&SceneConfig::default(), 4);
        scene.blocks[0].hover_scale = crate::constants::HOVER_SCALE;
        scene.group.rotation_y = 0.5;
        let mut out = Vec::new();
        block_instances(&scene, &mut out);
        assert_eq!(out.len(), scene.blocks.len());

        let model = Mat4::from_cols_array_2d(&out[0].model);
        let expected_center = scene.group.rotation() * scene.blocks[0].position;
        assert!((model.w_axis.truncate() - expected_center).length() < 1e-4);
        let edge = scene.blocks[0].size * crate::constants::HOVER_SCALE;
        assert!((model.x_axis.truncate().length() - edge).abs() < 1e-4);
        assert_eq!(out[0].color[3], 1.0);
    }

    #[test]
    fn camera_basis_is_orthonormal() {
        let u = SceneUniforms::new(&Camera::default());
        let right = Vec3::from_slice(&u.camera_right[..3]);
        let up = Vec3::from_slice(&u.camera_up[..3]);
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
        assert!((right - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn particle_instances_mirror_positions() {
        let scene = Scene::with_seed(&SceneConfig::default(), 4);
        let mut out = vec![ParticleInstance {
            position: [0.0; 3],
            size: 0.0,
        }];
        particle_instances(&scene, &mut out);
        assert_eq!(out.len(), scene.particles.len());
        assert_eq!(out[0].position, scene.particles.particles()[0].position.to_array());
    }
}
