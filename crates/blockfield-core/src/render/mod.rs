//! wgpu renderer shared by the web and native frontends.

use crate::camera::Camera;
use crate::constants::CLEAR_COLOR;
use crate::frame::SceneRenderer;
use crate::instances::{
    block_instances, particle_instances, BlockInstance, ParticleInstance, SceneUniforms,
};
use crate::scene::Scene;
use wgpu::util::DeviceExt;

mod helpers;
mod mesh;

pub static BLOCKS_WGSL: &str = include_str!("../../shaders/blocks.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../../shaders/particles.wgsl");

const BLOCK_INSTANCE_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
];
const MESH_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const PARTICLE_INSTANCE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32];

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    block_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,

    cube_vb: wgpu::Buffer,
    cube_vertex_count: u32,
    quad_vb: wgpu::Buffer,
    block_vb: wgpu::Buffer,
    block_capacity: usize,
    particle_vb: wgpu::Buffer,
    particle_capacity: usize,

    // reused every frame to avoid per-frame allocation
    block_scratch: Vec<BlockInstance>,
    particle_scratch: Vec<ParticleInstance>,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (_depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let block_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blocks_shader"),
            source: wgpu::ShaderSource::Wgsl(BLOCKS_WGSL.into()),
        });
        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(PARTICLES_WGSL.into()),
        });
        let block_pipeline = helpers::make_instanced_pipeline(
            &device,
            "blocks_pipeline",
            &layout,
            &block_shader,
            &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<mesh::MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &MESH_ATTRS,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<BlockInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &BLOCK_INSTANCE_ATTRS,
                },
            ],
            format,
            Some(wgpu::Face::Back),
        );
        let particle_pipeline = helpers::make_instanced_pipeline(
            &device,
            "particles_pipeline",
            &layout,
            &particle_shader,
            &[
                wgpu::VertexBufferLayout {
                    array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &QUAD_ATTRS,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &PARTICLE_INSTANCE_ATTRS,
                },
            ],
            format,
            None,
        );

        let cube = mesh::unit_cube();
        let cube_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vb"),
            contents: bytemuck::cast_slice(&cube),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&mesh::QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let block_vb = helpers::instance_buffer(&device, "block_instances", 0);
        let particle_vb = helpers::instance_buffer(&device, "particle_instances", 0);
        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            _depth_tex,
            depth_view,
            uniform_buffer,
            bind_group,
            block_pipeline,
            particle_pipeline,
            cube_vb,
            cube_vertex_count: cube.len() as u32,
            quad_vb,
            block_vb,
            block_capacity: 0,
            particle_vb,
            particle_capacity: 0,
            block_scratch: Vec::new(),
            particle_scratch: Vec::new(),
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn upload_instances(&mut self) {
        if self.block_scratch.len() > self.block_capacity {
            self.block_capacity = self.block_scratch.len();
            self.block_vb = helpers::instance_buffer(
                &self.device,
                "block_instances",
                (self.block_capacity * std::mem::size_of::<BlockInstance>()) as u64,
            );
        }
        if self.particle_scratch.len() > self.particle_capacity {
            self.particle_capacity = self.particle_scratch.len();
            self.particle_vb = helpers::instance_buffer(
                &self.device,
                "particle_instances",
                (self.particle_capacity * std::mem::size_of::<ParticleInstance>()) as u64,
            );
        }
        if !self.block_scratch.is_empty() {
            self.queue
                .write_buffer(&self.block_vb, 0, bytemuck::cast_slice(&self.block_scratch));
        }
        if !self.particle_scratch.is_empty() {
            self.queue.write_buffer(
                &self.particle_vb,
                0,
                bytemuck::cast_slice(&self.particle_scratch),
            );
        }
    }
}

impl<'a> SceneRenderer for GpuState<'a> {
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        (self._depth_tex, self.depth_view) =
            helpers::create_depth_texture(&self.device, width, height);
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> anyhow::Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // skip this frame; the reconfigured surface is used next time
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(anyhow::anyhow!("surface error: {:?}", e)),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::new(camera)),
        );
        block_instances(scene, &mut self.block_scratch);
        particle_instances(scene, &mut self.particle_scratch);
        self.upload_instances();

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            if !self.block_scratch.is_empty() {
                rpass.set_pipeline(&self.block_pipeline);
                rpass.set_vertex_buffer(0, self.cube_vb.slice(..));
                rpass.set_vertex_buffer(1, self.block_vb.slice(..));
                rpass.draw(0..self.cube_vertex_count, 0..self.block_scratch.len() as u32);
            }
            if !self.particle_scratch.is_empty() {
                rpass.set_pipeline(&self.particle_pipeline);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.particle_vb.slice(..));
                rpass.draw(0..6, 0..self.particle_scratch.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
