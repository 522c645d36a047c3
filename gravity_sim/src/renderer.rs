//! Instanced disc renderer for the body collection

use gravity_core::Body;
use wgpu::util::DeviceExt;

use crate::camera::{Camera2D, CameraUniform};
use crate::graphics::GraphicsContext;
use crate::trails::Trails;

/// Speed at which a body reaches full red
const COLOR_SPEED: f64 = 200.0;
/// Smallest on-screen radius, in pixels
const MIN_PIXEL_RADIUS: f64 = 1.5;

const SELECTED_COLOR: [f32; 4] = [0.2, 1.0, 0.3, 1.0];
/// Trail dots are drawn at this fraction of the minimum body radius
const TRAIL_RADIUS_SCALE: f64 = 0.6;

/// Instance data for GPU rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

impl BodyInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32,
        3 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// White at rest, shading to red as speed approaches `COLOR_SPEED`
pub fn speed_color(speed: f64) -> [f32; 4] {
    let t = (speed / COLOR_SPEED).clamp(0.0, 1.0) as f32;
    [1.0, 1.0 - t, 1.0 - t, 1.0]
}

/// Faint blue that brightens toward the newest point
pub fn trail_color(age: f32) -> [f32; 4] {
    [0.45, 0.6, 1.0, 0.1 + 0.5 * age.clamp(0.0, 1.0)]
}

/// Quad vertex for instanced rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub corner: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { corner: [-1.0, -1.0] },
    QuadVertex { corner: [1.0, -1.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [-1.0, -1.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [-1.0, 1.0] },
];

pub struct Renderer {
    pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(ctx: &GraphicsContext, initial_capacity: usize) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Body Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/particle.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Body Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Body Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_instanced",
                buffers: &[QuadVertex::layout(), BodyInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_instanced",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_capacity = initial_capacity.max(1);
        let instance_buffer = Self::create_instance_buffer(device, instance_capacity);

        Self {
            pipeline,
            quad_buffer,
            instance_buffer,
            instance_capacity,
            camera_buffer,
            camera_bind_group,
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Body Instance Buffer"),
            size: (std::mem::size_of::<BodyInstance>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera2D) {
        let uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload trail dots followed by one instance per body, growing the
    /// buffer when they outgrow it. Returns the instance count to draw.
    pub fn update_instances(
        &mut self,
        ctx: &GraphicsContext,
        camera: &Camera2D,
        bodies: &[Body],
        trails: &Trails,
        selected: Option<usize>,
    ) -> u32 {
        let needed = bodies.len() + trails.point_count();
        if needed > self.instance_capacity {
            self.instance_capacity = needed.next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(&ctx.device, self.instance_capacity);
            log::debug!("instance buffer grown to {}", self.instance_capacity);
        }

        let min_radius = MIN_PIXEL_RADIUS * camera.world_per_pixel();
        let trail_radius = (min_radius * TRAIL_RADIUS_SCALE) as f32;
        let mut instances: Vec<BodyInstance> = Vec::with_capacity(needed);
        instances.extend(trails.points().map(|(point, age)| BodyInstance {
            center: point.as_vec2().to_array(),
            radius: trail_radius,
            color: trail_color(age),
        }));
        instances.extend(bodies.iter().enumerate().map(|(i, body)| BodyInstance {
            center: body.position.as_vec2().to_array(),
            radius: body.radius.max(min_radius) as f32,
            color: if Some(i) == selected {
                SELECTED_COLOR
            } else {
                speed_color(body.speed())
            },
        }));

        if !instances.is_empty() {
            ctx.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        instances.len() as u32
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        num_instances: u32,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Body Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if num_instances == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.draw(0..6, 0..num_instances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn resting_bodies_are_white_and_fast_ones_red() {
        assert_eq!(speed_color(0.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(speed_color(COLOR_SPEED * 4.0), [1.0, 0.0, 0.0, 1.0]);
        let half = speed_color(COLOR_SPEED / 2.0);
        assert_relative_eq!(half[1], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn newer_trail_points_are_more_opaque() {
        assert!(trail_color(1.0)[3] > trail_color(0.0)[3]);
        assert_relative_eq!(trail_color(2.0)[3], trail_color(1.0)[3]);
    }

    #[test]
    fn instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 28);
    }
}
