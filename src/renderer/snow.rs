//! Falling-snow particle pipeline.

use wgpu::util::DeviceExt;

use crate::gpu::{pipeline_helpers, RenderContext};
use crate::scene::SnowField;

/// Per-flake instance data.
/// Must match the WGSL InstanceIn struct layout exactly.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct SnowInstance {
    /// Scattered base position (xyz), fall speed (w)
    scatter_pos_speed: [f32; 4],
    /// Tree base position (xyz), glow factor (w)
    tree_pos_glow: [f32; 4],
}

/// Per-frame uniforms for the snow program.
/// Must match the WGSL SnowGlobals struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct SnowGlobals {
    mix_value: f32,
    time: f32,
    pixel_ratio: f32,
    fall_height: f32,
    opacity: f32,
    _pad: [f32; 3],
}

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SnowInstance>()
            as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 0,
                shader_location: 0, // scatter_pos_speed
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 1, // tree_pos_glow
            },
        ],
    }
}

/// Renders the snow field as blended billboard discs with a wrap-around
/// fall loop evaluated on the GPU.
pub struct SnowRenderer {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    fall_height: f32,
    opacity: f32,
    count: u32,
}

impl SnowRenderer {
    /// Build the pipeline and upload the immutable attribute buffer.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        field: &SnowField,
        fall_height: f32,
        opacity: f32,
    ) -> Self {
        let instances: Vec<SnowInstance> = (0..field.len())
            .map(|i| SnowInstance {
                scatter_pos_speed: field.scatter[i]
                    .extend(field.speeds[i])
                    .to_array(),
                tree_pos_glow: field.tree[i].extend(field.glows[i]).to_array(),
            })
            .collect();

        let instance_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Snow Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let globals_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Snow Globals Buffer"),
                contents: bytemuck::cast_slice(&[SnowGlobals {
                    mix_value: 0.0,
                    time: 0.0,
                    pixel_ratio: 1.0,
                    fall_height,
                    opacity,
                    _pad: [0.0; 3],
                }]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let globals_layout = pipeline_helpers::single_uniform_layout(
            &context.device,
            "Snow Globals Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let globals_bind_group = pipeline_helpers::single_uniform_bind_group(
            &context.device,
            "Snow Globals Bind Group",
            &globals_layout,
            &globals_buffer,
        );

        let pipeline =
            Self::create_pipeline(context, camera_layout, &globals_layout);

        Self {
            pipeline,
            instance_buffer,
            globals_buffer,
            globals_bind_group,
            fall_height,
            opacity,
            count: field.len() as u32,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        globals_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/snow.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Snow Pipeline Layout"),
                bind_group_layouts: &[camera_layout, globals_layout],
                push_constant_ranges: &[],
            },
        );

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Snow Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[instance_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_helpers::depth_read_only()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Upload this frame's uniforms.
    pub fn prepare(
        &self,
        queue: &wgpu::Queue,
        mix: f32,
        time: f32,
        pixel_ratio: f32,
    ) {
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::cast_slice(&[SnowGlobals {
                mix_value: mix,
                time,
                pixel_ratio,
                fall_height: self.fall_height,
                opacity: self.opacity,
                _pad: [0.0; 3],
            }]),
        );
    }

    /// Record the draw into the given pass.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.globals_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        render_pass.draw(0..4, 0..self.count);
    }
}
