//! Foliage particle pipeline.

use wgpu::util::DeviceExt;

use crate::gpu::{pipeline_helpers, RenderContext};
use crate::scene::FoliageSet;

/// Per-point instance data.
/// Must match the WGSL InstanceIn struct layout exactly.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FoliageInstance {
    /// Scattered rest position (xyz), base point size (w)
    scatter_pos_size: [f32; 4],
    /// Tree rest position (xyz), w unused
    tree_pos: [f32; 4],
    /// Linear base color (rgb), w unused
    color: [f32; 4],
}

/// Per-frame uniforms for the foliage program.
/// Must match the WGSL FoliageGlobals struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FoliageGlobals {
    mix_value: f32,
    time: f32,
    pixel_ratio: f32,
    _pad: f32,
}

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<FoliageInstance>()
            as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 0,
                shader_location: 0, // scatter_pos_size
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 1, // tree_pos
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 32,
                shader_location: 2, // color
            },
        ],
    }
}

/// Renders the foliage point set as blended billboard discs.
pub struct FoliageRenderer {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    count: u32,
}

impl FoliageRenderer {
    /// Build the pipeline and upload the immutable attribute buffer.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        set: &FoliageSet,
    ) -> Self {
        let instances: Vec<FoliageInstance> = (0..set.len())
            .map(|i| FoliageInstance {
                scatter_pos_size: set.scatter[i].extend(set.sizes[i]).to_array(),
                tree_pos: set.tree[i].extend(0.0).to_array(),
                color: set.colors[i].extend(0.0).to_array(),
            })
            .collect();

        let instance_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Foliage Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let globals_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Foliage Globals Buffer"),
                contents: bytemuck::cast_slice(&[FoliageGlobals {
                    mix_value: 0.0,
                    time: 0.0,
                    pixel_ratio: 1.0,
                    _pad: 0.0,
                }]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let globals_layout = pipeline_helpers::single_uniform_layout(
            &context.device,
            "Foliage Globals Layout",
            wgpu::ShaderStages::VERTEX,
        );
        let globals_bind_group = pipeline_helpers::single_uniform_bind_group(
            &context.device,
            "Foliage Globals Bind Group",
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
            count: set.len() as u32,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        globals_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/foliage.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Foliage Pipeline Layout"),
                bind_group_layouts: &[camera_layout, globals_layout],
                push_constant_ranges: &[],
            },
        );

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Foliage Pipeline"),
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

    /// Upload this frame's mix/time/pixel-ratio uniforms.
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
            bytemuck::cast_slice(&[FoliageGlobals {
                mix_value: mix,
                time,
                pixel_ratio,
                _pad: 0.0,
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
