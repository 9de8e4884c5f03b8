//! Instanced ornament mesh pipeline, shared by the bauble and ribbon
//! groups.

use wgpu::util::DeviceExt;

use crate::gpu::{pipeline_helpers, RenderContext};
use crate::options::OrnamentOptions;
use crate::renderer::geometry::{self, MeshVertex};
use crate::scene::OrnamentSet;

/// Per-instance data.
/// Must match the WGSL InstanceIn struct layout exactly.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct OrnamentInstance {
    /// Scattered rest position (xyz), w unused
    scatter_pos: [f32; 4],
    /// Tree rest position (xyz), w unused
    tree_pos: [f32; 4],
    /// Rotation-axis seeds (xy), phase seed (z), blink seed (w)
    orientation: [f32; 4],
    /// Linear base color (rgb), w unused
    color: [f32; 4],
}

/// Per-frame uniforms for the ornament program.
/// Must match the WGSL OrnamentGlobals struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct OrnamentGlobals {
    mix_value: f32,
    time: f32,
    scale: f32,
    _pad: f32,
}

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<OrnamentInstance>()
            as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 0,
                shader_location: 2, // scatter_pos
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 3, // tree_pos
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 32,
                shader_location: 4, // orientation
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 48,
                shader_location: 5, // color
            },
        ],
    }
}

/// Renders one ornament group as an instanced mesh with the metallic
/// shading model.
pub struct OrnamentRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    index_count: u32,
    instance_count: u32,
    scale: f32,
}

impl OrnamentRenderer {
    /// Build the pipeline, the base mesh for the configured shape, and the
    /// immutable instance buffer.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        set: &OrnamentSet,
        options: &OrnamentOptions,
    ) -> Self {
        let (vertices, indices) = geometry::mesh_for(options.shape);

        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Ornament Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Ornament Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let instances: Vec<OrnamentInstance> = (0..set.len())
            .map(|i| OrnamentInstance {
                scatter_pos: set.scatter[i].extend(0.0).to_array(),
                tree_pos: set.tree[i].extend(0.0).to_array(),
                orientation: set.orientations[i].to_array(),
                color: set.colors[i].extend(0.0).to_array(),
            })
            .collect();

        let instance_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Ornament Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let globals_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Ornament Globals Buffer"),
                contents: bytemuck::cast_slice(&[OrnamentGlobals {
                    mix_value: 0.0,
                    time: 0.0,
                    scale: options.scale,
                    _pad: 0.0,
                }]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let globals_layout = pipeline_helpers::single_uniform_layout(
            &context.device,
            "Ornament Globals Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let globals_bind_group = pipeline_helpers::single_uniform_bind_group(
            &context.device,
            "Ornament Globals Bind Group",
            &globals_layout,
            &globals_buffer,
        );

        let pipeline = Self::create_pipeline(
            context,
            camera_layout,
            &globals_layout,
            lighting_layout,
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            globals_buffer,
            globals_bind_group,
            index_count: indices.len() as u32,
            instance_count: set.len() as u32,
            scale: options.scale,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        globals_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/ornament.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Ornament Pipeline Layout"),
                bind_group_layouts: &[
                    camera_layout,
                    globals_layout,
                    lighting_layout,
                ],
                push_constant_ranges: &[],
            },
        );

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Ornament Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[
                        geometry::mesh_vertex_layout(),
                        instance_layout(),
                    ],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_helpers::depth_write()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Upload this frame's mix/time uniforms.
    pub fn prepare(&self, queue: &wgpu::Queue, mix: f32, time: f32) {
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::cast_slice(&[OrnamentGlobals {
                mix_value: mix,
                time,
                scale: self.scale,
                _pad: 0.0,
            }]),
        );
    }

    /// Record the draw into the given pass.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        lighting_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.globals_bind_group, &[]);
        render_pass.set_bind_group(2, lighting_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

// Strides baked into the vertex layouts above.
const _: () = {
    assert!(std::mem::size_of::<MeshVertex>() == 24);
    assert!(std::mem::size_of::<OrnamentInstance>() == 64);
};
