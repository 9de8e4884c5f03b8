//! Perspective camera and its GPU binding.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::gpu::{pipeline_helpers, RenderContext};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Build the view matrix.
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix.
    ///
    /// `perspective_rh` already uses the [0,1] depth range (wgpu/Vulkan
    /// convention).
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

/// GPU uniform buffer holding the view/projection matrices and viewport
/// metadata.
///
/// Must match the WGSL `CameraUniform` struct layout exactly (160 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View matrix (world → view space).
    pub view: [[f32; 4]; 4],
    /// Projection matrix (view → clip space).
    pub proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    pub(crate) _pad0: f32,
    /// Viewport size in physical pixels, for point-size expansion.
    pub viewport: [f32; 2],
    pub(crate) _pad1: [f32; 2],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad0: 0.0,
            viewport: [1.0, 1.0],
            _pad1: [0.0; 2],
        }
    }
}

impl CameraUniform {
    /// Update uniform fields from the given camera's current state.
    pub fn update(&mut self, camera: &Camera, viewport: (u32, u32)) {
        self.view = camera.build_view().to_cols_array_2d();
        self.proj = camera.build_projection().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.viewport = [viewport.0 as f32, viewport.1 as f32];
    }
}

/// Camera plus its uniform buffer and bind group.
pub struct CameraState {
    /// The camera parameters updated by the engine each frame.
    pub camera: Camera,
    /// CPU copy of the camera uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout shared by every pipeline (group 0).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group exposing the camera uniform.
    pub bind_group: wgpu::BindGroup,
}

impl CameraState {
    /// Create the camera GPU state with the given initial camera.
    pub fn new(context: &RenderContext, camera: Camera) -> Self {
        let mut uniform = CameraUniform::default();
        uniform.update(
            &camera,
            (context.config.width, context.config.height),
        );

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = pipeline_helpers::single_uniform_layout(
            &context.device,
            "Camera Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let bind_group = pipeline_helpers::single_uniform_bind_group(
            &context.device,
            "Camera Bind Group",
            &layout,
            &buffer,
        );

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Refresh the uniform from the camera and upload it.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, viewport: (u32, u32)) {
        self.uniform.update(&self.camera, viewport);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 2.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.6,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn test_view_moves_eye_to_origin() {
        let camera = test_camera();
        let view = camera.build_view();
        let eye_in_view = view.transform_point3(camera.eye);
        assert!(eye_in_view.length() < 1e-5);
    }

    #[test]
    fn test_view_depth_is_negative_in_front() {
        let camera = test_camera();
        let view = camera.build_view();
        // The look-at target sits in front of the camera, i.e. at negative
        // view-space z under the right-handed convention.
        let target_in_view = view.transform_point3(camera.target);
        assert!(target_in_view.z < 0.0);
    }

    #[test]
    fn test_uniform_update() {
        let camera = test_camera();
        let mut uniform = CameraUniform::default();
        uniform.update(&camera, (1920, 1080));
        assert_eq!(uniform.viewport, [1920.0, 1080.0]);
        assert_eq!(uniform.position, camera.eye.to_array());
    }
}
