//! Stylized metallic lighting parameters shared with the ornament shader.

use wgpu::util::DeviceExt;

use crate::gpu::{pipeline_helpers, RenderContext};
use crate::options::LightingOptions;

/// Lighting configuration for the ornament shading model.
/// NOTE: Must match the WGSL struct layout exactly (64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Directional light direction (normalized).
    pub light_dir: [f32; 3],
    /// Ambient floor of the diffuse term.
    pub ambient: f32,
    /// Specular highlight tint.
    pub specular_color: [f32; 3],
    /// Specular highlight intensity.
    pub specular_intensity: f32,
    /// Additive blink highlight tint for gold instances.
    pub blink_color: [f32; 3],
    /// Blink highlight intensity.
    pub blink_intensity: f32,
    /// Specular shininess exponent.
    pub shininess: f32,
    /// Fresnel edge falloff power (higher = tighter edge glow).
    pub fresnel_power: f32,
    /// Fresnel edge brightness boost.
    pub fresnel_intensity: f32,
    pub(crate) _pad: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            // Upper-right key light
            light_dir: normalize([1.0, 2.0, 1.0]),
            ambient: 0.2,
            // Warm, golden specular highlight
            specular_color: [1.0, 0.9, 0.7],
            specular_intensity: 2.5,
            // Intense additive gold glow when blinking
            blink_color: [1.0, 0.9, 0.5],
            blink_intensity: 20.0,
            // Sharp highlight for a metallic look
            shininess: 64.0,
            fresnel_power: 3.0,
            fresnel_intensity: 1.5,
            _pad: 0.0,
        }
    }
}

impl LightingUniform {
    /// Build a uniform from runtime options, keeping the fixed tints.
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            ambient: options.ambient,
            specular_intensity: options.specular_intensity,
            blink_intensity: options.blink_intensity,
            shininess: options.shininess,
            fresnel_power: options.fresnel_power,
            fresnel_intensity: options.fresnel_intensity,
            ..Self::default()
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Lighting uniform plus its GPU buffer and bind group.
pub struct Lighting {
    /// CPU copy of the lighting parameters.
    pub uniform: LightingUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (group 2 of the ornament pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group exposing the lighting uniform.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Create the lighting GPU state from runtime options.
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let uniform = LightingUniform::from_options(options);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = pipeline_helpers::single_uniform_layout(
            &context.device,
            "Lighting Bind Group Layout",
            wgpu::ShaderStages::FRAGMENT,
        );

        let bind_group = pipeline_helpers::single_uniform_bind_group(
            &context.device,
            "Lighting Bind Group",
            &layout,
            &buffer,
        );

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload the current uniform values.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_dir_is_normalized() {
        let uniform = LightingUniform::default();
        let d = uniform.light_dir;
        let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_size_matches_wgsl() {
        assert_eq!(std::mem::size_of::<LightingUniform>(), 64);
    }

    #[test]
    fn test_from_options_overrides() {
        let options = LightingOptions {
            ambient: 0.3,
            ..LightingOptions::default()
        };
        let uniform = LightingUniform::from_options(&options);
        assert_eq!(uniform.ambient, 0.3);
        // Fixed tints stay at their defaults.
        assert_eq!(uniform.specular_color, [1.0, 0.9, 0.7]);
    }
}
