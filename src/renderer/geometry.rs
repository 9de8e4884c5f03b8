//! Procedural base geometry for the instanced ornament groups.

use std::f32::consts::{PI, TAU};

use crate::options::OrnamentShape;

/// Mesh vertex for ornament geometry.
/// Must match the WGSL vertex input layout exactly.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Local-space position.
    pub position: [f32; 3],
    /// Local-space normal.
    pub normal: [f32; 3],
}

/// Vertex buffer layout shared by both ornament meshes.
pub fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0, // position
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1, // normal
            },
        ],
    }
}

/// Build the unit mesh for the given ornament shape.
pub fn mesh_for(shape: OrnamentShape) -> (Vec<MeshVertex>, Vec<u32>) {
    match shape {
        OrnamentShape::Sphere => uv_sphere(12, 18),
        OrnamentShape::Octahedron => octahedron(),
    }
}

/// Unit UV sphere with smooth normals.
pub fn uv_sphere(rings: u32, segments: u32) -> (Vec<MeshVertex>, Vec<u32>) {
    let rings = rings.max(2);
    let segments = segments.max(3);

    let mut vertices = Vec::with_capacity(
        ((rings + 1) * (segments + 1)) as usize,
    );
    for ring in 0..=rings {
        let phi = ring as f32 / rings as f32 * PI;
        for segment in 0..=segments {
            let theta = segment as f32 / segments as f32 * TAU;
            let position = [
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            ];
            // Unit sphere: the normal is the position itself.
            vertices.push(MeshVertex {
                position,
                normal: position,
            });
        }
    }

    // Counter-clockwise when viewed from outside.
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    (vertices, indices)
}

/// Unit octahedron with flat per-face normals.
pub fn octahedron() -> (Vec<MeshVertex>, Vec<u32>) {
    let corners = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    // Counter-clockwise when viewed from outside.
    let faces: [[usize; 3]; 8] = [
        [2, 4, 0],
        [2, 0, 5],
        [2, 5, 1],
        [2, 1, 4],
        [3, 0, 4],
        [3, 5, 0],
        [3, 1, 5],
        [3, 4, 1],
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(24);
    for face in faces {
        let a = glam::Vec3::from_array(corners[face[0]]);
        let b = glam::Vec3::from_array(corners[face[1]]);
        let c = glam::Vec3::from_array(corners[face[2]]);
        let normal = (b - a).cross(c - a).normalize().to_array();
        for corner in face {
            indices.push(vertices.len() as u32);
            vertices.push(MeshVertex {
                position: corners[corner],
                normal,
            });
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_sphere_vertices_on_unit_sphere() {
        let (vertices, indices) = uv_sphere(8, 12);
        for v in &vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 1.0).abs() < 1e-5);
            // Smooth normal equals position on the unit sphere.
            assert!((p - Vec3::from_array(v.normal)).length() < 1e-6);
        }
        assert_eq!(indices.len() as u32, 8 * 12 * 6);
        for &i in &indices {
            assert!((i as usize) < vertices.len());
        }
    }

    #[test]
    fn test_sphere_winding_counter_clockwise() {
        let (vertices, indices) = uv_sphere(8, 12);
        for tri in indices.chunks(3) {
            let a = Vec3::from_array(vertices[tri[0] as usize].position);
            let b = Vec3::from_array(vertices[tri[1] as usize].position);
            let c = Vec3::from_array(vertices[tri[2] as usize].position);
            let face_normal = (b - a).cross(c - a);
            // Pole rows collapse to degenerate triangles; skip those.
            if face_normal.length() < 1e-6 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_octahedron_normals_face_outward() {
        let (vertices, indices) = octahedron();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 24);
        for v in &vertices {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(p.dot(n) > 0.0, "normal must point away from the origin");
        }
    }

    #[test]
    fn test_octahedron_winding_counter_clockwise() {
        let (vertices, indices) = octahedron();
        for tri in indices.chunks(3) {
            let a = Vec3::from_array(vertices[tri[0] as usize].position);
            let b = Vec3::from_array(vertices[tri[1] as usize].position);
            let c = Vec3::from_array(vertices[tri[2] as usize].position);
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }
}
