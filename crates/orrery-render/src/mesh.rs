//! CPU mesh generation for scene primitives.

use std::f32::consts::{PI, TAU};

use crate::buffer::VertexPositionNormalUv;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<VertexPositionNormalUv>,
    pub indices: Vec<u32>,
}

/// UV sphere centered on the origin.
///
/// `u` runs once around the equator starting at -X, `v` runs from the north
/// pole (0) to the south pole (1), matching equirectangular maps stored top
/// row first. The seam column is duplicated so `u` reaches 1. Triangles wind
/// counter-clockwise seen from outside; the degenerate pole triangles are
/// skipped.
#[must_use]
pub fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let columns = width_segments + 1;

    let mut vertices = Vec::with_capacity((columns * (height_segments + 1)) as usize);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let (sin_phi, cos_phi) = (v * PI).sin_cos();
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let (sin_theta, cos_theta) = (u * TAU).sin_cos();
            let normal = [-cos_theta * sin_phi, cos_phi, sin_theta * sin_phi];
            vertices.push(VertexPositionNormalUv {
                position: normal.map(|c| c * radius),
                normal,
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((width_segments * height_segments * 6) as usize);
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * columns + ix + 1;
            let b = iy * columns + ix;
            let c = (iy + 1) * columns + ix;
            let d = (iy + 1) * columns + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// Flat annulus in the XZ plane facing +Y.
///
/// `u` runs from the inner edge (0) to the outer edge (1) so radial strip
/// textures map across the ring; `v` follows the angle.
#[must_use]
pub fn ring_mesh(inner: f32, outer: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let columns = segments + 1;

    let mut vertices = Vec::with_capacity(columns as usize * 2);
    for (edge, radius) in [(0.0, inner), (1.0, outer)] {
        for i in 0..=segments {
            let t = i as f32 / segments as f32;
            let (sin, cos) = (t * TAU).sin_cos();
            vertices.push(VertexPositionNormalUv {
                position: [radius * cos, 0.0, -radius * sin],
                normal: [0.0, 1.0, 0.0],
                uv: [edge, t],
            });
        }
    }

    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let a = i;
        let b = i + columns;
        let c = i + columns + 1;
        let d = i + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn position(mesh: &MeshData, index: u32) -> Vec3 {
        Vec3::from(mesh.vertices[index as usize].position)
    }

    fn assert_outward_winding(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let (a, b, c) = (position(mesh, tri[0]), position(mesh, tri[1]), position(mesh, tri[2]));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let mesh = sphere_mesh(2.5, 16, 12);
        assert_eq!(mesh.vertices.len(), 17 * 13);
        for vertex in &mesh.vertices {
            assert!((Vec3::from(vertex.position).length() - 2.5).abs() < 1e-5);
            assert!((Vec3::from(vertex.normal).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_triangle_count_skips_pole_degenerates() {
        let mesh = sphere_mesh(1.0, 16, 12);
        // Two triangles per quad minus one per quad in each pole row.
        assert_eq!(mesh.indices.len() / 3, 16 * 12 * 2 - 2 * 16);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_sphere_winds_outward() {
        assert_outward_winding(&sphere_mesh(1.0, 12, 8));
    }

    #[test]
    fn test_sphere_uv_runs_north_to_south() {
        let mesh = sphere_mesh(1.0, 8, 4);
        let north = &mesh.vertices[0];
        let south = mesh.vertices.last().unwrap();
        assert_eq!(north.uv[1], 0.0);
        assert!(north.position[1] > 0.99);
        assert_eq!(south.uv, [1.0, 1.0]);
        assert!(south.position[1] < -0.99);
    }

    #[test]
    fn test_ring_spans_radii_in_xz_plane() {
        let mesh = ring_mesh(1.2, 2.0, 64);
        assert_eq!(mesh.vertices.len(), 65 * 2);
        assert_eq!(mesh.indices.len() / 3, 128);
        for vertex in &mesh.vertices {
            let p = Vec3::from(vertex.position);
            assert_eq!(p.y, 0.0);
            let r = p.length();
            assert!((r - 1.2).abs() < 1e-5 || (r - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ring_faces_up() {
        let mesh = ring_mesh(1.0, 2.0, 16);
        for tri in mesh.indices.chunks(3) {
            let (a, b, c) = (position(&mesh, tri[0]), position(&mesh, tri[1]), position(&mesh, tri[2]));
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }

    #[test]
    fn test_degenerate_segment_counts_are_raised() {
        assert!(!sphere_mesh(1.0, 0, 0).indices.is_empty());
        assert_eq!(ring_mesh(1.0, 2.0, 0).indices.len() / 3, 6);
    }
}
