//! # Primitive Shape Generation
//!
//! This module contains functions to generate common 3D primitive shapes.
//! All shapes are generated with proper normals and texture coordinates.

use super::GeometryData;
use std::collections::HashMap;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has proper normals pointing outward and UV coordinates from 0 to 1.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    #[rustfmt::skip]
    let tex_coords = [
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.tex_coords = tex_coords.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|normal| std::iter::repeat(*normal).take(4))
        .collect();

    // Two counter-clockwise triangles per face
    data.indices = (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect();

    data
}

/// Generate a regular icosahedron inscribed in the unit sphere
///
/// The twelve corners are shared between faces and carry radial normals, so
/// the shape looks round under smooth shading and faceted under flat shading.
pub fn generate_icosahedron() -> GeometryData {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;

    #[rustfmt::skip]
    let corners = [
        [-1.0,  t, 0.0], [ 1.0,  t, 0.0], [-1.0, -t, 0.0], [ 1.0, -t, 0.0],
        [0.0, -1.0,  t], [0.0,  1.0,  t], [0.0, -1.0, -t], [0.0,  1.0, -t],
        [ t, 0.0, -1.0], [ t, 0.0,  1.0], [-t, 0.0, -1.0], [-t, 0.0,  1.0],
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 11, 5,   0, 5, 1,    0, 1, 7,    0, 7, 10,   0, 10, 11,
        1, 5, 9,    5, 11, 4,   11, 10, 2,  10, 7, 6,   7, 1, 8,
        3, 9, 4,    3, 4, 2,    3, 2, 6,    3, 6, 8,    3, 8, 9,
        4, 9, 5,    2, 4, 11,   6, 2, 10,   8, 6, 7,    9, 8, 1,
    ];

    let mut data = GeometryData::new();
    for corner in corners {
        push_sphere_vertex(&mut data, corner);
    }
    data.indices = indices;
    data
}

/// Generate an icosphere by repeatedly splitting every icosahedron face
/// into four and pushing the new corners out to the unit sphere
///
/// # Arguments
/// * `subdivisions` - Number of split passes (0 yields the icosahedron)
pub fn generate_icosphere(subdivisions: u32) -> GeometryData {
    let mut data = generate_icosahedron();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut indices = Vec::with_capacity(data.indices.len() * 4);

        for triangle in data.indices.clone().chunks(3) {
            let (a, b, c) = (triangle[0], triangle[1], triangle[2]);
            let ab = midpoint_index(&mut data, &mut midpoints, a, b);
            let bc = midpoint_index(&mut data, &mut midpoints, b, c);
            let ca = midpoint_index(&mut data, &mut midpoints, c, a);

            indices.extend_from_slice(&[a, ab, ca, b, bc, ab, c, ca, bc, ab, bc, ca]);
        }

        data.indices = indices;
    }

    data
}

/// Generate a unit square in the XY plane, facing +Z
pub fn generate_square() -> GeometryData {
    let mut data = GeometryData::new();

    data.vertices = vec![
        [-0.5, -0.5, 0.0],
        [0.5, -0.5, 0.0],
        [0.5, 0.5, 0.0],
        [-0.5, 0.5, 0.0],
    ];
    data.normals = vec![[0.0, 0.0, 1.0]; 4];
    data.tex_coords = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    data.indices = vec![0, 1, 2, 2, 3, 0];

    data
}

/// Normalises `position` onto the unit sphere and appends it with a radial
/// normal and an equirectangular UV
fn push_sphere_vertex(data: &mut GeometryData, position: [f32; 3]) -> u32 {
    let length = (position[0] * position[0]
        + position[1] * position[1]
        + position[2] * position[2])
        .sqrt();
    let p = [
        position[0] / length,
        position[1] / length,
        position[2] / length,
    ];

    let u = 0.5 + p[2].atan2(p[0]) / (2.0 * PI);
    let v = 0.5 - p[1].clamp(-1.0, 1.0).asin() / PI;

    data.vertices.push(p);
    data.normals.push(p);
    data.tex_coords.push([u, v]);
    (data.vertices.len() - 1) as u32
}

fn midpoint_index(
    data: &mut GeometryData,
    midpoints: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&index) = midpoints.get(&key) {
        return index;
    }

    let pa = data.vertices[a as usize];
    let pb = data.vertices[b as usize];
    let mid = [
        (pa[0] + pb[0]) * 0.5,
        (pa[1] + pb[1]) * 0.5,
        (pa[2] + pb[2]) * 0.5,
    ];

    let index = push_sphere_vertex(data, mid);
    midpoints.insert(key, index);
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::assert_abs_diff_eq;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Every triangle of a convex shape centred at the origin must wind
    /// counter-clockwise when seen from outside
    fn assert_outward_winding(data: &GeometryData) {
        for triangle in data.indices.chunks(3) {
            let a = data.vertices[triangle[0] as usize];
            let b = data.vertices[triangle[1] as usize];
            let c = data.vertices[triangle[2] as usize];
            let normal = cross(sub(b, a), sub(c, a));
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            assert!(dot(normal, centroid) > 0.0, "inward face {:?}", triangle);
        }
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.normals.len(), cube.vertices.len());
        assert_outward_winding(&cube);
    }

    #[test]
    fn cube_normals_match_face_orientation() {
        let cube = generate_cube();
        for triangle in cube.indices.chunks(3) {
            let a = cube.vertices[triangle[0] as usize];
            let b = cube.vertices[triangle[1] as usize];
            let c = cube.vertices[triangle[2] as usize];
            let face = cross(sub(b, a), sub(c, a));
            let normal = cube.normals[triangle[0] as usize];
            assert!(dot(face, normal) > 0.0);
        }
    }

    #[test]
    fn test_icosahedron_generation() {
        let ico = generate_icosahedron();
        assert_eq!(ico.vertex_count(), 12);
        assert_eq!(ico.triangle_count(), 20);
        assert_outward_winding(&ico);
    }

    #[test]
    fn icosphere_counts_follow_subdivision() {
        let level_one = generate_icosphere(1);
        assert_eq!(level_one.vertex_count(), 42);
        assert_eq!(level_one.triangle_count(), 80);

        let level_two = generate_icosphere(2);
        assert_eq!(level_two.vertex_count(), 162);
        assert_eq!(level_two.triangle_count(), 320);
        assert_outward_winding(&level_two);
    }

    #[test]
    fn icosphere_vertices_lie_on_unit_sphere() {
        let sphere = generate_icosphere(3);
        for vertex in &sphere.vertices {
            assert_abs_diff_eq!(dot(*vertex, *vertex).sqrt(), 1.0, epsilon = 1e-5);
        }
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
    }

    #[test]
    fn test_square_generation() {
        let square = generate_square();
        assert_eq!(square.vertex_count(), 4);
        assert_eq!(square.triangle_count(), 2);
        let normal = cross(
            sub(square.vertices[1], square.vertices[0]),
            sub(square.vertices[2], square.vertices[0]),
        );
        assert!(normal[2] > 0.0);
    }
}
