//! # Primitive Shape Generation
//!
//! This module contains functions to generate common 3D primitive shapes.
//! All shapes are generated with proper normals and texture coordinates,
//! Y-up, with counter-clockwise front faces.

use super::GeometryData;
use std::f32::consts::{PI, TAU};

/// Generate an axis-aligned box centered at the origin
///
/// Each face has its own four vertices so normals stay flat.
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `depth` - Extent along Z
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // Front face (+Z)
        ([0.0, 0.0, 1.0], [[-hx, -hy,  hz], [ hx, -hy,  hz], [ hx,  hy,  hz], [-hx,  hy,  hz]]),
        // Back face (-Z)
        ([0.0, 0.0, -1.0], [[-hx, -hy, -hz], [-hx,  hy, -hz], [ hx,  hy, -hz], [ hx, -hy, -hz]]),
        // Left face (-X)
        ([-1.0, 0.0, 0.0], [[-hx, -hy, -hz], [-hx, -hy,  hz], [-hx,  hy,  hz], [-hx,  hy, -hz]]),
        // Right face (+X)
        ([1.0, 0.0, 0.0], [[ hx, -hy,  hz], [ hx, -hy, -hz], [ hx,  hy, -hz], [ hx,  hy,  hz]]),
        // Top face (+Y)
        ([0.0, 1.0, 0.0], [[-hx,  hy,  hz], [ hx,  hy,  hz], [ hx,  hy, -hz], [-hx,  hy, -hz]]),
        // Bottom face (-Y)
        ([0.0, -1.0, 0.0], [[-hx, -hy, -hz], [ hx, -hy, -hz], [ hx, -hy,  hz], [-hx, -hy,  hz]]),
    ];
    let corner_uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    for (normal, corners) in faces {
        let base = data.vertices.len() as u32;
        for (corner, uv) in corners.into_iter().zip(corner_uvs) {
            data.push_vertex(corner, normal, uv);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a full UV sphere
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of segments around the equator
/// * `height_segments` - Number of rings from pole to pole
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    generate_sphere_section(radius, width_segments, height_segments, 0.0, TAU, 0.0, PI)
}

/// Generate a section of a UV sphere
///
/// `phi` sweeps around the vertical axis starting from -X, `theta` sweeps
/// from the north pole (0) to the south pole (PI). Triangles collapsing onto
/// a pole are skipped.
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Segments along phi
/// * `height_segments` - Segments along theta
/// * `phi_start` - Horizontal start angle
/// * `phi_length` - Horizontal sweep
/// * `theta_start` - Vertical start angle
/// * `theta_length` - Vertical sweep
pub fn generate_sphere_section(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    phi_start: f32,
    phi_length: f32,
    theta_start: f32,
    theta_length: f32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(3);
    let h_segs = height_segments.max(2);
    let theta_end = (theta_start + theta_length).min(PI);

    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(h_segs as usize + 1);
    let mut index = 0u32;

    for iy in 0..=h_segs {
        let v = iy as f32 / h_segs as f32;
        let theta = theta_start + v * theta_length;
        let mut row = Vec::with_capacity(w_segs as usize + 1);

        for ix in 0..=w_segs {
            let u = ix as f32 / w_segs as f32;
            let phi = phi_start + u * phi_length;

            let position = [
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ];
            data.push_vertex(position, normalize_or_up(position), [u, 1.0 - v]);

            row.push(index);
            index += 1;
        }
        grid.push(row);
    }

    for iy in 0..h_segs as usize {
        for ix in 0..w_segs as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            if iy != 0 || theta_start > 0.0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h_segs as usize - 1 || theta_end < PI {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    data
}

/// Full parameter set for [`generate_cylinder_section`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl CylinderParams {
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }

    pub fn with_height_segments(mut self, segments: u32) -> Self {
        self.height_segments = segments;
        self
    }

    /// Drops both end caps
    pub fn open_ended(mut self) -> Self {
        self.open_ended = true;
        self
    }

    /// Restricts the sweep around the axis (builder pattern)
    ///
    /// # Arguments
    /// * `start` - Start angle, 0 faces +Z
    /// * `length` - Sweep angle
    pub fn with_theta(mut self, start: f32, length: f32) -> Self {
        self.theta_start = start;
        self.theta_length = length;
        self
    }
}

/// Generate a closed cylinder (possibly tapered) along the Y axis
///
/// # Arguments
/// * `radius_top` - Radius at +height/2
/// * `radius_bottom` - Radius at -height/2
/// * `height` - Length along Y
/// * `radial_segments` - Number of segments around the axis
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> GeometryData {
    generate_cylinder_section(&CylinderParams::new(
        radius_top,
        radius_bottom,
        height,
        radial_segments,
    ))
}

/// Generate a cone with its apex at +height/2
pub fn generate_cone(radius: f32, height: f32, radial_segments: u32) -> GeometryData {
    generate_cylinder(0.0, radius, height, radial_segments)
}

/// Generate a cylinder from a full parameter set
///
/// The side wall is built ring by ring from top to bottom. Caps are added
/// unless the cylinder is open-ended, and only for a non-zero radius.
pub fn generate_cylinder_section(params: &CylinderParams) -> GeometryData {
    let mut data = GeometryData::new();

    let radial = params.radial_segments.max(3);
    let rows = params.height_segments.max(1);
    let half_height = params.height * 0.5;
    let slope = if params.height.abs() > f32::EPSILON {
        (params.radius_bottom - params.radius_top) / params.height
    } else {
        0.0
    };

    // Side wall
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(rows as usize + 1);
    let mut index = 0u32;
    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let radius = v * (params.radius_bottom - params.radius_top) + params.radius_top;
        let mut row = Vec::with_capacity(radial as usize + 1);

        for x in 0..=radial {
            let u = x as f32 / radial as f32;
            let theta = u * params.theta_length + params.theta_start;
            let (sin_t, cos_t) = theta.sin_cos();

            data.push_vertex(
                [radius * sin_t, -v * params.height + half_height, radius * cos_t],
                normalize_or_up([sin_t, slope, cos_t]),
                [u, 1.0 - v],
            );
            row.push(index);
            index += 1;
        }
        grid.push(row);
    }

    for x in 0..radial as usize {
        for y in 0..rows as usize {
            let a = grid[y][x];
            let b = grid[y + 1][x];
            let c = grid[y + 1][x + 1];
            let d = grid[y][x + 1];
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    if !params.open_ended {
        if params.radius_top > 0.0 {
            push_cylinder_cap(&mut data, params, radial, true);
        }
        if params.radius_bottom > 0.0 {
            push_cylinder_cap(&mut data, params, radial, false);
        }
    }

    data
}

fn push_cylinder_cap(data: &mut GeometryData, params: &CylinderParams, radial: u32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let radius = if top {
        params.radius_top
    } else {
        params.radius_bottom
    };
    let y = params.height * 0.5 * sign;

    // one centre vertex per segment so each wedge gets its own uv
    let center_start = data.vertices.len() as u32;
    for _ in 0..radial {
        data.push_vertex([0.0, y, 0.0], [0.0, sign, 0.0], [0.5, 0.5]);
    }

    let rim_start = data.vertices.len() as u32;
    for x in 0..=radial {
        let u = x as f32 / radial as f32;
        let theta = u * params.theta_length + params.theta_start;
        let (sin_t, cos_t) = theta.sin_cos();
        data.push_vertex(
            [radius * sin_t, y, radius * cos_t],
            [0.0, sign, 0.0],
            [cos_t * 0.5 + 0.5, sin_t * 0.5 * sign + 0.5],
        );
    }

    for x in 0..radial {
        let c = center_start + x;
        let i = rim_start + x;
        if top {
            data.indices.extend_from_slice(&[i, i + 1, c]);
        } else {
            data.indices.extend_from_slice(&[i + 1, i, c]);
        }
    }
}

/// Generate a torus lying in the XY plane
///
/// # Arguments
/// * `radius` - Distance from the torus centre to the tube centre
/// * `tube` - Tube radius
/// * `radial_segments` - Segments around the tube
/// * `tubular_segments` - Segments along the ring
/// * `arc` - Ring sweep in radians (`TAU` for a closed ring)
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
    arc: f32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let radial = radial_segments.max(2);
    let tubular = tubular_segments.max(3);

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * arc;
            let v = j as f32 / radial as f32 * TAU;

            let ring = radius + tube * v.cos();
            let position = [ring * u.cos(), ring * u.sin(), tube * v.sin()];
            let center = [radius * u.cos(), radius * u.sin(), 0.0];
            let normal = normalize_or_up([
                position[0] - center[0],
                position[1] - center[1],
                position[2] - center[2],
            ]);

            data.push_vertex(
                position,
                normal,
                [i as f32 / tubular as f32, j as f32 / radial as f32],
            );
        }
    }

    let stride = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    data
}

/// Generate a flat disc in the XY plane facing +Z
///
/// # Arguments
/// * `radius` - Disc radius
/// * `segments` - Number of wedges
pub fn generate_circle(radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segs = segments.max(3);

    data.push_vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5]);
    for s in 0..=segs {
        let angle = s as f32 / segs as f32 * TAU;
        let (sin_a, cos_a) = angle.sin_cos();
        data.push_vertex(
            [radius * cos_a, radius * sin_a, 0.0],
            [0.0, 0.0, 1.0],
            [(cos_a + 1.0) * 0.5, (sin_a + 1.0) * 0.5],
        );
    }

    for i in 1..=segs {
        data.indices.extend_from_slice(&[i, i + 1, 0]);
    }

    data
}

/// Generate a plane in the XY plane facing +Z
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
///
/// Rows are emitted from +Y down to -Y.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);
    let segment_width = width / w_segs as f32;
    let segment_height = height / h_segs as f32;

    for iy in 0..=h_segs {
        let y = iy as f32 * segment_height - height * 0.5;
        for ix in 0..=w_segs {
            let x = ix as f32 * segment_width - width * 0.5;
            data.push_vertex(
                [x, -y, 0.0],
                [0.0, 0.0, 1.0],
                [ix as f32 / w_segs as f32, 1.0 - iy as f32 / h_segs as f32],
            );
        }
    }

    let stride = w_segs + 1;
    for iy in 0..h_segs {
        for ix in 0..w_segs {
            let a = ix + stride * iy;
            let b = ix + stride * (iy + 1);
            let c = ix + 1 + stride * (iy + 1);
            let d = ix + 1 + stride * iy;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    data
}

pub(crate) fn normalize_or_up(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > f32::EPSILON {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        [0.0, 1.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every non-degenerate triangle must face away from the origin.
    fn assert_faces_outward(data: &GeometryData) {
        for tri in data.indices.chunks_exact(3) {
            let [a, b, c] = [
                data.vertices[tri[0] as usize],
                data.vertices[tri[1] as usize],
                data.vertices[tri[2] as usize],
            ];
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let area = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            if area < 1e-9 {
                continue;
            }
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            let dot = n[0] * centroid[0] + n[1] * centroid[1] + n[2] * centroid[2];
            assert!(dot > 0.0, "triangle {:?} faces inward", tri);
        }
    }

    #[test]
    fn test_box_generation() {
        let mustache = generate_box(0.12, 0.04, 0.06);
        assert_eq!(mustache.vertex_count(), 24);
        assert_eq!(mustache.triangle_count(), 12);
        let bounds = mustache.bounding_box().unwrap();
        assert!((bounds.size()[0] - 0.12).abs() < 1e-6);
        assert!((bounds.size()[1] - 0.04).abs() < 1e-6);
        assert!((bounds.size()[2] - 0.06).abs() < 1e-6);
        assert_faces_outward(&mustache);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(1.0, 8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        // pole rows contribute one triangle per segment
        assert_eq!(sphere.triangle_count(), 8 * (2 * 6 - 2));
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
        assert_faces_outward(&sphere);
    }

    #[test]
    fn test_lower_hemisphere_section() {
        let jaw = generate_sphere_section(0.22, 32, 16, 0.0, TAU, PI * 0.5, PI * 0.5);
        assert!(jaw.vertices.iter().all(|v| v[1] <= 1e-6));
        // the open rim keeps its full row of quads, only the south pole collapses
        assert_eq!(jaw.triangle_count(), 32 * 16 * 2 - 32);
        assert_faces_outward(&jaw);
    }

    #[test]
    fn test_front_half_sphere_section() {
        let pecs = generate_sphere_section(0.18, 24, 16, 0.0, PI, 0.0, PI);
        assert!(pecs.vertices.iter().all(|v| v[2] >= -1e-6));
    }

    #[test]
    fn test_cylinder_generation() {
        let body = generate_cylinder(0.38, 0.23, 1.22, 40);
        // side wall rings plus two caps of (centres + rim)
        assert_eq!(body.vertex_count(), 41 * 2 + 2 * (40 + 41));
        assert_eq!(body.triangle_count(), 40 * 2 + 40 * 2);

        let straight = generate_cylinder(0.5, 0.5, 1.0, 16);
        assert_faces_outward(&straight);
    }

    #[test]
    fn test_open_half_cylinder() {
        let mouth = generate_cylinder_section(
            &CylinderParams::new(0.045, 0.045, 0.02, 16)
                .open_ended()
                .with_theta(0.0, PI),
        );
        assert_eq!(mouth.vertex_count(), 17 * 2);
        assert_eq!(mouth.triangle_count(), 16 * 2);
        assert!(mouth.vertices.iter().all(|v| v[0] >= -1e-6));
    }

    #[test]
    fn test_cone_has_single_cap() {
        let nose = generate_cone(0.035, 0.12, 16);
        assert_eq!(nose.vertex_count(), 17 * 2 + 16 + 17);
        assert_eq!(nose.triangle_count(), 16 * 2 + 16);
        let bounds = nose.bounding_box().unwrap();
        assert!((bounds.max[1] - 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_jersey_height_segments() {
        let jersey = generate_cylinder_section(
            &CylinderParams::new(0.39, 0.36, 0.8, 80).with_height_segments(4),
        );
        assert_eq!(jersey.vertex_count(), 81 * 5 + 2 * (80 + 81));
    }

    #[test]
    fn test_torus_generation() {
        let seam = generate_torus(0.12, 0.005, 8, 40, TAU);
        assert_eq!(seam.vertex_count(), 9 * 41);
        assert_eq!(seam.triangle_count(), 8 * 40 * 2);
        for n in &seam.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_partial_torus_stays_within_arc() {
        let armhole = generate_torus(0.21, 0.012, 16, 60, PI * 1.2);
        let max_angle = armhole
            .vertices
            .iter()
            .map(|v| v[1].atan2(v[0]).rem_euclid(TAU))
            .fold(0.0f32, f32::max);
        assert!(max_angle <= PI * 1.2 + 1e-3);
    }

    #[test]
    fn test_circle_generation() {
        let iris = generate_circle(0.012, 20);
        assert_eq!(iris.vertex_count(), 22);
        assert_eq!(iris.triangle_count(), 20);
        assert!(iris.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices

        // first triangle winds counter-clockwise seen from +Z
        let [a, b, c] = [
            plane.vertices[plane.indices[0] as usize],
            plane.vertices[plane.indices[1] as usize],
            plane.vertices[plane.indices[2] as usize],
        ];
        let cross_z = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        assert!(cross_z > 0.0);
    }
}
