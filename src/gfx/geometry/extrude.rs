//! 2D outlines and their extrusion into solid geometry
//!
//! A [`Shape`] is a single closed contour built from straight and quadratic
//! segments. [`extrude_shape`] turns it into a prism along +Z with flat
//! front/back caps and flat-shaded side walls.

use super::GeometryData;
use crate::error::GeometryError;

/// Divisions used when sampling each quadratic segment
pub const DEFAULT_CURVE_SEGMENTS: u32 = 12;

/// A closed 2D outline
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    points: Vec<[f32; 2]>,
    curve_segments: u32,
}

impl Shape {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            curve_segments: DEFAULT_CURVE_SEGMENTS,
        }
    }

    pub fn with_curve_segments(mut self, segments: u32) -> Self {
        self.curve_segments = segments.max(1);
        self
    }

    /// Starts the contour at `(x, y)`, discarding anything drawn before
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.points.clear();
        self.points.push([x, y]);
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.points.push([x, y]);
        self
    }

    /// Appends a quadratic Bezier segment from the current point
    ///
    /// # Arguments
    /// * `cpx`, `cpy` - Control point
    /// * `x`, `y` - End point
    pub fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) -> &mut Self {
        let start = self.points.last().copied().unwrap_or([0.0, 0.0]);
        if self.points.is_empty() {
            self.points.push(start);
        }

        for i in 1..=self.curve_segments {
            let t = i as f32 / self.curve_segments as f32;
            let mt = 1.0 - t;
            let a = mt * mt;
            let b = 2.0 * mt * t;
            let c = t * t;
            self.points.push([
                a * start[0] + b * cpx + c * x,
                a * start[1] + b * cpy + c * y,
            ]);
        }
        self
    }

    /// The sampled contour with consecutive duplicates and the closing point removed
    pub fn outline(&self) -> Vec<[f32; 2]> {
        let mut outline: Vec<[f32; 2]> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if outline.last().map_or(true, |last| !points_equal(*last, p)) {
                outline.push(p);
            }
        }
        while outline.len() > 1 && points_equal(outline[0], outline[outline.len() - 1]) {
            outline.pop();
        }
        outline
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}

/// Extrudes a shape from z = 0 to z = `depth`
///
/// The back cap faces -Z, the front cap faces +Z, and each outline edge
/// becomes a quad with its own outward normal.
///
/// # Errors
/// Fails for outlines with fewer than three distinct points or no area,
/// for a non-positive depth, and for outlines ear clipping cannot resolve.
pub fn extrude_shape(shape: &Shape, depth: f32) -> Result<GeometryData, GeometryError> {
    if !(depth > 0.0) {
        return Err(GeometryError::InvalidDepth(depth));
    }

    let mut outline = shape.outline();
    if outline.len() < 3 {
        return Err(GeometryError::DegenerateShape(outline.len()));
    }

    let area = signed_area(&outline);
    if area.abs() <= f32::EPSILON * f32::EPSILON {
        return Err(GeometryError::DegenerateShape(outline.len()));
    }
    if area < 0.0 {
        outline.reverse();
    }

    let triangles =
        triangulate(&outline).ok_or(GeometryError::Triangulation(outline.len()))?;

    let mut data = GeometryData::new();

    // Caps
    for (z, normal, flip) in [(0.0, [0.0, 0.0, -1.0], true), (depth, [0.0, 0.0, 1.0], false)] {
        let base = data.vertices.len() as u32;
        for p in &outline {
            data.push_vertex([p[0], p[1], z], normal, [p[0], p[1]]);
        }
        for tri in triangles.chunks_exact(3) {
            if flip {
                data.indices
                    .extend_from_slice(&[base + tri[0], base + tri[2], base + tri[1]]);
            } else {
                data.indices
                    .extend_from_slice(&[base + tri[0], base + tri[1], base + tri[2]]);
            }
        }
    }

    // Side walls
    let n = outline.len();
    for i in 0..n {
        let p0 = outline[i];
        let p1 = outline[(i + 1) % n];
        let dx = p1[0] - p0[0];
        let dy = p1[1] - p0[1];
        let len = (dx * dx + dy * dy).sqrt();
        let normal = [dy / len, -dx / len, 0.0];

        let base = data.vertices.len() as u32;
        data.push_vertex([p0[0], p0[1], 0.0], normal, [0.0, 0.0]);
        data.push_vertex([p1[0], p1[1], 0.0], normal, [1.0, 0.0]);
        data.push_vertex([p1[0], p1[1], depth], normal, [1.0, 1.0]);
        data.push_vertex([p0[0], p0[1], depth], normal, [0.0, 1.0]);
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Ok(data)
}

fn points_equal(a: [f32; 2], b: [f32; 2]) -> bool {
    (a[0] - b[0]).abs() <= f32::EPSILON && (a[1] - b[1]).abs() <= f32::EPSILON
}

/// Shoelace area, positive for counter-clockwise outlines
fn signed_area(points: &[[f32; 2]]) -> f32 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        sum += p[0] * q[1] - q[0] * p[1];
    }
    sum * 0.5
}

fn cross(o: [f32; 2], a: [f32; 2], b: [f32; 2]) -> f32 {
    (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
}

fn point_in_triangle(p: [f32; 2], a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

/// Ear clipping over a counter-clockwise polygon
///
/// Returns counter-clockwise triangles as indices into `points`, or `None`
/// when no ear can be found (self-intersecting input).
fn triangulate(points: &[[f32; 2]]) -> Option<Vec<u32>> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity((points.len() - 2) * 3);

    while remaining.len() > 3 {
        let m = remaining.len();
        let mut clipped = false;

        for i in 0..m {
            let prev = remaining[(i + m - 1) % m];
            let cur = remaining[i];
            let next = remaining[(i + 1) % m];
            let (a, b, c) = (points[prev], points[cur], points[next]);

            let turn = cross(a, b, c);
            if turn.abs() <= f32::EPSILON * f32::EPSILON {
                // collinear vertex contributes no area
                remaining.remove(i);
                clipped = true;
                break;
            }
            if turn < 0.0 {
                continue;
            }

            let blocked = remaining.iter().any(|&other| {
                other != prev
                    && other != cur
                    && other != next
                    && point_in_triangle(points[other], a, b, c)
            });
            if blocked {
                continue;
            }

            triangles.extend_from_slice(&[prev as u32, cur as u32, next as u32]);
            remaining.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            return None;
        }
    }

    triangles.extend(remaining.iter().map(|&i| i as u32));
    Some(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swoosh() -> Shape {
        let mut shape = Shape::new();
        shape
            .move_to(-0.03, 0.0)
            .quadratic_curve_to(0.01, 0.03, 0.06, 0.01)
            .quadratic_curve_to(0.03, -0.01, 0.06, -0.03);
        shape
    }

    #[test]
    fn test_curve_sampling() {
        let outline = swoosh().outline();
        // start point plus 12 samples per curve
        assert_eq!(outline.len(), 25);
        assert_eq!(outline[0], [-0.03, 0.0]);
        let last = outline[24];
        assert!((last[0] - 0.06).abs() < 1e-6);
        assert!((last[1] + 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_extrude_swoosh() {
        let logo = extrude_shape(&swoosh(), 0.004).unwrap();
        // two caps of 25 points plus a 4-vertex quad per edge
        assert_eq!(logo.vertex_count(), 25 * 2 + 25 * 4);
        assert_eq!(logo.triangle_count(), 23 * 2 + 25 * 2);

        let bounds = logo.bounding_box().unwrap();
        assert!((bounds.min[2] - 0.0).abs() < 1e-6);
        assert!((bounds.max[2] - 0.004).abs() < 1e-6);
    }

    #[test]
    fn test_square_caps_face_outward() {
        let mut square = Shape::new();
        // clockwise on purpose
        square
            .move_to(0.0, 0.0)
            .line_to(0.0, 1.0)
            .line_to(1.0, 1.0)
            .line_to(1.0, 0.0);
        let prism = extrude_shape(&square, 0.5).unwrap();
        assert_eq!(prism.triangle_count(), 2 * 2 + 4 * 2);

        for tri in prism.indices.chunks_exact(3) {
            let [a, b, c] = [
                prism.vertices[tri[0] as usize],
                prism.vertices[tri[1] as usize],
                prism.vertices[tri[2] as usize],
            ];
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let face = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let n = prism.normals[tri[0] as usize];
            let dot = face[0] * n[0] + face[1] * n[1] + face[2] * n[2];
            assert!(dot > 0.0, "winding disagrees with normal for {:?}", tri);
        }
    }

    #[test]
    fn test_concave_outline_triangulates() {
        let mut arrow = Shape::new();
        arrow
            .move_to(0.0, 0.0)
            .line_to(2.0, 0.0)
            .line_to(2.0, 2.0)
            .line_to(1.0, 0.5)
            .line_to(0.0, 2.0);
        let solid = extrude_shape(&arrow, 1.0).unwrap();
        assert_eq!(solid.triangle_count(), 3 * 2 + 5 * 2);
    }

    #[test]
    fn test_invalid_extrusions() {
        let mut line = Shape::new();
        line.move_to(0.0, 0.0).line_to(1.0, 0.0);
        assert_eq!(
            extrude_shape(&line, 1.0).unwrap_err(),
            GeometryError::DegenerateShape(2)
        );

        assert_eq!(
            extrude_shape(&swoosh(), 0.0).unwrap_err(),
            GeometryError::InvalidDepth(0.0)
        );

        let mut flat = Shape::new();
        flat.move_to(0.0, 0.0).line_to(1.0, 0.0).line_to(2.0, 0.0);
        assert!(matches!(
            extrude_shape(&flat, 1.0),
            Err(GeometryError::DegenerateShape(3))
        ));
    }
}
