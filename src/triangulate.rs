//! Triangulation of planar 3-D loops: project onto the loop's plane,
//! ear-clip in 2-D, and orient the triangles with the loop normal.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Squared-magnitude floor below which a probed normal or an output
/// triangle counts as degenerate.
const DEGENERACY_FLOOR: Real = 1e-12;

#[inline]
fn point_is_finite(point: &Point3<Real>) -> bool {
    point.x.is_finite() && point.y.is_finite() && point.z.is_finite()
}

/// Probe ordered triples of loop points, keeping the largest cross
/// product seen, and stop as soon as one clears the degeneracy floor.
/// Returns `None` for loops that collapse to a line.
fn estimate_normal(loop_points: &[Point3<Real>]) -> Option<Vector3<Real>> {
    let mut normal = Vector3::zeros();
    'probe: for a in loop_points {
        for b in loop_points {
            for c in loop_points {
                let candidate = (b - a).cross(&(c - b));
                if candidate.norm_squared() > normal.norm_squared() {
                    normal = candidate;
                }
                if normal.norm_squared() > DEGENERACY_FLOOR {
                    break 'probe;
                }
            }
        }
    }
    if normal.norm_squared() <= DEGENERACY_FLOOR {
        return None;
    }
    Some(normal.normalize())
}

/// Triangulate a planar loop of 3-D points.
///
/// Returns index triples into `loop_points` whose union covers the
/// loop, wound consistently with the loop's estimated normal. Loops
/// with fewer than three points, or degenerate to a line, return empty.
/// Triangles touching a non-finite point or collapsing to zero 3-D
/// area are dropped from the result.
pub fn triangulate(loop_points: &[Point3<Real>]) -> Vec<usize> {
    if loop_points.len() < 3 {
        return Vec::new();
    }

    let Some(normal) = estimate_normal(loop_points) else {
        return Vec::new();
    };

    // 2-D frame on the loop plane.
    let mut right = Vector3::z().cross(&normal);
    if right.norm_squared() < 1e-6 {
        right = normal.cross(&Vector3::new(0.0, -1.0, 0.0));
    }
    right = right.normalize();
    let up = normal.cross(&right).normalize();
    let origin = loop_points[0];

    // Project, then translate the loop so its bounding-box minimum is
    // the 2-D origin.
    let mut projected: Vec<(Real, Real)> = loop_points
        .iter()
        .map(|point| (right.dot(&(point - origin)), up.dot(&(point - origin))))
        .collect();
    let min_x = projected.iter().map(|p| p.0).fold(Real::MAX, Real::min);
    let min_y = projected.iter().map(|p| p.1).fold(Real::MAX, Real::min);
    for point in &mut projected {
        *point = (point.0 - min_x, point.1 - min_y);
    }

    // Shoelace signed area of the projected loop.
    let mut area = 0.0;
    for i in 0..projected.len() {
        let (x1, y1) = projected[i];
        let (x2, y2) = projected[(i + 1) % projected.len()];
        area += (y1 + y2) * 0.5 * (x1 - x2);
    }

    let flattened: Vec<Real> = projected.iter().flat_map(|&(x, y)| [x, y]).collect();
    let mut indices = match earcutr::earcut(&flattened, &[], 2) {
        Ok(indices) => indices,
        Err(_) => return Vec::new(),
    };
    if area < 0.0 {
        indices.reverse();
    }

    // Post-filter: drop triangles that collapse in 3-D or touch a
    // non-finite point.
    let mut result = Vec::with_capacity(indices.len());
    for triple in indices.chunks_exact(3) {
        let a = loop_points[triple[0]];
        let b = loop_points[triple[1]];
        let c = loop_points[triple[2]];
        if !point_is_finite(&a) || !point_is_finite(&b) || !point_is_finite(&c) {
            continue;
        }
        if (b - a).cross(&(c - b)).norm_squared() < DEGENERACY_FLOOR {
            continue;
        }
        result.extend_from_slice(triple);
    }
    result
}
