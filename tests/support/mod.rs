//! Test support library
//! Provides helper functions shared by the integration tests.
#![allow(dead_code)]

use bimcsg::csg::Polygon;
use bimcsg::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// of a set of polygons.
pub fn bounding_box(polygons: &[Polygon]) -> [Real; 6] {
    let mut bounds = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        -Real::MAX,
        -Real::MAX,
        -Real::MAX,
    ];
    for polygon in polygons {
        for vertex in &polygon.vertices {
            bounds[0] = bounds[0].min(vertex.x);
            bounds[1] = bounds[1].min(vertex.y);
            bounds[2] = bounds[2].min(vertex.z);
            bounds[3] = bounds[3].max(vertex.x);
            bounds[4] = bounds[4].max(vertex.y);
            bounds[5] = bounds[5].max(vertex.z);
        }
    }
    bounds
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Signed volume of a closed polygon soup via the divergence theorem:
/// each polygon is fanned into triangles and every triangle contributes
/// the signed volume of its tetrahedron against a reference point. The
/// reference is the first vertex of the soup, not the origin, so
/// far-from-origin solids do not cancel catastrophically.
pub fn volume(polygons: &[Polygon]) -> Real {
    let reference = match polygons.iter().find(|p| !p.vertices.is_empty()) {
        Some(polygon) => polygon.vertices[0].coords,
        None => return 0.0,
    };
    let mut total = 0.0;
    for polygon in polygons {
        if polygon.vertices.len() < 3 {
            continue;
        }
        let a = polygon.vertices[0].coords - reference;
        for i in 1..polygon.vertices.len() - 1 {
            let b = polygon.vertices[i].coords - reference;
            let c = polygon.vertices[i + 1].coords - reference;
            total += a.dot(&b.cross(&c));
        }
    }
    total / 6.0
}

fn ray_hits_triangle(
    origin: &Point3<Real>,
    direction: &Vector3<Real>,
    a: &Point3<Real>,
    b: &Point3<Real>,
    c: &Point3<Real>,
) -> bool {
    // Möller–Trumbore.
    let edge1 = b - a;
    let edge2 = c - a;
    let p = direction.cross(&edge2);
    let det = edge1.dot(&p);
    if det.abs() < 1e-12 {
        return false;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return false;
    }
    let q = s.cross(&edge1);
    let v = direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return false;
    }
    edge2.dot(&q) * inv_det > 1e-9
}

/// Ray-parity containment test against a closed polygon soup. The probe
/// direction is deliberately generic so samples away from faces do not
/// graze edges.
pub fn contains_point(polygons: &[Polygon], point: &Point3<Real>) -> bool {
    let direction = Vector3::new(0.5377, 0.3419, 0.7687).normalize();
    let mut crossings = 0usize;
    for polygon in polygons {
        if polygon.vertices.len() < 3 {
            continue;
        }
        let a = polygon.vertices[0];
        for i in 1..polygon.vertices.len() - 1 {
            let b = polygon.vertices[i];
            let c = polygon.vertices[i + 1];
            if ray_hits_triangle(point, &direction, &a, &b, &c) {
                crossings += 1;
            }
        }
    }
    crossings % 2 == 1
}
