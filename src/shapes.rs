//! Solid generators used by tests and demos.

use crate::csg::polygon::Polygon;
use crate::float_types::Real;
use nalgebra::Point3;

/// The six quad faces of an axis-aligned box spanning `min..max`, wound
/// with outward normals.
pub fn cuboid(min: Point3<Real>, max: Point3<Real>) -> Vec<Polygon> {
    let p = Point3::new;
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);
    vec![
        // -x
        Polygon::new(vec![
            p(x0, y0, z0),
            p(x0, y0, z1),
            p(x0, y1, z1),
            p(x0, y1, z0),
        ]),
        // +x
        Polygon::new(vec![
            p(x1, y0, z0),
            p(x1, y1, z0),
            p(x1, y1, z1),
            p(x1, y0, z1),
        ]),
        // -y
        Polygon::new(vec![
            p(x0, y0, z0),
            p(x1, y0, z0),
            p(x1, y0, z1),
            p(x0, y0, z1),
        ]),
        // +y
        Polygon::new(vec![
            p(x0, y1, z0),
            p(x0, y1, z1),
            p(x1, y1, z1),
            p(x1, y1, z0),
        ]),
        // -z
        Polygon::new(vec![
            p(x0, y0, z0),
            p(x0, y1, z0),
            p(x1, y1, z0),
            p(x1, y0, z0),
        ]),
        // +z
        Polygon::new(vec![
            p(x0, y0, z1),
            p(x1, y0, z1),
            p(x1, y1, z1),
            p(x0, y1, z1),
        ]),
    ]
}

/// Axis-aligned unit cube spanning the origin to (1, 1, 1).
pub fn unit_cube() -> Vec<Polygon> {
    cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
}
