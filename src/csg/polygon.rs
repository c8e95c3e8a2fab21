//! Planar vertex loop with a cached supporting plane.

use crate::csg::plane::Plane;
use crate::float_types::Real;
use nalgebra::Point3;

/// An ordered loop of vertices together with its supporting plane.
///
/// The plane is cached at construction from the first three vertices;
/// the splitter maintains the invariant that every vertex lies on it
/// within tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point3<Real>>,
    pub plane: Plane,
}

impl Polygon {
    /// Build a polygon from an ordered vertex loop, computing the
    /// supporting plane from the first three vertices. Fewer than three
    /// vertices (or collinear leading vertices) leave the plane invalid.
    pub fn new(vertices: Vec<Point3<Real>>) -> Self {
        let plane = if vertices.len() >= 3 {
            Plane::from_points(&vertices[0], &vertices[1], &vertices[2])
        } else {
            Plane::invalid()
        };
        Polygon { vertices, plane }
    }

    /// Build a polygon that reuses a known supporting plane. The
    /// splitter hands fragments their parent's plane this way instead of
    /// re-deriving it from cut vertices.
    pub fn with_plane(vertices: Vec<Point3<Real>>, plane: Plane) -> Self {
        Polygon { vertices, plane }
    }

    /// The empty polygon: no vertices, invalid plane. Returned by the
    /// adapter for malformed input.
    pub fn empty() -> Self {
        Polygon {
            vertices: Vec::new(),
            plane: Plane::invalid(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Reverse the winding and flip the supporting plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }
}
