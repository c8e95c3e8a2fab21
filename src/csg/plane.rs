//! Oriented plane with tolerance-aware classification, and the polygon
//! splitter every BSP operation is built on.

use crate::csg::polygon::Polygon;
use crate::float_types::{approx_eq, tolerance, Real};
use nalgebra::{Point3, Vector3};

/// Point/polygon classifications. They are bit flags: OR-ing the
/// per-vertex values of a polygon yields the polygon classification,
/// with `FRONT | BACK == SPANNING`.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Tolerance equality for points: every component differs by less than ε.
#[inline]
pub fn points_approx_eq(a: &Point3<Real>, b: &Point3<Real>) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

#[inline]
fn vectors_approx_eq(a: &Vector3<Real>, b: &Vector3<Real>) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

/// An oriented plane `{p : n·p = w}` with unit normal `n` and signed
/// offset `w`. The zero-normal plane is the *invalid* plane, used for
/// degenerate polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<Real>,
    offset: Real,
}

impl Plane {
    /// Plane through three ordered points, oriented by their winding.
    /// Collinear or non-finite input yields the invalid plane.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Self {
        let cross = (b - a).cross(&(c - a));
        let length_squared = cross.norm_squared();
        if !length_squared.is_finite() || length_squared < 1e-12 {
            return Self::invalid();
        }
        let normal = cross / length_squared.sqrt();
        Plane {
            normal,
            offset: normal.dot(&a.coords),
        }
    }

    /// Plane from an already-unit normal and signed offset.
    pub const fn from_normal(normal: Vector3<Real>, offset: Real) -> Self {
        Plane { normal, offset }
    }

    /// The degenerate plane: zero normal, zero offset.
    pub const fn invalid() -> Self {
        Plane {
            normal: Vector3::new(0.0, 0.0, 0.0),
            offset: 0.0,
        }
    }

    #[inline]
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    #[inline]
    pub const fn offset(&self) -> Real {
        self.offset
    }

    /// A plane is valid iff its normal is non-degenerate.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.normal.norm_squared() > 0.0
    }

    /// Reverse the plane's orientation.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }

    /// Classify a point: [`BACK`] if `n·p − w < −ε`, [`FRONT`] if `> ε`,
    /// [`COPLANAR`] otherwise.
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let eps = tolerance();
        let t = self.normal.dot(&point.coords) - self.offset;
        if t < -eps {
            BACK
        } else if t > eps {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// True when `other` is the same plane with the same orientation.
    #[inline]
    pub fn is_coplanar_with(&self, other: &Plane) -> bool {
        vectors_approx_eq(&self.normal, &other.normal) && approx_eq(self.offset, other.offset)
    }

    /// True when `other` is the same plane with the opposite orientation.
    #[inline]
    pub fn is_opposite_of(&self, other: &Plane) -> bool {
        vectors_approx_eq(&self.normal, &(-other.normal)) && approx_eq(self.offset, -other.offset)
    }

    /// Split `polygon` by this plane into four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// A polygon whose own supporting plane matches this plane (in
    /// either orientation) is treated as coplanar regardless of
    /// per-vertex drift, and routed front or back by the sign of the
    /// normal dot product. A spanning polygon is cut along the plane,
    /// with new vertices at the edge crossings; fragments keep the
    /// parent polygon's plane and are only emitted with at least three
    /// vertices.
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
    ) -> (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|vertex| self.orient_point(vertex))
            .collect();
        let mut polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        if self.is_coplanar_with(&polygon.plane) || self.is_opposite_of(&polygon.plane) {
            polygon_type = COPLANAR;
        }

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal()) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let count = polygon.vertices.len();
                let mut front_loop: Vec<Point3<Real>> = Vec::with_capacity(count + 1);
                let mut back_loop: Vec<Point3<Real>> = Vec::with_capacity(count + 1);

                for i in 0..count {
                    let j = (i + 1) % count;
                    let vi = polygon.vertices[i];
                    let vj = polygon.vertices[j];
                    let ti = types[i];
                    let tj = types[j];

                    if ti != BACK {
                        front_loop.push(vi);
                    }
                    if ti != FRONT {
                        back_loop.push(vi);
                    }
                    if (ti | tj) == SPANNING {
                        let t = (self.offset - self.normal.dot(&vi.coords))
                            / self.normal.dot(&(vj - vi));
                        let crossing = vi + (vj - vi) * t;
                        // Suppress crossings that coincide with the vertex
                        // just pushed; collinear runs would otherwise
                        // duplicate it.
                        if front_loop
                            .last()
                            .map_or(true, |last| !points_approx_eq(last, &crossing))
                        {
                            front_loop.push(crossing);
                        }
                        if back_loop
                            .last()
                            .map_or(true, |last| !points_approx_eq(last, &crossing))
                        {
                            back_loop.push(crossing);
                        }
                    }
                }

                if front_loop.len() >= 3 {
                    front.push(Polygon::with_plane(front_loop, polygon.plane));
                }
                if back_loop.len() >= 3 {
                    back.push(Polygon::with_plane(back_loop, polygon.plane));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
