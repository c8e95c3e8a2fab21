//! Mesh-level adapter: the narrow surface the building-model geometry
//! generator drives.
//!
//! Wraps per-mesh CSG into batched per-list operations, applies styles
//! and affine transforms, and pre-conditions operands numerically
//! (center-and-scale into a unit box) before every Boolean step. A
//! failed step is logged and skipped, leaving the accumulator
//! unchanged, so one degenerate operand cannot abort a bulk run.
//!
//! Ingested meshes must carry consistent outward windings across their
//! polygons; the triangulator guarantees consistency only within one
//! loop.

pub mod style;

pub use style::{Style, StyleKind};

use crate::csg::{self, Polygon};
use crate::errors::CsgError;
use crate::float_types::{tolerance, Real};
use nalgebra::{Matrix4, Point3, Vector3};

pub use crate::triangulate::triangulate;

/// A polygon soup with one packed ARGB color; zero means unstyled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub polygons: Vec<Polygon>,
    pub color: u32,
}

/// An open vertex chain with one packed ARGB color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point3<Real>>,
    pub color: u32,
}

/// A domain-model object together with the geometry generated for it.
/// `S` is the opaque model reference; it is never inspected here.
#[derive(Debug, Clone)]
pub struct Entity<S> {
    pub object: S,
    pub meshes: Vec<Mesh>,
    pub polylines: Vec<Polyline>,
}

/// Build a triangle polygon from a vertex buffer and exactly three
/// indices. Any other index count returns the empty polygon — a
/// degenerate result beats aborting a bulk operation. Out-of-range
/// indices are programmer errors and panic.
pub fn create_polygon(vertices: &[Point3<Real>], indices: &[usize]) -> Polygon {
    if indices.len() != 3 {
        return Polygon::empty();
    }
    Polygon::new(vec![
        vertices[indices[0]],
        vertices[indices[1]],
        vertices[indices[2]],
    ])
}

pub fn create_mesh(polygons: Vec<Polygon>) -> Mesh {
    Mesh { polygons, color: 0 }
}

pub fn create_polyline(points: Vec<Point3<Real>>) -> Polyline {
    Polyline { points, color: 0 }
}

pub fn create_entity<S>(object: S, meshes: Vec<Mesh>, polylines: Vec<Polyline>) -> Entity<S> {
    Entity {
        object,
        meshes,
        polylines,
    }
}

fn point_is_finite(point: &Point3<Real>) -> bool {
    point.x.is_finite() && point.y.is_finite() && point.z.is_finite()
}

fn polygon_is_valid(polygon: &Polygon) -> bool {
    polygon.vertices.len() >= 3
        && polygon.vertices.iter().all(point_is_finite)
        && polygon.plane.is_valid()
}

/// Re-derive a polygon's plane from its (possibly moved) vertices.
fn rebuild_polygon(polygon: &mut Polygon) {
    *polygon = Polygon::new(std::mem::take(&mut polygon.vertices));
}

/// Apply an affine transform to every mesh vertex, recompute the
/// supporting planes, and drop polygons the transform degenerated.
pub fn transform_meshes(meshes: &mut [Mesh], matrix: &Matrix4<Real>) {
    for mesh in meshes.iter_mut() {
        for polygon in &mut mesh.polygons {
            for vertex in &mut polygon.vertices {
                *vertex = matrix.transform_point(vertex);
            }
            rebuild_polygon(polygon);
        }
        mesh.polygons.retain(polygon_is_valid);
    }
}

/// Apply an affine transform to every polyline point.
pub fn transform_polylines(polylines: &mut [Polyline], matrix: &Matrix4<Real>) {
    for polyline in polylines.iter_mut() {
        for point in &mut polyline.points {
            *point = matrix.transform_point(point);
        }
    }
}

/// Color every still-unstyled mesh with the first surface-tagged style.
pub fn apply_mesh_styles(meshes: &mut [Mesh], styles: &[Style]) {
    let Some(style) = styles.iter().find(|style| style.is_surface()) else {
        return;
    };
    let color = style.packed_color();
    for mesh in meshes.iter_mut() {
        if mesh.color == 0 {
            mesh.color = color;
        }
    }
}

/// Color every still-unstyled polyline with the first curve-tagged style.
pub fn apply_polyline_styles(polylines: &mut [Polyline], styles: &[Style]) {
    let Some(style) = styles.iter().find(|style| style.kind == StyleKind::Curve) else {
        return;
    };
    let color = style.packed_color();
    for polyline in polylines.iter_mut() {
        if polyline.color == 0 {
            polyline.color = color;
        }
    }
}

/// Affine pre-conditioning for one Boolean step: translate the combined
/// operand bounding box to the origin and scale it into a cube of edge
/// 2, so the tolerance band stays meaningful for operands far from the
/// origin or much larger than the band.
struct Normalization {
    center: Vector3<Real>,
    scale: Real,
}

impl Normalization {
    fn fit(a: &[Polygon], b: &[Polygon]) -> Self {
        let mut min = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut max = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for polygon in a.iter().chain(b) {
            for vertex in &polygon.vertices {
                min.x = min.x.min(vertex.x);
                min.y = min.y.min(vertex.y);
                min.z = min.z.min(vertex.z);
                max.x = max.x.max(vertex.x);
                max.y = max.y.max(vertex.y);
                max.z = max.z.max(vertex.z);
            }
        }
        if min.x > max.x {
            // No vertices at all.
            return Normalization {
                center: Vector3::zeros(),
                scale: 1.0,
            };
        }
        let center = (min.coords + max.coords) * 0.5;
        let extent = (max.x - min.x).max(max.y - min.y).max(max.z - min.z);
        let scale = if extent > tolerance() {
            2.0 / extent
        } else {
            1.0
        };
        Normalization { center, scale }
    }

    fn apply(&self, polygons: &mut [Polygon]) {
        for polygon in polygons.iter_mut() {
            for vertex in &mut polygon.vertices {
                *vertex = Point3::from((vertex.coords - self.center) * self.scale);
            }
            rebuild_polygon(polygon);
        }
    }

    fn restore(&self, polygons: &mut [Polygon]) {
        let inverse = 1.0 / self.scale;
        for polygon in polygons.iter_mut() {
            for vertex in &mut polygon.vertices {
                *vertex = Point3::from(vertex.coords * inverse + self.center);
            }
            rebuild_polygon(polygon);
        }
    }
}

/// Run one Boolean step under normalization and undo the affine on the
/// result.
fn normalized_op(
    op: fn(&[Polygon], &[Polygon]) -> Result<Vec<Polygon>, CsgError>,
    a: &[Polygon],
    b: &[Polygon],
) -> Result<Vec<Polygon>, CsgError> {
    let normalization = Normalization::fit(a, b);
    let mut left = a.to_vec();
    let mut right = b.to_vec();
    normalization.apply(&mut left);
    normalization.apply(&mut right);
    let mut result = op(&left, &right)?;
    normalization.restore(&mut result);
    Ok(result)
}

fn drop_empty(meshes: &mut Vec<Mesh>) {
    meshes.retain(|mesh| !mesh.polygons.is_empty());
}

/// Union of two mesh lists, folded into a single mesh that inherits the
/// color of the first non-empty left mesh. With an empty left list the
/// right list is returned unchanged.
pub fn compute_union(mut left: Vec<Mesh>, mut right: Vec<Mesh>) -> Vec<Mesh> {
    drop_empty(&mut left);
    drop_empty(&mut right);
    if left.is_empty() {
        return right;
    }

    let mut result = left.remove(0);
    for operand in left.iter().chain(right.iter()) {
        match normalized_op(csg::union, &result.polygons, &operand.polygons) {
            Ok(polygons) => result.polygons = polygons,
            Err(error) => log::warn!("union step failed, skipping operand: {error}"),
        }
    }
    vec![result]
}

/// Intersect every left mesh with the accumulated union of the right
/// list. Empty results are dropped; survivors keep their own color.
pub fn compute_intersection(mut left: Vec<Mesh>, mut right: Vec<Mesh>) -> Vec<Mesh> {
    drop_empty(&mut left);
    drop_empty(&mut right);
    if left.is_empty() || right.is_empty() {
        return Vec::new();
    }

    // The right operand is shared by every left mesh; accumulate it once.
    let mut accumulated = right.remove(0).polygons;
    for operand in &right {
        match normalized_op(csg::union, &accumulated, &operand.polygons) {
            Ok(polygons) => accumulated = polygons,
            Err(error) => log::warn!("right-operand union failed, skipping operand: {error}"),
        }
    }

    for mesh in &mut left {
        match normalized_op(csg::intersection, &mesh.polygons, &accumulated) {
            Ok(polygons) => mesh.polygons = polygons,
            Err(error) => log::warn!("intersection step failed, keeping operand: {error}"),
        }
    }
    drop_empty(&mut left);
    left
}

/// Subtract every right mesh from every left mesh, sequentially. Empty
/// results are dropped; survivors keep their own color.
pub fn compute_difference(mut left: Vec<Mesh>, mut right: Vec<Mesh>) -> Vec<Mesh> {
    drop_empty(&mut left);
    drop_empty(&mut right);
    if left.is_empty() || right.is_empty() {
        return left;
    }

    for mesh in &mut left {
        for operand in &right {
            match normalized_op(csg::difference, &mesh.polygons, &operand.polygons) {
                Ok(polygons) => mesh.polygons = polygons,
                Err(error) => log::warn!("difference step failed, keeping operand: {error}"),
            }
        }
    }
    drop_empty(&mut left);
    left
}
