//! Constructive Solid Geometry over polygon sets.
//!
//! The Boolean operators are the classic BSP formulation: clip each
//! tree against the other so only the polygons outside the opposite
//! solid survive, using inversion to reach the pieces that a plain clip
//! keeps (clipping discards *inside* fragments, so clipping an inverted
//! tree discards *outside* ones). Difference and intersection are the
//! union of inverted operands, un-inverted at the end.

pub mod bsp;
pub mod plane;
pub mod polygon;

pub use bsp::Node;
pub use plane::{Plane, BACK, COPLANAR, FRONT, SPANNING};
pub use polygon::Polygon;

use crate::errors::CsgError;

/// In-place union: `a` becomes `a ∪ b`.
pub fn union_into(a: &mut Node, b: &Node) {
    if a.is_empty() {
        *a = b.clone();
        return;
    }
    if b.is_empty() {
        return;
    }
    let mut b = b.clone();
    a.clip_to(&b);
    b.clip_to(a);
    b.invert();
    b.clip_to(a);
    b.invert();
    a.build(&b.all_polygons());
}

/// In-place difference: `a` becomes `a − b`. The two outer inversions
/// turn the subtraction into a union in inverted space.
pub fn difference_into(a: &mut Node, b: &Node) {
    if a.is_empty() || b.is_empty() {
        return;
    }
    let mut b = b.clone();
    a.invert();
    a.clip_to(&b);
    b.clip_to(a);
    b.invert();
    b.clip_to(a);
    b.invert();
    a.build(&b.all_polygons());
    a.invert();
}

/// In-place intersection: `a` becomes `a ∩ b`, via De Morgan
/// (`a ∩ b = ¬(¬a ∪ ¬b)`).
pub fn intersection_into(a: &mut Node, b: &Node) {
    if a.is_empty() || b.is_empty() {
        a.clear();
        return;
    }
    let mut b = b.clone();
    a.invert();
    b.clip_to(a);
    b.invert();
    a.clip_to(&b);
    b.clip_to(a);
    a.build(&b.all_polygons());
    a.invert();
}

fn validate(polygons: &[Polygon]) -> Result<(), CsgError> {
    for polygon in polygons {
        if polygon.vertices.len() < 3 {
            return Err(CsgError::TooFewVertices(polygon.vertices.len()));
        }
        for vertex in &polygon.vertices {
            if !(vertex.x.is_finite() && vertex.y.is_finite() && vertex.z.is_finite()) {
                return Err(CsgError::NonFiniteVertex(*vertex));
            }
        }
        if !polygon.plane.is_valid() {
            return Err(CsgError::DegeneratePlane);
        }
    }
    Ok(())
}

/// Union of two closed polygon sets.
pub fn union(a: &[Polygon], b: &[Polygon]) -> Result<Vec<Polygon>, CsgError> {
    validate(a)?;
    validate(b)?;
    let mut node_a = Node::from_polygons(a);
    let node_b = Node::from_polygons(b);
    union_into(&mut node_a, &node_b);
    Ok(node_a.all_polygons())
}

/// Intersection of two closed polygon sets.
pub fn intersection(a: &[Polygon], b: &[Polygon]) -> Result<Vec<Polygon>, CsgError> {
    validate(a)?;
    validate(b)?;
    let mut node_a = Node::from_polygons(a);
    let node_b = Node::from_polygons(b);
    intersection_into(&mut node_a, &node_b);
    Ok(node_a.all_polygons())
}

/// Difference of two closed polygon sets (`a − b`).
pub fn difference(a: &[Polygon], b: &[Polygon]) -> Result<Vec<Polygon>, CsgError> {
    validate(a)?;
    validate(b)?;
    let mut node_a = Node::from_polygons(a);
    let node_b = Node::from_polygons(b);
    difference_into(&mut node_a, &node_b);
    Ok(node_a.all_polygons())
}

/// Symmetric difference, composed as `(a − b) ∪ (b − a)`.
pub fn xor(a: &[Polygon], b: &[Polygon]) -> Result<Vec<Polygon>, CsgError> {
    let a_minus_b = difference(a, b)?;
    let b_minus_a = difference(b, a)?;
    union(&a_minus_b, &b_minus_a)
}
