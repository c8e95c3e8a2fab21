//! BSP tree over polygon sets.
//!
//! Building-geometry inputs routinely produce trees deeper than default
//! stack limits, so every tree walk here — construction, clipping,
//! inversion, flattening, cloning and teardown — drains an explicit work
//! container instead of recursing. That is a correctness property of
//! this module, not an optimization.

use crate::csg::plane::Plane;
use crate::csg::polygon::Polygon;
use crate::float_types::Real;
use nalgebra::Point3;
use std::collections::VecDeque;

/// A BSP node: a splitting plane, the polygons coplanar with it, and
/// optional subtrees for the positive and negative half-spaces.
#[derive(Debug, Default)]
pub struct Node {
    /// Splitting plane, or `None` for a leaf that has not been built yet.
    pub plane: Option<Plane>,
    /// Subtree in the plane's positive half-space.
    pub front: Option<Box<Node>>,
    /// Subtree in the plane's negative half-space.
    pub back: Option<Box<Node>>,
    /// Polygons lying on `plane`.
    pub polygons: Vec<Polygon>,
}

impl Node {
    /// Create a new empty BSP node.
    pub const fn new() -> Self {
        Node {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// Build a tree from a polygon list.
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Node::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// True for a node with no children and no polygons.
    pub fn is_empty(&self) -> bool {
        self.front.is_none() && self.back.is_none() && self.polygons.is_empty()
    }

    /// Drop both subtrees and the polygon list, leaving an unbuilt leaf.
    pub fn clear(&mut self) {
        self.front = None;
        self.back = None;
        self.polygons = Vec::new();
        self.plane = None;
    }

    /// Insert `polygons` into the tree. A node without a plane picks one
    /// first via the farthest-from-center heuristic; coplanar fragments
    /// stay at the node, the rest are queued for the matching child,
    /// created on demand.
    pub fn build(&mut self, polygons: &[Polygon]) {
        if polygons.is_empty() {
            return;
        }

        let mut pending: VecDeque<(&mut Node, Vec<Polygon>)> = VecDeque::new();
        pending.push_back((self, polygons.to_vec()));

        while let Some((node, list)) = pending.pop_front() {
            if node.plane.is_none() {
                node.plane = Some(pick_splitting_plane(&list));
            }
            let plane = node.plane.unwrap();

            let mut front_list = Vec::with_capacity(list.len() / 2);
            let mut back_list = Vec::with_capacity(list.len() / 2);
            for polygon in &list {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon);
                node.polygons.extend(coplanar_front);
                node.polygons.extend(coplanar_back);
                front_list.append(&mut front_parts);
                back_list.append(&mut back_parts);
            }

            if !front_list.is_empty() {
                if node.front.is_none() {
                    node.front = Some(Box::new(Node::new()));
                }
                if let Some(child) = node.front.as_deref_mut() {
                    pending.push_back((child, front_list));
                }
            }
            if !back_list.is_empty() {
                if node.back.is_none() {
                    node.back = Some(Box::new(Node::new()));
                }
                if let Some(child) = node.back.as_deref_mut() {
                    pending.push_back((child, back_list));
                }
            }
        }
    }

    /// Return the fragments of `polygons` that lie outside this tree's
    /// solid. Fragments reaching a missing front child are kept, those
    /// reaching a missing back child are inside the solid and dropped;
    /// an unbuilt leaf passes its input through unsplit.
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut pending: VecDeque<(&Node, Vec<Polygon>)> = VecDeque::new();
        pending.push_back((self, polygons.to_vec()));

        while let Some((node, list)) = pending.pop_front() {
            let Some(plane) = node.plane else {
                result.extend(list);
                continue;
            };

            let mut front_list = Vec::new();
            let mut back_list = Vec::new();
            for polygon in &list {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon);
                front_list.extend(coplanar_front);
                front_list.extend(front_parts);
                back_list.extend(coplanar_back);
                back_list.extend(back_parts);
            }

            match node.front.as_deref() {
                Some(front) => pending.push_back((front, front_list)),
                None => result.extend(front_list),
            }
            if let Some(back) = node.back.as_deref() {
                pending.push_back((back, back_list));
            }
        }

        result
    }

    /// Rewrite every polygon list in this tree to the fragments that
    /// survive clipping against `other`.
    pub fn clip_to(&mut self, other: &Node) {
        let mut pending: VecDeque<&mut Node> = VecDeque::new();
        pending.push_back(self);
        while let Some(node) = pending.pop_front() {
            node.polygons = other.clip_polygons(&node.polygons);
            if let Some(front) = node.front.as_deref_mut() {
                pending.push_back(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                pending.push_back(back);
            }
        }
    }

    /// Turn the solid inside-out: flip every polygon and plane and swap
    /// front/back at every node.
    pub fn invert(&mut self) {
        let mut pending: Vec<&mut Node> = vec![self];
        while let Some(node) = pending.pop() {
            for polygon in &mut node.polygons {
                polygon.flip();
            }
            if let Some(plane) = &mut node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
            if let Some(front) = node.front.as_deref_mut() {
                pending.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                pending.push(back);
            }
        }
    }

    /// Flatten the tree into a single polygon list.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut pending: Vec<&Node> = vec![self];
        while let Some(node) = pending.pop() {
            result.extend_from_slice(&node.polygons);
            if let Some(front) = node.front.as_deref() {
                pending.push(front);
            }
            if let Some(back) = node.back.as_deref() {
                pending.push(back);
            }
        }
        result
    }
}

impl Clone for Node {
    /// Structural copy driven by a pair queue; a derived clone would
    /// recurse to the tree depth.
    fn clone(&self) -> Self {
        let mut root = Node::new();
        let mut pending: VecDeque<(&Node, &mut Node)> = VecDeque::new();
        pending.push_back((self, &mut root));

        while let Some((source, target)) = pending.pop_front() {
            target.plane = source.plane;
            target.polygons = source.polygons.clone();
            if let Some(front) = source.front.as_deref() {
                target.front = Some(Box::new(Node::new()));
                if let Some(child) = target.front.as_deref_mut() {
                    pending.push_back((front, child));
                }
            }
            if let Some(back) = source.back.as_deref() {
                target.back = Some(Box::new(Node::new()));
                if let Some(child) = target.back.as_deref_mut() {
                    pending.push_back((back, child));
                }
            }
        }

        root
    }
}

impl Drop for Node {
    /// Detach children into a work list before they drop, keeping
    /// teardown stack usage constant in tree depth.
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = Vec::new();
        if let Some(front) = self.front.take() {
            pending.push(front);
        }
        if let Some(back) = self.back.take() {
            pending.push(back);
        }
        while let Some(mut node) = pending.pop() {
            if let Some(front) = node.front.take() {
                pending.push(front);
            }
            if let Some(back) = node.back.take() {
                pending.push(back);
            }
        }
    }
}

/// Choose the splitting plane for a fresh node: the candidate polygon
/// plane farthest from the center of the list's bounding box. A plane
/// far from the centroid tends to be a bounding face of the solid,
/// which splits the remaining set more evenly than taking the first
/// polygon.
fn pick_splitting_plane(polygons: &[Polygon]) -> Plane {
    let mut min = Point3::new(Real::MAX, Real::MAX, Real::MAX);
    let mut max = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
    for polygon in polygons {
        for vertex in &polygon.vertices {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);
            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }
    }
    let center = Point3::from((min.coords + max.coords) * 0.5);

    let mut best = polygons[0].plane;
    let mut best_distance = -Real::MAX;
    for polygon in polygons {
        let plane = polygon.plane;
        let distance = (plane.normal().dot(&center.coords) - plane.offset()).abs();
        if distance > best_distance {
            best_distance = distance;
            best = plane;
        }
    }
    best
}
