//! Boolean operations on building-model meshes.
//!
//! The core is a BSP-tree CSG engine over polygon soups
//! ([`csg::union`], [`csg::intersection`], [`csg::difference`]) with an
//! ear-clipping triangulator for planar 3-D loops ([`triangulate`]).
//! Around it sits a mesh adapter ([`adapter`]) that carries colors and
//! styles, applies affine transforms, and batches the Boolean
//! operations over mesh lists with per-operation numerical
//! pre-conditioning.
//!
//! Every tree-walking operation is linearized through explicit work
//! queues: building-geometry inputs routinely produce BSP trees deeper
//! than default stack limits.

#![forbid(unsafe_code)]

pub mod adapter;
pub mod csg;
pub mod errors;
pub mod float_types;
pub mod shapes;
pub mod triangulate;

pub use csg::{Node, Plane, Polygon};
pub use errors::CsgError;
pub use float_types::{set_tolerance, tolerance, Real};
