use crate::float_types::Real;
use nalgebra::Point3;

/// Ways a Boolean operation can reject or lose its operands.
///
/// These never cross the adapter boundary: the batched operations in
/// [`crate::adapter`] catch them and continue with the accumulator
/// unchanged.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum CsgError {
    /// An operand polygon has fewer than three vertices.
    #[error("operand polygon has {0} vertices, expected at least 3")]
    TooFewVertices(usize),
    /// A vertex coordinate is NaN or infinite.
    #[error("vertex ({}) has a non-finite coordinate", .0)]
    NonFiniteVertex(Point3<Real>),
    /// An operand polygon's supporting plane has a zero-length normal.
    #[error("operand polygon has a degenerate supporting plane")]
    DegeneratePlane,
}
