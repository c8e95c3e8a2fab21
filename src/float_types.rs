use core::str::FromStr;
use std::sync::OnceLock;

/// Scalar type used throughout the crate.
pub type Real = f64;

/// Lazily-initialized geometric tolerance ε used across the crate.
/// Defaults to `1e-4`, but can be overridden:
///  1) **Build-time**: set env var `BIMCSG_TOLERANCE` (e.g. `BIMCSG_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
///
/// Once read the value never changes, so every side classification made
/// during a single Boolean operation sees the same band.
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

const DEFAULT_TOLERANCE: Real = 1e-4;

/// Returns the current tolerance ε.
/// If not set yet, it tries `BIMCSG_TOLERANCE` and falls back to the default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("BIMCSG_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        DEFAULT_TOLERANCE
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `bimcsg::float_types::set_tolerance(1e-6);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Tolerance comparison for scalars: `|a − b| < ε`.
#[inline]
pub fn approx_eq(a: Real, b: Real) -> bool {
    (a - b).abs() < tolerance()
}
