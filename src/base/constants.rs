use nalgebra::RealField;

/// Defines the value of √J2 below which the deviatoric stress is regarded as zero
///
/// The gradient of √J2 is undefined at the hydrostatic axis, thus the flow directions
/// drop the deviatoric term when √J2 falls below this threshold.
pub const SQRT_J2_SINGULAR: f64 = 1e-15;

/// Converts a f64 literal into the working scalar type
#[inline]
pub fn real<T: RealField + Copy>(value: f64) -> T {
    nalgebra::convert(value)
}
