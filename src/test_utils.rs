// src/test_utils.rs

//! This module contains utilities for testing.

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f64 = 1e-9;

/// A constant defining the relative tolerance used for values that span
/// several orders of magnitude, such as synthesized gains.
pub const RELATIVE_TOLERANCE: f64 = 1e-6;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` is less than
/// `TEST_TOLERANCE`, otherwise `false`.
pub fn value_close(target: f64, value: f64) -> bool {
    (target - value).abs() < TEST_TOLERANCE
}

/// Checks if two floating point numbers agree to within
/// `RELATIVE_TOLERANCE` of the target.
pub fn relative_close(target: f64, value: f64) -> bool {
    (target - value).abs() <= RELATIVE_TOLERANCE * target.abs()
}

/// Checks if both components of a roll/pitch pair are close enough to
/// be considered equal.
///
/// # Arguments
/// * `target` - The target pair as a tuple of two `f64` values.
/// * `value` - The pair to compare against the target.
///
/// # Returns
/// `true` if each component of `target` and `value` is close as per `value_close`,
/// otherwise `false`.
pub fn vector_close(target: (f64, f64), value: (f64, f64)) -> bool {
    value_close(target.0, value.0) && value_close(target.1, value.1)
}
