//! Angle and scalar helpers.
//!
//! All angles are in radians, counter-clockwise positive.

use std::f64::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f64 = 2.0 * PI;

/// Normalize angle to (-π, π].
///
/// # Example
/// ```
/// use ndtpso_slam::core::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-12);
/// assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
/// assert!((normalize_angle(PI / 2.0) - PI / 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TWO_PI;
    if a > PI {
        a -= TWO_PI;
    } else if a <= -PI {
        a += TWO_PI;
    }
    a
}

/// Signed shortest angular difference from `from` to `to`, in (-π, π].
#[inline]
pub fn angle_diff(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Check if two angles are within `tolerance` of each other, handling wrap-around.
#[inline]
pub fn angles_approx_equal(a: f64, b: f64, tolerance: f64) -> bool {
    angle_diff(a, b).abs() <= tolerance
}
