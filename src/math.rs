//! Angle constants and wrapping helpers

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Wrap an angle in degrees into `[0, 360)`
///
/// Uses a full modulo so that any offset, positive or negative, lands in range.
///
/// # Example
/// ```
/// use qibla_compass::wrap_degrees;
///
/// assert_eq!(wrap_degrees(-176.5), 183.5);
/// assert_eq!(wrap_degrees(721.0), 1.0);
/// ```
pub fn wrap_degrees(angle: f64) -> f64 {
    ((angle % 360.0) + 360.0) % 360.0
}

/// Wrap an angle in degrees into `(-180, 180]`
pub fn wrap_half_turn(angle: f32) -> f32 {
    if angle > 180.0 {
        angle - 360.0
    } else if angle <= -180.0 {
        angle + 360.0
    } else {
        angle
    }
}
