//! Device rotation from gravity and geomagnetic vectors
//!
//! Builds an orthonormal East-North-Up basis expressed in device coordinates:
//! `east = field × gravity`, `north = gravity × east`, `up = gravity`. The
//! three unit vectors form the rows of the rotation matrix, so multiplying a
//! device-frame vector by it yields world coordinates.
//!
//! # Example
//! ```
//! use nalgebra::{Matrix3, Vector3};
//! use qibla_compass::rotation::rotation_matrix;
//!
//! // Device lying flat, top edge pointing north
//! let gravity = Vector3::new(0.0, 0.0, 9.81);
//! let field = Vector3::new(0.0, 30.0, -40.0);
//!
//! let rotation = rotation_matrix(gravity, field).unwrap();
//! assert!((rotation.matrix - Matrix3::identity()).norm() < 1e-6);
//! ```

use core::fmt;

use nalgebra::{ComplexField, Matrix3, RealField, Vector3};

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Squared gravity magnitude below which the device is considered in free fall
///
/// 10% of standard gravity, squared.
const FREE_FALL_GRAVITY_SQUARED: f32 = 0.01 * STANDARD_GRAVITY * STANDARD_GRAVITY;

/// Minimum magnitude of `field × gravity` for a usable horizontal field
const MIN_HORIZONTAL_FIELD: f32 = 0.1;

/// Reasons a rotation matrix cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotationError {
    /// Gravity vector shorter than 10% of standard gravity (includes the zero vector)
    FreeFall,
    /// Magnetic field is zero or parallel to gravity, leaving no horizontal component
    DegenerateField,
    /// A reading is NaN or infinite, or large enough to overflow the computation
    NonFinite,
}

impl RotationError {
    /// Return variant name as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationError::FreeFall => "FreeFall",
            RotationError::DegenerateField => "DegenerateField",
            RotationError::NonFinite => "NonFinite",
        }
    }
}

impl fmt::Display for RotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationError::FreeFall => write!(f, "gravity too weak to define the vertical axis"),
            RotationError::DegenerateField => {
                write!(f, "magnetic field has no component perpendicular to gravity")
            }
            RotationError::NonFinite => write!(f, "sensor reading is not finite"),
        }
    }
}

/// Rotation and inclination matrices derived from one gravity/field pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceRotation {
    /// Device to world (East, North, Up) rotation, one basis vector per row
    pub matrix: Matrix3<f32>,
    /// Rotation of the magnetic field vector into the horizontal plane
    pub inclination: Matrix3<f32>,
}

impl DeviceRotation {
    /// Magnetic inclination (dip angle) in radians
    ///
    /// Negative when the field points below the horizon, as it does in the
    /// northern hemisphere.
    pub fn inclination_angle(&self) -> f32 {
        RealField::atan2(self.inclination[(1, 2)], self.inclination[(1, 1)])
    }
}

/// Compute the device rotation matrix from gravity and geomagnetic vectors
///
/// # Arguments
/// * `gravity` - Accelerometer reading with the device at rest (m/s²)
/// * `geomagnetic` - Magnetometer reading (µT)
///
/// # Errors
/// Returns [`RotationError::FreeFall`] when gravity is too weak and
/// [`RotationError::DegenerateField`] when the field has no horizontal component.
/// NaN, infinite or overflowing readings give [`RotationError::NonFinite`].
pub fn rotation_matrix(
    gravity: Vector3<f32>,
    geomagnetic: Vector3<f32>,
) -> Result<DeviceRotation, RotationError> {
    let gravity_squared = gravity.magnitude_squared();
    if !gravity_squared.is_finite() {
        return Err(RotationError::NonFinite);
    }
    if gravity_squared < FREE_FALL_GRAVITY_SQUARED {
        return Err(RotationError::FreeFall);
    }

    // East: field × gravity
    let east = geomagnetic.cross(&gravity);
    let east_norm = ComplexField::sqrt(east.magnitude_squared());
    if !east_norm.is_finite() {
        return Err(RotationError::NonFinite);
    }
    if east_norm < MIN_HORIZONTAL_FIELD {
        return Err(RotationError::DegenerateField);
    }

    let east = east / east_norm;
    let up = gravity / ComplexField::sqrt(gravity_squared);

    // North: up × east
    let north = up.cross(&east);

    let matrix = Matrix3::from_rows(&[east.transpose(), north.transpose(), up.transpose()]);

    let field_reciprocal = 1.0 / ComplexField::sqrt(geomagnetic.magnitude_squared());
    let cos = geomagnetic.dot(&north) * field_reciprocal;
    let sin = geomagnetic.dot(&up) * field_reciprocal;

    #[rustfmt::skip]
    let inclination = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cos, sin,
        0.0, -sin, cos,
    );

    Ok(DeviceRotation {
        matrix,
        inclination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_flat_device_facing_north() {
        let gravity = Vector3::new(0.0, 0.0, 9.81);
        let field = Vector3::new(0.0, 30.0, -40.0);

        let rotation = rotation_matrix(gravity, field).unwrap();
        assert!((rotation.matrix - Matrix3::identity()).norm() < EPSILON);

        // Field dips 53.13° below the horizon (atan(40/30))
        let dip = rotation.inclination_angle() * crate::math::RAD_TO_DEG;
        assert!((dip + 53.130_1).abs() < 1e-3, "dip {}", dip);
    }

    #[test]
    fn test_flat_device_facing_east() {
        // Top edge east: magnetic north lies along device -X
        let gravity = Vector3::new(0.0, 0.0, 9.81);
        let field = Vector3::new(-30.0, 0.0, -40.0);

        let rotation = rotation_matrix(gravity, field).unwrap();
        let device_y_in_world = rotation.matrix * Vector3::y();

        assert!((device_y_in_world - Vector3::x()).norm() < EPSILON);
    }

    #[test]
    fn test_matrix_is_orthonormal() {
        let gravity = Vector3::new(1.2, -3.4, 8.9);
        let field = Vector3::new(12.0, 25.0, -38.0);

        let r = rotation_matrix(gravity, field).unwrap().matrix;
        assert!((r * r.transpose() - Matrix3::identity()).norm() < EPSILON);
        assert!((r.determinant() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_inputs_fail() {
        let gravity = Vector3::new(0.0, 0.0, 9.81);
        let field = Vector3::new(0.0, 30.0, -40.0);

        assert_eq!(
            rotation_matrix(Vector3::zeros(), Vector3::zeros()),
            Err(RotationError::FreeFall)
        );
        assert_eq!(
            rotation_matrix(Vector3::zeros(), field),
            Err(RotationError::FreeFall)
        );
        assert_eq!(
            rotation_matrix(gravity, Vector3::zeros()),
            Err(RotationError::DegenerateField)
        );
    }

    #[test]
    fn test_parallel_inputs_fail() {
        let gravity = Vector3::new(0.0, 0.0, 9.81);
        let field = Vector3::new(0.0, 0.0, -45.0);

        assert_eq!(
            rotation_matrix(gravity, field),
            Err(RotationError::DegenerateField)
        );
    }

    #[test]
    fn test_free_fall_threshold() {
        let field = Vector3::new(0.0, 30.0, -40.0);

        assert!(rotation_matrix(Vector3::new(0.0, 0.0, 0.9), field).is_err());
        assert!(rotation_matrix(Vector3::new(0.0, 0.0, 1.0), field).is_ok());
    }

    #[test]
    fn test_non_finite_inputs_fail() {
        let gravity = Vector3::new(0.0, 0.0, 9.81);
        let field = Vector3::new(0.0, 30.0, -40.0);

        let cases = [
            (gravity, Vector3::new(f32::NAN, 30.0, -40.0)),
            (Vector3::new(0.0, f32::NAN, 9.81), field),
            (Vector3::new(0.0, 0.0, f32::INFINITY), field),
            (gravity, Vector3::new(0.0, f32::NEG_INFINITY, -40.0)),
            // Finite, but the squared magnitudes overflow f32
            (Vector3::new(0.0, 0.0, 1e20), Vector3::new(0.0, 1e20, -1e20)),
            (gravity, Vector3::new(0.0, 1e38, -1e38)),
        ];

        for (gravity, field) in cases {
            assert_eq!(
                rotation_matrix(gravity, field),
                Err(RotationError::NonFinite),
                "gravity {:?} field {:?}",
                gravity,
                field
            );
        }
    }

    #[test]
    fn test_error_names() {
        assert_eq!(RotationError::FreeFall.as_str(), "FreeFall");
        assert_eq!(RotationError::DegenerateField.as_str(), "DegenerateField");
        assert_eq!(RotationError::NonFinite.as_str(), "NonFinite");
    }
}
