//! Azimuth, pitch and roll decomposition of a device rotation matrix

use nalgebra::{ComplexField, Matrix3, RealField};

use crate::math::RAD_TO_DEG;

/// Device orientation angles in radians
///
/// Decomposed from a row-major East-North-Up rotation matrix:
/// - `azimuth`: angle from magnetic north to the projection of the device Y
///   axis on the horizontal plane, clockwise seen from above, in `[-π, π]`
/// - `pitch`: rotation about the device X axis, in `[-π/2, π/2]`
/// - `roll`: rotation about the device Y axis, in `[-π, π]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrientationAngles {
    pub azimuth: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl OrientationAngles {
    /// Decompose a rotation matrix into orientation angles
    ///
    /// # Example
    /// ```
    /// use nalgebra::Matrix3;
    /// use qibla_compass::OrientationAngles;
    ///
    /// let angles = OrientationAngles::from_rotation(&Matrix3::identity());
    /// assert_eq!(angles.azimuth, 0.0);
    /// assert_eq!(angles.pitch, 0.0);
    /// ```
    pub fn from_rotation(rotation: &Matrix3<f32>) -> Self {
        let azimuth = RealField::atan2(rotation[(0, 1)], rotation[(1, 1)]);
        // Clamp guards asin against rounding just past ±1
        let pitch = ComplexField::asin((-rotation[(2, 1)]).clamp(-1.0, 1.0));
        let roll = RealField::atan2(-rotation[(2, 0)], rotation[(2, 2)]);

        Self {
            azimuth,
            pitch,
            roll,
        }
    }

    /// Azimuth in degrees
    pub fn azimuth_degrees(&self) -> f32 {
        self.azimuth * RAD_TO_DEG
    }

    /// All three angles converted to degrees
    pub fn to_degrees(&self) -> Self {
        Self {
            azimuth: self.azimuth * RAD_TO_DEG,
            pitch: self.pitch * RAD_TO_DEG,
            roll: self.roll * RAD_TO_DEG,
        }
    }
}
