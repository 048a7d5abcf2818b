//! Heading engine: raw accelerometer and magnetometer readings to a target heading

use nalgebra::Vector3;

use crate::math::{RAD_TO_DEG, wrap_degrees, wrap_half_turn};
use crate::orientation::OrientationAngles;
use crate::rotation::rotation_matrix;
use crate::types::{HeadingResult, HeadingSettings};

/// Heading engine
///
/// Holds the most recent accelerometer and magnetometer readings, each one
/// replaced wholesale by its setter. Readings that have never been set are the
/// zero vector, which yields no heading. [`HeadingEngine::update`] is a pure
/// function of its inputs, so identical pairs always give identical results.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use qibla_compass::HeadingEngine;
///
/// let mut engine = HeadingEngine::new();
/// assert!(engine.heading().is_none()); // nothing delivered yet
///
/// engine.set_accelerometer(Vector3::new(0.0, 0.0, 9.81));
/// engine.set_magnetometer(Vector3::new(0.0, 30.0, -40.0));
///
/// let result = engine.heading().unwrap();
/// assert!((result.heading_degrees - 2.5).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingEngine {
    /// Engine settings
    settings: HeadingSettings,
    /// Last accelerometer reading (m/s²)
    accelerometer: Vector3<f32>,
    /// Last magnetometer reading (µT)
    magnetometer: Vector3<f32>,
}

impl HeadingEngine {
    /// Create a new engine with default settings
    pub fn new() -> Self {
        Self::with_settings(HeadingSettings::default())
    }

    /// Create a new engine with specified settings
    pub fn with_settings(settings: HeadingSettings) -> Self {
        Self {
            settings,
            accelerometer: Vector3::zeros(),
            magnetometer: Vector3::zeros(),
        }
    }

    /// Get the engine settings
    pub fn settings(&self) -> HeadingSettings {
        self.settings
    }

    /// Replace the engine settings; stored readings are kept
    pub fn set_settings(&mut self, settings: HeadingSettings) {
        self.settings = settings;
    }

    /// Store the latest accelerometer reading
    pub fn set_accelerometer(&mut self, accelerometer: Vector3<f32>) {
        self.accelerometer = accelerometer;
    }

    /// Store the latest magnetometer reading
    pub fn set_magnetometer(&mut self, magnetometer: Vector3<f32>) {
        self.magnetometer = magnetometer;
    }

    /// Last accelerometer reading
    pub fn accelerometer(&self) -> Vector3<f32> {
        self.accelerometer
    }

    /// Last magnetometer reading
    pub fn magnetometer(&self) -> Vector3<f32> {
        self.magnetometer
    }

    /// Heading from the stored readings
    pub fn heading(&self) -> Option<HeadingResult> {
        self.update(self.accelerometer, self.magnetometer)
    }

    /// Compute the heading for an accelerometer/magnetometer pair
    ///
    /// Returns `None` when the pair cannot define a rotation (either vector
    /// zero, gravity too weak, or the two vectors parallel). That is a normal
    /// state at start-up and the caller should simply wait for the next reading.
    ///
    /// # Arguments
    /// * `accelerometer` - Accelerometer reading (m/s²), not range checked
    /// * `magnetometer` - Magnetometer reading (µT), not range checked
    pub fn update(
        &self,
        accelerometer: Vector3<f32>,
        magnetometer: Vector3<f32>,
    ) -> Option<HeadingResult> {
        let rotation = rotation_matrix(accelerometer, magnetometer).ok()?;
        let orientation = OrientationAngles::from_rotation(&rotation.matrix);

        let azimuth_degrees = orientation.azimuth_degrees();
        let heading_degrees = wrap_degrees(azimuth_degrees as f64 + self.settings.offset);

        Some(HeadingResult {
            heading_degrees,
            icon_rotation_degrees: wrap_half_turn(-azimuth_degrees),
            orientation,
            inclination_degrees: rotation.inclination_angle() * RAD_TO_DEG,
        })
    }
}

impl Default for HeadingEngine {
    fn default() -> Self {
        Self::new()
    }
}
