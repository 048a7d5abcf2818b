//! Core types and settings for the compass

use nalgebra::Vector3;

use crate::orientation::OrientationAngles;

/// Angular offset in degrees from north to the Qibla used by default
///
/// Static approximation for a fixed reference location; it is not derived from
/// the device position.
pub const DEFAULT_QIBLA_OFFSET: f64 = 2.5;

/// Heading engine settings
///
/// # Example
/// ```
/// use qibla_compass::{HeadingEngine, HeadingSettings};
///
/// let settings = HeadingSettings {
///     offset: -12.0, // target bearing west of north
/// };
/// let engine = HeadingEngine::with_settings(settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeadingSettings {
    /// Offset in degrees added to the device azimuth to obtain the target heading
    ///
    /// Any finite value is accepted; the sum is wrapped into `[0, 360)`.
    pub offset: f64,
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            offset: DEFAULT_QIBLA_OFFSET,
        }
    }
}

/// Output of a single heading computation
///
/// Recomputed from scratch on every update; it carries no memory of earlier
/// readings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeadingResult {
    /// Heading toward the target bearing in degrees, in `[0, 360)`
    pub heading_degrees: f64,
    /// Rotation to apply to the on-screen icon in degrees, in `(-180, 180]`
    ///
    /// Equal to the negated azimuth so the icon counter-rotates against the device.
    pub icon_rotation_degrees: f32,
    /// Orientation the heading was derived from (radians)
    pub orientation: OrientationAngles,
    /// Magnetic inclination (dip) in degrees
    pub inclination_degrees: f32,
}

impl HeadingResult {
    /// Heading truncated toward zero, as shown on the heading label
    pub fn whole_degrees(&self) -> i32 {
        self.heading_degrees as i32
    }
}

/// Kinds of sensor the compass knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    /// 3-axis accelerometer (m/s²)
    Accelerometer,
    /// 3-axis magnetometer (µT)
    MagneticField,
    /// Ambient air temperature (°C)
    AmbientTemperature,
    /// Relative humidity (%)
    RelativeHumidity,
}

impl SensorKind {
    /// Return variant name as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Accelerometer => "Accelerometer",
            SensorKind::MagneticField => "MagneticField",
            SensorKind::AmbientTemperature => "AmbientTemperature",
            SensorKind::RelativeHumidity => "RelativeHumidity",
        }
    }
}

/// A single reading delivered by the platform sensor feed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    /// Latest accelerometer sample, gravity included (m/s²)
    Accelerometer(Vector3<f32>),
    /// Latest magnetometer sample (µT)
    MagneticField(Vector3<f32>),
    /// Ambient temperature (°C)
    AmbientTemperature(f32),
    /// Relative humidity (%)
    RelativeHumidity(f32),
}

impl SensorEvent {
    /// Sensor that produced this event
    pub fn kind(&self) -> SensorKind {
        match self {
            SensorEvent::Accelerometer(_) => SensorKind::Accelerometer,
            SensorEvent::MagneticField(_) => SensorKind::MagneticField,
            SensorEvent::AmbientTemperature(_) => SensorKind::AmbientTemperature,
            SensorEvent::RelativeHumidity(_) => SensorKind::RelativeHumidity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = HeadingSettings::default();
        assert_eq!(settings.offset, 2.5);
    }

    #[test]
    fn test_whole_degrees_truncates() {
        let result = HeadingResult {
            heading_degrees: 184.9,
            icon_rotation_degrees: 178.0,
            orientation: OrientationAngles::default(),
            inclination_degrees: 0.0,
        };
        assert_eq!(result.whole_degrees(), 184);
    }

    #[test]
    fn test_event_kind() {
        let accel = SensorEvent::Accelerometer(Vector3::new(0.0, 0.0, 9.81));
        assert_eq!(accel.kind(), SensorKind::Accelerometer);
        assert_eq!(SensorEvent::RelativeHumidity(40.0).kind().as_str(), "RelativeHumidity");
    }
}
