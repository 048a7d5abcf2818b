//! Sensor event dispatch and display output
//!
//! [`Compass`] owns a [`HeadingEngine`] and forwards everything worth showing
//! to a [`DisplaySink`]: the heading and icon rotation, plus the ambient
//! temperature and humidity readings when the device has those sensors.
//!
//! # Example
//! ```
//! use nalgebra::Vector3;
//! use qibla_compass::{
//!     Compass, DisplaySink, HeadingResult, HeadingSettings, SensorAvailability, SensorEvent,
//! };
//!
//! #[derive(Default)]
//! struct Screen {
//!     heading: Option<i32>,
//! }
//!
//! impl DisplaySink for Screen {
//!     fn show_heading(&mut self, result: &HeadingResult) {
//!         self.heading = Some(result.whole_degrees());
//!     }
//!     fn show_temperature(&mut self, _celsius: Option<f32>) {}
//!     fn show_humidity(&mut self, _percent: Option<f32>) {}
//! }
//!
//! let mut compass = Compass::new(
//!     SensorAvailability::motion_only(),
//!     HeadingSettings::default(),
//!     Screen::default(),
//! )
//! .unwrap();
//!
//! compass.on_sensor_event(SensorEvent::Accelerometer(Vector3::new(0.0, 0.0, 9.81)));
//! compass.on_sensor_event(SensorEvent::MagneticField(Vector3::new(0.0, 30.0, -40.0)));
//!
//! assert_eq!(compass.sink().heading, Some(2));
//! ```

use core::fmt;

use crate::engine::HeadingEngine;
use crate::types::{HeadingResult, HeadingSettings, SensorEvent, SensorKind};

/// Receiver of everything the compass displays
pub trait DisplaySink {
    /// New heading available; render the heading label and rotate the icon
    fn show_heading(&mut self, result: &HeadingResult);

    /// Ambient temperature in °C, `None` when the device has no such sensor
    fn show_temperature(&mut self, celsius: Option<f32>);

    /// Relative humidity in %, `None` when the device has no such sensor
    fn show_humidity(&mut self, percent: Option<f32>);
}

/// Which sensors the device provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorAvailability {
    pub accelerometer: bool,
    pub magnetometer: bool,
    pub temperature: bool,
    pub humidity: bool,
}

impl SensorAvailability {
    /// Every supported sensor present
    pub fn all() -> Self {
        Self {
            accelerometer: true,
            magnetometer: true,
            temperature: true,
            humidity: true,
        }
    }

    /// Accelerometer and magnetometer only, no ambient sensors
    pub fn motion_only() -> Self {
        Self {
            accelerometer: true,
            magnetometer: true,
            ..Default::default()
        }
    }

    /// Whether the given sensor is present
    pub fn has(&self, kind: SensorKind) -> bool {
        match kind {
            SensorKind::Accelerometer => self.accelerometer,
            SensorKind::MagneticField => self.magnetometer,
            SensorKind::AmbientTemperature => self.temperature,
            SensorKind::RelativeHumidity => self.humidity,
        }
    }
}

/// Compass start-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompassError {
    /// A sensor required for the heading is missing on this device
    MissingSensor(SensorKind),
}

impl CompassError {
    /// Return variant name as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            CompassError::MissingSensor(_) => "MissingSensor",
        }
    }
}

impl fmt::Display for CompassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompassError::MissingSensor(kind) => {
                write!(f, "required sensor not available: {}", kind.as_str())
            }
        }
    }
}

/// Compass: sensor events in, display updates out
pub struct Compass<S: DisplaySink> {
    engine: HeadingEngine,
    availability: SensorAvailability,
    sink: S,
}

impl<S: DisplaySink> Compass<S> {
    /// Create a compass for a device with the given sensors
    ///
    /// Missing ambient sensors are reported to the sink right away so it can
    /// show its "N/A" placeholder.
    ///
    /// # Errors
    /// [`CompassError::MissingSensor`] when the accelerometer or magnetometer is absent.
    pub fn new(
        availability: SensorAvailability,
        settings: HeadingSettings,
        mut sink: S,
    ) -> Result<Self, CompassError> {
        if !availability.accelerometer {
            return Err(CompassError::MissingSensor(SensorKind::Accelerometer));
        }
        if !availability.magnetometer {
            return Err(CompassError::MissingSensor(SensorKind::MagneticField));
        }

        if !availability.temperature {
            sink.show_temperature(None);
        }
        if !availability.humidity {
            sink.show_humidity(None);
        }

        Ok(Self {
            engine: HeadingEngine::with_settings(settings),
            availability,
            sink,
        })
    }

    /// Handle one sensor event
    ///
    /// Vector readings replace the stored value for their sensor and ambient
    /// readings go straight to the sink. Every accepted event then recomputes
    /// the heading, which is forwarded to the sink when one can be derived.
    /// Events from sensors the device does not report as available are dropped.
    pub fn on_sensor_event(&mut self, event: SensorEvent) -> Option<HeadingResult> {
        if !self.availability.has(event.kind()) {
            return None;
        }

        match event {
            SensorEvent::Accelerometer(reading) => self.engine.set_accelerometer(reading),
            SensorEvent::MagneticField(reading) => self.engine.set_magnetometer(reading),
            SensorEvent::AmbientTemperature(celsius) => self.sink.show_temperature(Some(celsius)),
            SensorEvent::RelativeHumidity(percent) => self.sink.show_humidity(Some(percent)),
        }

        let result = self.engine.heading()?;
        self.sink.show_heading(&result);
        Some(result)
    }

    /// Heading engine
    pub fn engine(&self) -> &HeadingEngine {
        &self.engine
    }

    /// Sensors this compass was created with
    pub fn availability(&self) -> SensorAvailability {
        self.availability
    }

    /// Display sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable display sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the compass, returning the display sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Heading label text, e.g. `Qibla Direction: 184°`
#[derive(Debug, Clone, Copy)]
pub struct HeadingLabel<'a>(pub &'a HeadingResult);

impl fmt::Display for HeadingLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qibla Direction: {}°", self.0.whole_degrees())
    }
}

/// Sensor value as shown on screen: whole numbers keep one decimal (`20.0`)
struct Reading(f32);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0 % 1.0 == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Temperature label text, e.g. `Temperature: 21.5°C` or `Temperature: N/A`
#[derive(Debug, Clone, Copy)]
pub struct TemperatureLabel(pub Option<f32>);

impl fmt::Display for TemperatureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(celsius) => write!(f, "Temperature: {}°C", Reading(celsius)),
            None => write!(f, "Temperature: N/A"),
        }
    }
}

/// Humidity label text, e.g. `Humidity: 40.0%` or `Humidity: N/A`
#[derive(Debug, Clone, Copy)]
pub struct HumidityLabel(pub Option<f32>);

impl fmt::Display for HumidityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(percent) => write!(f, "Humidity: {}%", Reading(percent)),
            None => write!(f, "Humidity: N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use nalgebra::Vector3;
    use std::string::ToString;

    #[derive(Default)]
    struct CountingSink {
        headings: usize,
        temperature: Option<Option<f32>>,
        humidity: Option<Option<f32>>,
    }

    impl DisplaySink for CountingSink {
        fn show_heading(&mut self, _result: &HeadingResult) {
            self.headings += 1;
        }

        fn show_temperature(&mut self, celsius: Option<f32>) {
            self.temperature = Some(celsius);
        }

        fn show_humidity(&mut self, percent: Option<f32>) {
            self.humidity = Some(percent);
        }
    }

    #[test]
    fn test_missing_motion_sensor_is_fatal() {
        let availability = SensorAvailability {
            magnetometer: false,
            ..SensorAvailability::all()
        };
        let result = Compass::new(availability, HeadingSettings::default(), CountingSink::default());

        assert_eq!(
            result.err(),
            Some(CompassError::MissingSensor(SensorKind::MagneticField))
        );
    }

    #[test]
    fn test_missing_ambient_sensors_reported() {
        let compass = Compass::new(
            SensorAvailability::motion_only(),
            HeadingSettings::default(),
            CountingSink::default(),
        )
        .unwrap();

        assert_eq!(compass.sink().temperature, Some(None));
        assert_eq!(compass.sink().humidity, Some(None));
    }

    #[test]
    fn test_unavailable_sensor_events_dropped() {
        let mut compass = Compass::new(
            SensorAvailability::motion_only(),
            HeadingSettings::default(),
            CountingSink::default(),
        )
        .unwrap();

        compass.on_sensor_event(SensorEvent::Accelerometer(Vector3::new(0.0, 0.0, 9.81)));
        compass.on_sensor_event(SensorEvent::MagneticField(Vector3::new(0.0, 30.0, -40.0)));
        assert_eq!(compass.sink().headings, 1);

        assert!(compass.on_sensor_event(SensorEvent::AmbientTemperature(21.0)).is_none());
        assert_eq!(compass.sink().temperature, Some(None));
        assert_eq!(compass.sink().headings, 1);
    }

    #[test]
    fn test_whole_readings_keep_a_decimal() {
        assert_eq!(TemperatureLabel(Some(20.0)).to_string(), "Temperature: 20.0°C");
        assert_eq!(TemperatureLabel(Some(0.0)).to_string(), "Temperature: 0.0°C");
        assert_eq!(HumidityLabel(Some(37.25)).to_string(), "Humidity: 37.25%");
    }

    #[test]
    fn test_error_name() {
        let error = CompassError::MissingSensor(SensorKind::Accelerometer);
        assert_eq!(error.as_str(), "MissingSensor");
    }
}
