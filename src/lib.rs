#![no_std]

//! Qibla Compass - tilt-compensated heading toward a fixed target bearing
//!
//! Turns the latest raw accelerometer and magnetometer readings into a
//! compass heading toward the Qibla, plus the rotation to apply to an
//! on-screen pointer icon.
//!
//! Each computation builds the device rotation matrix from the gravity and
//! geomagnetic vectors, decomposes it into azimuth, pitch and roll, adds a
//! fixed offset to the azimuth and wraps the result into `[0, 360)`. No state
//! survives between computations: there is no smoothing, calibration or
//! sensor fusion over time.
//!
//! # Features
//!
//! - Rotation and inclination matrices from gravity and magnetic field vectors
//! - Azimuth/pitch/roll decomposition
//! - Configurable heading offset with full modulo wrapping
//! - Sensor event dispatch to a display sink, including optional ambient
//!   temperature and humidity readings
//! - `#![no_std]` compatible for embedded systems
//! - Optional `defmt` feature deriving `defmt::Format` for the public data types
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use qibla_compass::HeadingEngine;
//!
//! let engine = HeadingEngine::new();
//!
//! // Sensor readings
//! let accelerometer = Vector3::new(0.0, 0.0, 9.81); // m/s², device flat
//! let magnetometer = Vector3::new(0.0, 30.0, -40.0); // µT
//!
//! // `None` until both readings define a rotation
//! if let Some(result) = engine.update(accelerometer, magnetometer) {
//!     let heading = result.heading_degrees; // [0, 360)
//!     let icon = result.icon_rotation_degrees; // (-180, 180]
//!     assert!((0.0..360.0).contains(&heading));
//!     assert!(icon > -180.0 && icon <= 180.0);
//! }
//! ```

pub mod display;
mod engine;
mod math;
pub mod orientation;
pub mod rotation;
mod types;

// Re-export all public types and functions
pub use display::{
    Compass, CompassError, DisplaySink, HeadingLabel, HumidityLabel, SensorAvailability,
    TemperatureLabel,
};
pub use engine::HeadingEngine;
pub use math::{DEG_TO_RAD, RAD_TO_DEG, wrap_degrees, wrap_half_turn};
pub use orientation::OrientationAngles;
pub use rotation::{DeviceRotation, RotationError, rotation_matrix};
pub use types::*;
