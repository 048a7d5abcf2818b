use nalgebra::Vector3;
use qibla_compass::{
    Compass, DisplaySink, HeadingLabel, HeadingResult, HeadingSettings, HumidityLabel,
    SensorAvailability, SensorEvent, TemperatureLabel,
};

const SAMPLE_PERIOD: f32 = 0.2; // 200 ms, a normal UI sensor rate

struct Console;

impl DisplaySink for Console {
    fn show_heading(&mut self, result: &HeadingResult) {
        println!(
            "{}  (icon rotation {:.1}°)",
            HeadingLabel(result),
            result.icon_rotation_degrees
        );
    }

    fn show_temperature(&mut self, celsius: Option<f32>) {
        println!("{}", TemperatureLabel(celsius));
    }

    fn show_humidity(&mut self, percent: Option<f32>) {
        println!("{}", HumidityLabel(percent));
    }
}

fn main() {
    let availability = SensorAvailability {
        temperature: true,
        ..SensorAvailability::motion_only()
    };

    let mut compass = match Compass::new(availability, HeadingSettings::default(), Console) {
        Ok(compass) => compass,
        Err(error) => {
            eprintln!("{}", error);
            return;
        }
    };

    compass.on_sensor_event(SensorEvent::AmbientTemperature(22.5));

    // Device lying flat; until the magnetometer reports there is no heading
    let accelerometer = Vector3::new(0.0, 0.0, 9.81); // m/s²
    compass.on_sensor_event(SensorEvent::Accelerometer(accelerometer));

    for i in 0..10 {
        // replace these with actual sensor readings; the device turns 36° per step
        let angle = (i as f32 * 36.0).to_radians();
        let magnetometer = Vector3::new(-30.0 * angle.sin(), 30.0 * angle.cos(), -40.0); // µT

        print!("t={:.1}s  ", i as f32 * SAMPLE_PERIOD);
        compass.on_sensor_event(SensorEvent::MagneticField(magnetometer));
    }
}
