//! Simulated Flight Example
//!
//! Runs the variometer against a closure-backed sensor that replays a short
//! paraglider flight: take-off, a thermal, then a glide.
//!
//! ## What You'll Learn
//!
//! - Wrapping any sample source as a `SensorAdapter` with `poll_fn`
//! - Zeroing altitude at take-off (QFE)
//! - Reading raw and smoothed climb rates once per control-loop cycle
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example simulated_flight
//! ```

use vario_core::{
    poll_fn, AltitudeUnit, FixedTime, Sample, VarioError, Variometer,
};

/// Loop period of the simulated instrument
const PERIOD_MS: u64 = 100;
const FREQUENCY_HZ: u16 = 10;

/// Pressure (hPa) at `altitude_m` above sea level, inverse of the altitude formula
fn pressure_at(altitude_m: f32, temperature_c: f32) -> f32 {
    let base = altitude_m * 0.0065 / (temperature_c + 273.15) + 1.0;
    1013.25 / base.powf(1.0 / 0.190223)
}

/// Vertical speed of the simulated glider at time `t_ms`
fn vertical_speed(t_ms: u64) -> f32 {
    match t_ms {
        0..=4_999 => 0.0,       // on launch
        5_000..=24_999 => 2.5,  // thermal
        _ => -1.2,              // glide
    }
}

fn main() -> Result<(), VarioError> {
    println!("Variometer Simulated Flight");
    println!("===========================\n");

    let mut altitude = 650.0_f32;
    let mut t_ms = 0;
    let sensor = poll_fn(move || {
        altitude += vertical_speed(t_ms) * PERIOD_MS as f32 / 1000.0;
        t_ms += PERIOD_MS;
        Ok(Sample::new(18.0, pressure_at(altitude, 18.0)))
    });

    let mut vario = Variometer::new(sensor);
    vario.initialize()?;

    let qfe = vario.set_reference_to_ground_level()?;
    println!("Take-off QFE: {qfe:.2} hPa\n");
    vario.end_cycle();

    let mut clock = FixedTime::new(0);
    for cycle in 0..400 {
        let reading = vario.tick(&clock, FREQUENCY_HZ)?;
        if cycle % 20 == 0 {
            match reading.vario {
                Some(rate) => println!(
                    "t={:>5} ms  height {:>6.1} m ({:>6.0} ft)  vario {:+.2} m/s (raw {:+.2})",
                    reading.timestamp,
                    reading.altitude_m,
                    reading.altitude(AltitudeUnit::Feet),
                    rate.smoothed,
                    rate.raw,
                ),
                None => println!("t={:>5} ms  height {:>6.1} m", reading.timestamp, reading.altitude_m),
            }
        }
        clock.advance(PERIOD_MS);
    }

    Ok(())
}
