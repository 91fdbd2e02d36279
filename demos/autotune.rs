// demos/autotune.rs

use free_flight_autotune::{
    compute_gains, Axis, CascadeStabilizer, FlightStabilizer, FlightStabilizerConfig, GainReport,
    IdentifiedPlant, StabilizationSettings, TuningInputs,
};

fn main() {
    // Log-domain estimates as published by system identification.
    let plant = IdentifiedPlant::new(-3.5, 10.5, 9.5);

    // Damping 1.1 and a high frequency gain weight of 1%.
    let tuning = TuningInputs::with_dials(10, 110);

    let gains = match compute_gains(&plant, &tuning) {
        Ok(gains) => gains,
        Err(e) => {
            eprintln!("synthesis failed: {}", e);
            return;
        }
    };
    println!("{}", GainReport::new(&gains));
    println!(
        "Limiting axis:     {}",
        gains.diagnostics.poles.limiting_axis
    );
    println!();

    // Keep the integral limits from the existing settings.
    let mut settings = StabilizationSettings::<f64>::new();
    settings.roll_rate.i_limit = 0.5;
    settings.pitch_rate.i_limit = 0.5;
    settings.roll_attitude.i_limit = 50.0;
    settings.pitch_attitude.i_limit = 50.0;
    let settings = gains.merged_with(&settings);

    let mut stabilizer =
        CascadeStabilizer::with_config(FlightStabilizerConfig::from_settings(&settings));

    // Simulate the identified plant with a 10 degree roll step.
    let tau = plant.time_constant();
    let beta = (plant.gain(Axis::Roll), plant.gain(Axis::Pitch));
    let set_point = (10.0, 0.0); // desired roll, pitch
    let mut actuator = (0.0, 0.0);
    let mut gyro_rate = (0.0, 0.0); // current roll rate, pitch rate
    let mut imu_attitude = (0.0, 0.0); // current roll, pitch
    let dt = 0.0005; // time step
    let low_throttle = false;

    println!("                    Roll,    Pitch");
    let mut t = 0.0;
    for step in 0..=1000 {
        // Perform the control computation
        let (roll_cmd, pitch_cmd) =
            stabilizer.control(set_point, imu_attitude, gyro_rate, dt, low_throttle);

        // print results
        if step % 100 == 0 {
            println!("t = {:.3}, dt = {:.4}", t, dt);
            println!(
                "    Set Point:    {:-8.3}, {:-8.3}",
                set_point.0, set_point.1
            );
            println!(
                "    IMU Attitude: {:-8.3}, {:-8.3}",
                imu_attitude.0, imu_attitude.1
            );
            println!(
                "    Gyroscope:    {:-8.3}, {:-8.3}",
                gyro_rate.0, gyro_rate.1
            );
            println!("    Command:      {:-8.5}, {:-8.5}", roll_cmd, pitch_cmd);
        }

        // simulate response
        actuator.0 += dt * (roll_cmd - actuator.0) / tau;
        actuator.1 += dt * (pitch_cmd - actuator.1) / tau;
        gyro_rate.0 += dt * beta.0 * actuator.0;
        gyro_rate.1 += dt * beta.1 * actuator.1;
        imu_attitude.0 += dt * gyro_rate.0;
        imu_attitude.1 += dt * gyro_rate.1;

        t += dt;
    }
}
