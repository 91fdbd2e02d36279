// src/stabilizer/cascade.rs

//! # Cascade Flight Stabilization Controller
//!
//! Roll and pitch cascade of an attitude PI loop feeding a rate PID loop.
//!
//! ## Overview
//!
//! For each axis the attitude loop turns the attitude error into a rate set
//! point. The rate loop tracks that set point with a PID whose derivative of
//! the rate error is passed through a first order low pass filter before it
//! is weighted. The filtered derivative, the attitude loop without a
//! derivative and the absence of any blending between the loops are the
//! structure synthesized gains assume, so settings produced by
//! [`compute_gains`](crate::compute_gains) can be used unchanged.
//!
//! A low throttle flag resets every integrator. The derivative filter keeps
//! its state.

use crate::pid::{
    compute_attitude, compute_rate, rate_error_derivative, AttitudeControlData,
    DerivativeFilter, RateControlData,
};
use crate::{FlightStabilizer, FlightStabilizerConfig, Number};
use piddiy::PidController;

/// Rate loop of one axis.
struct RateLoop<T: Number> {
    pid: PidController<T, RateControlData<T>>,
    derivative: DerivativeFilter<T>,
    i_limit: T,
}

impl<T: Number> RateLoop<T> {
    fn new(kp: T, ki: T, kd: T, i_limit: T, derivative_tau: T) -> Self {
        let mut pid = PidController::new();
        pid.compute_fn(compute_rate)
            .set_point(T::zero())
            .kp(kp)
            .ki(ki)
            .kd(kd);

        Self {
            pid,
            derivative: DerivativeFilter::new(derivative_tau),
            i_limit,
        }
    }

    fn control(&mut self, set_point: T, rate: T, dt: T, low_throttle: bool) -> T {
        self.pid.set_point(set_point);
        let raw = rate_error_derivative(&self.pid, rate, dt);
        let data = RateControlData {
            rate,
            dt,
            integral_limit: self.i_limit,
            reset_integral: low_throttle,
            derivative: self.derivative.update(raw, dt),
        };

        self.pid.compute(data)
    }
}

/// Attitude loop of one axis.
struct AttitudeLoop<T: Number> {
    pid: PidController<T, AttitudeControlData<T>>,
    i_limit: T,
}

impl<T: Number> AttitudeLoop<T> {
    fn new(kp: T, ki: T, i_limit: T) -> Self {
        let mut pid = PidController::new();
        pid.compute_fn(compute_attitude)
            .set_point(T::zero())
            .kp(kp)
            .ki(ki)
            .kd(T::zero());

        Self { pid, i_limit }
    }

    fn control(&mut self, set_point: T, attitude: T, dt: T, low_throttle: bool) -> T {
        self.pid.set_point(set_point);
        self.pid.compute(AttitudeControlData {
            attitude,
            dt,
            integral_limit: self.i_limit,
            reset_integral: low_throttle,
        })
    }
}

/// Struct representing the Cascade Flight Stabilization Controller.
pub struct CascadeStabilizer<T: Number> {
    roll_attitude: AttitudeLoop<T>,
    pitch_attitude: AttitudeLoop<T>,
    roll_rate: RateLoop<T>,
    pitch_rate: RateLoop<T>,
    scale: T,
}

impl<T: Number> CascadeStabilizer<T> {
    /// Creates a new controller using the provided configuration
    pub fn with_config(config: FlightStabilizerConfig<T>) -> Self {
        CascadeStabilizer {
            roll_attitude: AttitudeLoop::new(
                config.kp_roll_attitude,
                config.ki_roll_attitude,
                config.i_limit_roll_attitude,
            ),
            pitch_attitude: AttitudeLoop::new(
                config.kp_pitch_attitude,
                config.ki_pitch_attitude,
                config.i_limit_pitch_attitude,
            ),
            roll_rate: RateLoop::new(
                config.kp_roll_rate,
                config.ki_roll_rate,
                config.kd_roll_rate,
                config.i_limit_roll_rate,
                config.derivative_tau,
            ),
            pitch_rate: RateLoop::new(
                config.kp_pitch_rate,
                config.ki_pitch_rate,
                config.kd_pitch_rate,
                config.i_limit_pitch_rate,
                config.derivative_tau,
            ),
            scale: config.scale,
        }
    }

    /// Creates a new controller with default settings
    pub fn new() -> Self {
        Self::with_config(FlightStabilizerConfig::new())
    }

    /// Runs the rate loops alone, tracking `rate_set_point` as a tuple of
    /// (roll rate, pitch rate).
    ///
    /// Returns a tuple of (roll control, pitch control) outputs scaled for
    /// actuation.
    pub fn control_rate(
        &mut self,
        rate_set_point: (T, T),
        gyro_rate: (T, T),
        dt: T,
        low_throttle: bool,
    ) -> (T, T) {
        let roll_output =
            self.roll_rate
                .control(rate_set_point.0, gyro_rate.0, dt, low_throttle);
        let pitch_output =
            self.pitch_rate
                .control(rate_set_point.1, gyro_rate.1, dt, low_throttle);

        (self.scale * roll_output, self.scale * pitch_output)
    }
}

impl<T: Number> FlightStabilizer<T> for CascadeStabilizer<T> {
    fn control(
        &mut self,
        set_point: (T, T),
        imu_attitude: (T, T),
        gyro_rate: (T, T),
        dt: T,
        low_throttle: bool,
    ) -> (T, T) {
        // Outer loop output is the inner loop set point
        let rate_set_point = (
            self.roll_attitude
                .control(set_point.0, imu_attitude.0, dt, low_throttle),
            self.pitch_attitude
                .control(set_point.1, imu_attitude.1, dt, low_throttle),
        );

        self.control_rate(rate_set_point, gyro_rate, dt, low_throttle)
    }
}
