// src/pid/attitude.rs

//! # Attitude PI Control Module
//!
//! Outer loop of the cascade. The output is a rate set point for the rate
//! loop. There is no derivative term; damping comes from the rate loop.

use crate::Number;
use piddiy::PidController;

/// Control data for the attitude PI callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttitudeControlData<T> {
    /// The current attitude angle, typically reported by an IMU.
    pub attitude: T,
    /// The time delta since the last computation.
    pub dt: T,
    /// The maximum allowed value for the integral term, used to prevent integral windup.
    pub integral_limit: T,
    /// Flag to reset the integral term, typically used when the controller is inactive.
    pub reset_integral: bool,
}

/// Attitude PI compute callback.
pub fn compute_attitude<T: Number>(
    pid: &mut PidController<T, AttitudeControlData<T>>,
    data: AttitudeControlData<T>,
) -> (T, T, T) {
    let error = pid.set_point - data.attitude;
    let integral = if !data.reset_integral {
        (pid.integral + error * data.dt).clamp(-data.integral_limit, data.integral_limit)
    } else {
        T::zero()
    };

    (error, integral, T::zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_pid_attitude_proportional_only() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_attitude)
            .set_point(10.0)
            .kp(7.0)
            .ki(0.0)
            .kd(1.0);
        let data = AttitudeControlData {
            attitude: 4.0,
            dt: 0.01,
            integral_limit: 50.0,
            reset_integral: false,
        };

        let output = pid.compute(data);
        assert!(
            value_close(42.0, output),
            "Derivative gain must have no effect."
        );
    }

    #[test]
    fn test_pid_attitude_integral_clamping_and_reset() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_attitude)
            .set_point(10.0)
            .kp(0.0)
            .ki(1.0)
            .kd(0.0);
        let data = AttitudeControlData {
            attitude: 0.0,
            dt: 1.0,
            integral_limit: 25.0,
            reset_integral: false,
        };

        for _ in 0..5 {
            let _ = pid.compute(data);
        }
        assert!(value_close(25.0, pid.integral), "Integral should be clamped.");

        let output = pid.compute(AttitudeControlData {
            reset_integral: true,
            ..data
        });
        assert!(value_close(0.0, output), "Integral should be reset.");
    }
}
