// src/autotune/pole_placement.rs

//! # Pole Placement Module
//!
//! Closed loop pole placement for the plant `beta / (s * (tau * s + 1))`
//! under a PID controller whose derivative term is low pass filtered with time
//! constant `tau_d`. The closed loop characteristic polynomial is placed at
//!
//! ```text
//! (s + a) * (s + b) * (s^2 + 2 * damp * wn * s + wn^2)
//! ```
//!
//! The bandwidth `wn` and the filter time constant `tau_d` depend on each
//! other. They are found with a fixed number of fixed-point iterations, using
//! one filter for both axes. The real poles `a` and `b` then absorb the
//! remaining freedom of the third order coefficient.

use crate::{Axis, PlantModel, Real};

/// Number of fixed-point iterations of the bandwidth and filter solve.
///
/// The solve is not stopped on convergence. Keeping the count fixed keeps
/// results comparable between implementations.
pub const SOLVER_ITERATIONS: usize = 30;

/// Ratio between the real pole sum and the slow real pole `a`.
///
/// A slow first pole keeps the integral from driving too much overshoot.
pub const SLOW_POLE_RATIO: f64 = 20.0;

/// Closed loop poles and derivative filter shared by roll and pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PolePlacement<T> {
    /// Natural frequency of the complex pole pair in rad/s.
    pub wn: T,
    /// Derivative filter time constant in seconds.
    pub tau_d: T,
    /// Slow real pole in rad/s.
    pub a: T,
    /// Companion real pole in rad/s.
    pub b: T,
    /// Roll filter candidate of the last iteration.
    pub tau_d_roll: T,
    /// Pitch filter candidate of the last iteration.
    pub tau_d_pitch: T,
    /// Axis whose candidate became the shared filter.
    pub limiting_axis: Axis,
}

impl<T: Real> PolePlacement<T> {
    /// Solves for the pole placement of `plant` with damping ratio `damp` and
    /// high frequency gain weight `ghf`.
    ///
    /// Inputs are not validated here. Degenerate inputs produce non-finite
    /// values, which [`PolePlacement::is_usable`] reports.
    pub fn solve(plant: &PlantModel<T>, damp: T, ghf: T) -> Self {
        Self::solve_with_iterations(plant, damp, ghf, SOLVER_ITERATIONS)
    }

    pub(crate) fn solve_with_iterations(
        plant: &PlantModel<T>,
        damp: T,
        ghf: T,
        iterations: usize,
    ) -> Self {
        let tau = plant.tau;
        let two = T::constant(2.0);

        let mut wn = tau.recip();
        let mut tau_d = T::zero();
        let mut tau_d_roll = T::zero();
        let mut tau_d_pitch = T::zero();
        let mut limiting_axis = Axis::Pitch;

        for _ in 0..iterations {
            tau_d_roll = filter_candidate(tau, wn, damp, plant.beta_roll, ghf);
            tau_d_pitch = filter_candidate(tau, wn, damp, plant.beta_pitch, ghf);

            // The slowest filter wins.
            (tau_d, limiting_axis) = if tau_d_roll > tau_d_pitch {
                (tau_d_roll, Axis::Roll)
            } else {
                (tau_d_pitch, Axis::Pitch)
            };
            wn = (tau + tau_d) / (tau * tau_d) / (two * damp + two);
        }

        let pole_sum = (tau + tau_d) / tau / tau_d - two * damp * wn;
        let a = pole_sum / T::constant(SLOW_POLE_RATIO);
        let b = pole_sum - a;

        debug!(
            "pole placement: wn {=f64} tau_d {=f64} a {=f64} b {=f64}",
            wn.as_f64(),
            tau_d.as_f64(),
            a.as_f64(),
            b.as_f64()
        );

        Self {
            wn,
            tau_d,
            a,
            b,
            tau_d_roll,
            tau_d_pitch,
            limiting_axis,
        }
    }

    /// Filter candidate of `axis` in the last iteration.
    pub fn candidate(&self, axis: Axis) -> T {
        match axis {
            Axis::Roll => self.tau_d_roll,
            Axis::Pitch => self.tau_d_pitch,
        }
    }

    /// Natural frequency of the complex pole pair in Hz.
    pub fn natural_frequency_hz(&self) -> T {
        self.wn / T::TAU()
    }

    /// Whether every value is finite and the bandwidth and filter time
    /// constant are positive.
    pub fn is_usable(&self) -> bool {
        self.wn.is_finite()
            && self.tau_d.is_finite()
            && self.a.is_finite()
            && self.b.is_finite()
            && self.wn > T::zero()
            && self.tau_d > T::zero()
    }
}

/// Derivative filter time constant that gives `damp` at bandwidth `wn` for
/// an axis with gain `beta`.
fn filter_candidate<T: Real>(tau: T, wn: T, damp: T, beta: T, ghf: T) -> T {
    let two = T::constant(2.0);
    let four = T::constant(4.0);

    (two * damp * tau * wn - T::one())
        / (four * tau * damp * damp * wn * wn - two * damp * wn - tau * wn * wn + beta * ghf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::IdentifiedPlant;

    fn model(tau: f64, beta_roll: f64, beta_pitch: f64) -> PlantModel<f64> {
        IdentifiedPlant::new(tau, beta_roll, beta_pitch)
            .model()
            .unwrap()
    }

    #[test]
    fn test_pole_placement_reference_values() {
        let placement = PolePlacement::solve(&model(-3.5, 10.0, 10.0), 1.1, 0.01);

        assert!(relative_close(49.12101932551752, placement.wn));
        assert!(relative_close(0.005773911105732025, placement.tau_d));
        assert!(relative_close(4.912101932551753, placement.a));
        assert!(relative_close(93.32993671848331, placement.b));
        assert!(placement.is_usable());
    }

    /// The slow pole is a fixed fraction of the real pole sum.
    #[test]
    fn test_pole_placement_slow_pole_ratio() {
        let placement = PolePlacement::solve(&model(-3.5, 10.0, 10.0), 1.1, 0.01);
        assert!(relative_close(19.0 * placement.a, placement.b));
    }

    /// For representative plants the iteration has settled well before the
    /// last pass.
    #[test]
    fn test_pole_placement_settled_by_last_iteration() {
        let cases = [
            (0.01f64, 1.0, 0.02, 9.0),
            (0.03, 1.1, 0.01, 10.0),
            (0.05, 0.7, 0.01, 12.0),
            (0.1, 0.7, 0.02, 11.0),
            (0.3, 0.7, 0.01, 11.0),
            (1.0, 0.7, 0.02, 10.0),
        ];

        for (tau, damp, ghf, beta) in cases {
            let plant = model(tau.ln(), beta, beta);
            let before = PolePlacement::solve_with_iterations(
                &plant,
                damp,
                ghf,
                SOLVER_ITERATIONS - 1,
            );
            let last = PolePlacement::solve(&plant, damp, ghf);

            assert!(last.is_usable(), "tau {} damp {} unusable", tau, damp);
            assert!(
                ((last.wn - before.wn) / last.wn).abs() < 1e-4,
                "wn still moving for tau {} damp {}",
                tau,
                damp
            );
            assert!(
                ((last.tau_d - before.tau_d) / last.tau_d).abs() < 1e-4,
                "tau_d still moving for tau {} damp {}",
                tau,
                damp
            );
        }
    }

    /// A lower pitch gain gives the larger pitch filter candidate, which must
    /// become the shared filter.
    #[test]
    fn test_pole_placement_selects_slower_filter() {
        let placement = PolePlacement::solve(&model(-3.5, 10.5, 9.5), 1.1, 0.01);

        assert!(placement.tau_d_pitch > placement.tau_d_roll);
        assert_eq!(placement.tau_d, placement.tau_d_pitch);
        assert_eq!(placement.limiting_axis, Axis::Pitch);
        assert!(relative_close(0.007224025244697994, placement.tau_d));
        assert!(relative_close(0.0036710089306063514, placement.tau_d_roll));

        let mirrored = PolePlacement::solve(&model(-3.5, 9.5, 10.5), 1.1, 0.01);
        assert_eq!(mirrored.limiting_axis, Axis::Roll);
        assert_eq!(mirrored.tau_d, mirrored.tau_d_roll);
        assert_eq!(mirrored.tau_d, placement.tau_d);
        assert_eq!(mirrored.wn, placement.wn);
    }

    /// At damping 0.5 the first candidate numerator `2 * damp * tau * wn - 1`
    /// is exactly zero because `wn` starts at `1 / tau`.
    #[test]
    fn test_pole_placement_half_damping_degenerates() {
        let placement = PolePlacement::solve(&model(0.3f64.ln(), 0.0, 0.0), 0.5, 0.02);
        assert!(!placement.is_usable());
    }

    #[test]
    fn test_pole_placement_natural_frequency_hz() {
        let placement = PolePlacement::solve(&model(-3.5, 10.0, 10.0), 1.1, 0.01);
        assert!(relative_close(
            49.12101932551752 / (2.0 * core::f64::consts::PI),
            placement.natural_frequency_hz()
        ));
    }
}
