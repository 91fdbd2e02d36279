// src/autotune/synthesizer.rs

//! # Gain Synthesizer Module
//!
//! This module computes rate loop PID gains, attitude loop proportional gains
//! and the derivative filter cutoff from identified plant parameters and the
//! tuning dials.
//!
//! ## Overview
//!
//! The closed loop poles are placed by [`PolePlacement`]. Matching the
//! characteristic polynomial of the plant under a PID controller with filtered
//! derivative against the placed poles gives the gains of that filtered form,
//! which are then converted to a parallel PID whose derivative term alone is
//! filtered. The attitude loop treats the closed rate loop as a first order
//! lag with bandwidth `wn` and sets a damping of [`OUTER_LOOP_DAMPING`].
//!
//! The attitude loop gain uses no per-axis gain, so roll and pitch always
//! share the same value. The attitude loop integral gain is always zero; all
//! integration is left to the rate loop.
//!
//! The computation is a pure function of its inputs.

use crate::{
    Axis, IdentifiedPlant, PidGains, PlantModel, PolePlacement, Real, StabilizationSettings,
    SynthesisError, TuningInputs,
};

/// Damping ratio targeted by the attitude loop.
pub const OUTER_LOOP_DAMPING: f64 = 1.3;

/// Intermediate values of a synthesis run, for operator display.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics<T> {
    /// Time constant in seconds, after exponentiation.
    pub tau: T,
    /// Damping ratio from the damping dial.
    pub damp: T,
    /// High frequency gain weight from the noise dial.
    pub ghf: T,
    /// Solved pole placement.
    pub poles: PolePlacement<T>,
}

/// Controller gains produced by [`compute_gains`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComputedGains<T> {
    /// Roll rate loop gains.
    pub roll_rate_pid: PidGains<T>,
    /// Pitch rate loop gains.
    pub pitch_rate_pid: PidGains<T>,
    /// Roll attitude loop proportional gain.
    pub roll_outer_kp: T,
    /// Pitch attitude loop proportional gain.
    pub pitch_outer_kp: T,
    /// Shared derivative low pass filter cutoff in Hz.
    pub derivative_cutoff: T,
    /// Intermediate values of the solve.
    pub diagnostics: Diagnostics<T>,
}

impl<T: Real> ComputedGains<T> {
    /// Rate loop gains of `axis`.
    pub fn rate_pid(&self, axis: Axis) -> PidGains<T> {
        match axis {
            Axis::Roll => self.roll_rate_pid,
            Axis::Pitch => self.pitch_rate_pid,
        }
    }

    /// Attitude loop proportional gain of `axis`.
    pub fn outer_kp(&self, axis: Axis) -> T {
        match axis {
            Axis::Roll => self.roll_outer_kp,
            Axis::Pitch => self.pitch_outer_kp,
        }
    }

    /// Roll attitude loop integral gain. Always zero.
    pub fn roll_outer_ki(&self) -> T {
        T::zero()
    }

    /// Pitch attitude loop integral gain. Always zero.
    pub fn pitch_outer_ki(&self) -> T {
        T::zero()
    }

    /// Writes the gains and the cutoff into `settings`, leaving integral
    /// limits and output scale untouched.
    pub fn apply_to(&self, settings: &mut StabilizationSettings<T>) {
        settings.roll_rate.set_gains(self.roll_rate_pid);
        settings.pitch_rate.set_gains(self.pitch_rate_pid);
        settings.roll_attitude.kp = self.roll_outer_kp;
        settings.roll_attitude.ki = self.roll_outer_ki();
        settings.pitch_attitude.kp = self.pitch_outer_kp;
        settings.pitch_attitude.ki = self.pitch_outer_ki();
        settings.derivative_cutoff = self.derivative_cutoff;
    }

    /// Returns a copy of `settings` with these gains applied.
    pub fn merged_with(&self, settings: &StabilizationSettings<T>) -> StabilizationSettings<T> {
        let mut merged = *settings;
        self.apply_to(&mut merged);
        merged
    }

    fn is_finite(&self) -> bool {
        [self.roll_rate_pid, self.pitch_rate_pid]
            .iter()
            .all(|g| g.kp.is_finite() && g.ki.is_finite() && g.kd.is_finite())
            && self.roll_outer_kp.is_finite()
            && self.pitch_outer_kp.is_finite()
            && self.derivative_cutoff.is_finite()
    }
}

/// Computes controller gains for `plant` with the given `tuning`.
///
/// Inputs are validated before the solve: the exponentiated time constant and
/// gains must be finite and positive, the damping ratio positive and the noise
/// weight not negative. A solve that ends with a non-finite value or a
/// non-positive bandwidth or filter time constant is reported as
/// [`SynthesisError::DegenerateSolution`]. No NaN or infinite gain is ever
/// returned.
///
/// ```
/// use free_flight_autotune::{compute_gains, IdentifiedPlant, TuningInputs};
///
/// let plant = IdentifiedPlant::new(-3.5_f64, 10.5, 9.5);
/// let gains = compute_gains(&plant, &TuningInputs::with_dials(10, 110)).unwrap();
///
/// // The attitude loop ignores the per-axis gain.
/// assert_eq!(gains.roll_outer_kp, gains.pitch_outer_kp);
/// assert_eq!(gains.roll_outer_ki(), 0.0);
/// ```
pub fn compute_gains<T: Real>(
    plant: &IdentifiedPlant<T>,
    tuning: &TuningInputs,
) -> Result<ComputedGains<T>, SynthesisError> {
    let model = plant.model().map_err(|e| {
        warn!("rejected identified plant");
        e
    })?;
    let (ghf, damp): (T, T) = tuning.scaled().map_err(|e| {
        warn!("rejected tuning inputs");
        e
    })?;

    debug!("ghf: {=f64}", ghf.as_f64());
    let poles = PolePlacement::solve(&model, damp, ghf);
    if !poles.is_usable() {
        warn!("pole placement degenerate");
        return Err(SynthesisError::DegenerateSolution);
    }

    let outer_kp = outer_loop_kp(poles.wn);
    let gains = ComputedGains {
        roll_rate_pid: rate_gains(&model, &poles, damp, Axis::Roll),
        pitch_rate_pid: rate_gains(&model, &poles, damp, Axis::Pitch),
        roll_outer_kp: outer_kp,
        pitch_outer_kp: outer_kp,
        derivative_cutoff: (T::TAU() * poles.tau_d).recip(),
        diagnostics: Diagnostics {
            tau: model.tau,
            damp,
            ghf,
            poles,
        },
    };

    if !gains.is_finite() {
        warn!("synthesized gains not finite");
        return Err(SynthesisError::DegenerateSolution);
    }

    Ok(gains)
}

/// Attitude loop gain for a rate loop of bandwidth `wn`.
fn outer_loop_kp<T: Real>(wn: T) -> T {
    let zeta = T::constant(OUTER_LOOP_DAMPING);
    T::one() / T::constant(4.0) / (zeta * zeta) / wn.recip()
}

/// Rate loop gains of `axis` for the placed poles.
fn rate_gains<T: Real>(
    model: &PlantModel<T>,
    poles: &PolePlacement<T>,
    damp: T,
    axis: Axis,
) -> PidGains<T> {
    let PolePlacement { wn, tau_d, a, b, .. } = *poles;
    let tau = model.tau;
    let beta = model.gain(axis);
    let two = T::constant(2.0);

    let ki = a * b * wn * wn * tau * tau_d / beta;
    let kp = tau * tau_d * ((a + b) * wn * wn + two * a * b * damp * wn) / beta - ki * tau_d;
    let kd = (tau * tau_d * (a * b + wn * wn + (a + b) * two * damp * wn) - T::one()) / beta
        - kp * tau_d;

    PidGains { kp, ki, kd }
}
