// src/autotune/report.rs

//! Operator facing summary of a synthesis run. Formatting is kept apart from
//! the computation; the report only reads a [`ComputedGains`].

use core::fmt;

use crate::{ComputedGains, Real};

/// Displays computed gains and the values they were derived from.
///
/// ```
/// use free_flight_autotune::{compute_gains, GainReport, IdentifiedPlant, TuningInputs};
///
/// let plant = IdentifiedPlant::new(-3.5_f64, 10.0, 10.0);
/// let gains = compute_gains(&plant, &TuningInputs::new()).unwrap();
///
/// println!("{}", GainReport::new(&gains));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GainReport<'a, T> {
    gains: &'a ComputedGains<T>,
}

impl<'a, T: Real> GainReport<'a, T> {
    /// Creates a report for `gains`.
    pub fn new(gains: &'a ComputedGains<T>) -> Self {
        Self { gains }
    }

    /// Natural frequency of the rate loop in Hz.
    pub fn natural_frequency_hz(&self) -> T {
        self.gains.diagnostics.poles.natural_frequency_hz()
    }

    /// Noise weight in percent.
    pub fn noise_percent(&self) -> T {
        self.gains.diagnostics.ghf * T::constant(100.0)
    }
}

impl<T: Real + fmt::Display> fmt::Display for GainReport<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.gains;
        let d = &g.diagnostics;

        writeln!(f, "            Kp,         Ki,         Kd")?;
        writeln!(
            f,
            "Roll rate:  {:<10.6}, {:<10.6}, {:<10.6}",
            g.roll_rate_pid.kp, g.roll_rate_pid.ki, g.roll_rate_pid.kd
        )?;
        writeln!(
            f,
            "Pitch rate: {:<10.6}, {:<10.6}, {:<10.6}",
            g.pitch_rate_pid.kp, g.pitch_rate_pid.ki, g.pitch_rate_pid.kd
        )?;
        writeln!(f, "Outer Kp:          {:.4}", g.roll_outer_kp)?;
        writeln!(f, "Derivative cutoff: {:.2} Hz", g.derivative_cutoff)?;
        writeln!(f, "Tau:               {:.3} s", d.tau)?;
        writeln!(f, "Natural frequency: {:.1} Hz", self.natural_frequency_hz())?;
        writeln!(f, "Damping:           {:.2}", d.damp)?;
        write!(f, "Noise:             {:.2} %", self.noise_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::{compute_gains, IdentifiedPlant, TuningInputs};
    use std::format;

    fn reference_gains() -> ComputedGains<f64> {
        compute_gains(&IdentifiedPlant::new(-3.5, 10.0, 10.0), &TuningInputs::new()).unwrap()
    }

    #[test]
    fn test_report_derived_values() {
        let gains = reference_gains();
        let report = GainReport::new(&gains);

        assert!(relative_close(7.817853035368633, report.natural_frequency_hz()));
        assert!(relative_close(1.0, report.noise_percent()));
    }

    #[test]
    fn test_report_display() {
        let gains = reference_gains();
        let text = format!("{}", GainReport::new(&gains));

        assert!(text.contains("Outer Kp:          7.2664"));
        assert!(text.contains("Derivative cutoff: 27.56 Hz"));
        assert!(text.contains("Tau:               0.030 s"));
        assert!(text.contains("Natural frequency: 7.8 Hz"));
        assert!(text.contains("Damping:           1.10"));
        assert!(text.contains("Noise:             1.00 %"));
        assert!(text.starts_with("            Kp,"));
    }
}
