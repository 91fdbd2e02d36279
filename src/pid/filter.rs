// src/pid/filter.rs

//! First order low pass filter for the rate loop derivative term.

use crate::Number;

/// Discrete first order low pass filter with time constant `tau`.
///
/// Each update moves the output toward the input by `dt / (tau + dt)`. A time
/// constant of zero passes the input through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeFilter<T> {
    tau: T,
    output: T,
}

impl<T: Number> DerivativeFilter<T> {
    /// Creates a filter with time constant `tau` and zero output.
    pub fn new(tau: T) -> Self {
        Self {
            tau,
            output: T::zero(),
        }
    }

    /// The filter time constant.
    pub fn tau(&self) -> T {
        self.tau
    }

    /// The most recent output.
    pub fn output(&self) -> T {
        self.output
    }

    /// Sets the output back to zero.
    pub fn reset(&mut self) {
        self.output = T::zero();
    }

    /// Feeds `input` sampled `dt` after the previous update.
    pub fn update(&mut self, input: T, dt: T) -> T {
        let alpha = dt / (self.tau + dt);
        self.output = self.output + alpha * (input - self.output);
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_filter_passthrough_without_time_constant() {
        let mut filter = DerivativeFilter::new(0.0);
        assert!(value_close(3.0, filter.update(3.0, 0.01)));
        assert!(value_close(-2.0, filter.update(-2.0, 0.01)));
    }

    #[test]
    fn test_filter_step_response() {
        let mut filter = DerivativeFilter::new(0.03);

        // alpha = 0.01 / 0.04
        assert!(value_close(0.25, filter.update(1.0, 0.01)));
        assert!(value_close(0.4375, filter.update(1.0, 0.01)));

        for _ in 0..200 {
            let _ = filter.update(1.0, 0.01);
        }
        assert!((1.0 - filter.output()).abs() < 1e-6, "Output should settle.");

        filter.reset();
        assert_eq!(filter.output(), 0.0);
        assert_eq!(filter.tau(), 0.03);
    }
}
