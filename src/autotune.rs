// src/autotune.rs

//! # Autotune Gain Synthesis Module
//!
//! This module provides the pole placement solve that converts identified
//! plant parameters and two tuning dials into controller gains, the
//! presentation of the result, and a session type that connects the
//! computation to an identification source and a settings store.

pub mod error;
pub use error::*;
pub mod plant;
pub use plant::*;
pub mod pole_placement;
pub use pole_placement::*;
pub mod report;
pub use report::*;
pub mod session;
pub use session::*;
pub mod synthesizer;
pub use synthesizer::*;
pub mod tuning;
pub use tuning::*;

use num_traits::{Float, FloatConst, NumCast};

/// Custom trait to encapsulate the floating point requirements of the
/// synthesis math.
pub trait Real: Float + FloatConst {
    /// Converts an `f64` constant into this type.
    ///
    /// A failed conversion yields NaN, which the synthesis output checks
    /// reject.
    fn constant(value: f64) -> Self {
        <Self as NumCast>::from(value).unwrap_or_else(Self::nan)
    }

    /// Lossy conversion to `f64` for diagnostics.
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl<T: Float + FloatConst> Real for T {}
