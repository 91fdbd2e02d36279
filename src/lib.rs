// src/lib.rs

//! # Flight Autotune Gain Synthesis
//!
//! This crate turns identified roll and pitch plant dynamics into rate loop
//! PID gains, attitude loop PI gains and a derivative filter cutoff by closed
//! loop pole placement. It is `no_std` and does not allocate.
//!
//! The synthesis lives in [`autotune`]. The resulting [`StabilizationSettings`]
//! record can drive the cascaded roll/pitch [`CascadeStabilizer`], which is the
//! loop structure the gains are designed for.
//!
//! ```
//! use free_flight_autotune::{compute_gains, IdentifiedPlant, TuningInputs};
//!
//! // Identification reports log-domain values.
//! let plant = IdentifiedPlant::new(-3.5_f64, 10.0, 10.0);
//! let tuning = TuningInputs::new();
//!
//! let gains = compute_gains(&plant, &tuning).unwrap();
//! assert_eq!(gains.roll_rate_pid, gains.pitch_rate_pid);
//! assert!(gains.derivative_cutoff > 0.0);
//! ```

#![no_std]
#![deny(missing_docs)]

#[macro_use]
mod fmt;

pub mod autotune;
pub mod pid;
pub mod settings;
pub mod stabilizer;

#[doc(inline)]
pub use autotune::*;
#[doc(inline)]
pub use settings::*;
#[doc(inline)]
pub use stabilizer::*;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test_utils;
