// src/stabilizer.rs

//! # Flight Stabilizer Module
//!
//! Roll and pitch stabilization driven by a [`StabilizationSettings`](crate::StabilizationSettings)
//! record, with the loop structure the synthesized gains are designed for.

pub mod cascade;
pub use cascade::*;
pub mod flight_stabilizer;
pub use flight_stabilizer::*;
