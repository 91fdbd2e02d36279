// src/pid.rs

//! # PID Control Module
//!
//! This module provides compute functions and control data structures for
//! the two loops of the cascade stabilizer, plus the low pass filter applied
//! to the rate loop derivative.

pub mod attitude;
pub use attitude::*;
pub mod filter;
pub use filter::*;
pub mod rate;
pub use rate::*;
