//! Board Setup
//!
//! Random initial scattering of objects and agents.

pub mod population;

pub use population::*;
