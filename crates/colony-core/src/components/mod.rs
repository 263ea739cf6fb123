//! Simulation Components
//!
//! The board, the markers written into it, and the agents walking on it.

pub mod agent;
pub mod grid;
pub mod pheromone;

pub use agent::*;
pub use grid::*;
pub use pheromone::*;
