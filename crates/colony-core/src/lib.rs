//! Stigmergic Sorting Simulation
//!
//! Agents wander a grid, pick up and drop objects according to what they
//! remember seeing, and in the cooperative variant pair up through pheromone
//! markers to carry heavy objects. Piles of like objects emerge without any
//! agent knowing where they are.

use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::{Agent, Grid, Memory, MarkerStore, Occupant, Percept, PheromoneMarker};
pub use config::{ConfigError, FrameControl, Policy, SimConfig};
pub use error::{SimError, SimResult};
pub use output::{render_ascii, SortingStats, StatsCollector};
pub use setup::SpawnSummary;
pub use simulation::Simulation;

/// Seeded random number generator owned by the driver
#[derive(Debug, Clone)]
pub struct SimRng(pub SmallRng);
