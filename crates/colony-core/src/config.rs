//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without recompiling.
//! Every section is optional; missing values fall back to the defaults of the
//! cooperative-transport run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Memory length used by the basic sorter when no override is given
pub const BASIC_MEMORY_CAPACITY: usize = 10;

/// Memory length used by the cooperative variant when no override is given
pub const COOPERATIVE_MEMORY_CAPACITY: usize = 25;

/// Longest pause between frames, in seconds
pub const MAX_FRAME_DELAY_SECS: f64 = 3600.0;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub movement: MovementConfig,
    #[serde(default)]
    pub pheromone: PheromoneConfig,
    #[serde(default)]
    pub frame: FrameControl,
}

/// Board dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
        }
    }
}

/// How many objects of each kind and how many agents are scattered at start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub objects_a: usize,
    pub objects_b: usize,
    pub objects_c: usize,
    pub agents: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            objects_a: 800,
            objects_b: 800,
            objects_c: 100,
            agents: 200,
        }
    }
}

impl PopulationConfig {
    /// Nothing scattered; used for hand-built boards.
    pub fn none() -> Self {
        Self {
            objects_a: 0,
            objects_b: 0,
            objects_c: 0,
            agents: 0,
        }
    }
}

/// Which decision policy every agent runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Density-driven pick-up/drop of light objects
    Basic,
    /// Basic sorting where the other light kind may be misread as matching
    BasicWithError,
    /// Adds heavy objects moved by linked pairs through pheromone markers
    Cooperative,
}

impl Policy {
    pub fn default_memory_capacity(self) -> usize {
        match self {
            Policy::Basic | Policy::BasicWithError => BASIC_MEMORY_CAPACITY,
            Policy::Cooperative => COOPERATIVE_MEMORY_CAPACITY,
        }
    }
}

impl std::str::FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Policy::Basic),
            "basic_with_error" | "error" => Ok(Policy::BasicWithError),
            "cooperative" => Ok(Policy::Cooperative),
            other => Err(ConfigError::Invalid(format!("unknown policy '{}'", other))),
        }
    }
}

/// Response-function constants and perception parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub policy: Policy,
    /// kp: higher values make pick-up more likely
    pub pick_up_rate: f64,
    /// km: higher values make drops less likely
    pub drop_rate: f64,
    /// Chance of reading the other light kind as the perceived one
    pub error_rate: f64,
    /// Overrides the policy's memory length
    pub memory_capacity: Option<usize>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Cooperative,
            pick_up_rate: 0.1,
            drop_rate: 0.3,
            error_rate: 0.1,
            memory_capacity: None,
        }
    }
}

impl BehaviorConfig {
    pub fn memory_capacity(&self) -> usize {
        self.memory_capacity
            .unwrap_or_else(|| self.policy.default_memory_capacity())
    }
}

/// Random walk parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Cells covered by one step along each axis
    pub step: usize,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self { step: 1 }
    }
}

/// Marker emission, decay and linking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PheromoneConfig {
    /// Chebyshev radius of the emitted marker
    pub diffusion_radius: usize,
    pub initial_strength: u32,
    /// A free agent links when `strength - initial/distance` reaches this
    pub link_threshold: f64,
    /// Chance that a waiting agent abandons a fully decayed marker
    pub give_up_probability: f64,
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            diffusion_radius: 2,
            initial_strength: 100,
            link_threshold: 25.0,
            give_up_probability: 0.5,
        }
    }
}

/// Presentation pacing, owned by whoever renders.
///
/// The core only reads `steps_per_frame` and `running`; the delay is for the
/// caller to sleep on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameControl {
    steps_per_frame: u32,
    delay_secs: f64,
    running: bool,
}

impl Default for FrameControl {
    fn default() -> Self {
        Self {
            steps_per_frame: 1,
            delay_secs: 0.0,
            running: true,
        }
    }
}

impl FrameControl {
    pub fn new(steps_per_frame: u32, delay_secs: f64, running: bool) -> Self {
        let mut frame = Self {
            steps_per_frame: 1,
            delay_secs: 0.0,
            running,
        };
        frame.set_steps_per_frame(steps_per_frame);
        frame.set_delay_secs(delay_secs);
        frame
    }

    pub fn steps_per_frame(&self) -> u32 {
        self.steps_per_frame.max(1)
    }

    /// Clamped to at least one tick per frame.
    pub fn set_steps_per_frame(&mut self, steps: u32) {
        self.steps_per_frame = steps.max(1);
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(clamp_delay(self.delay_secs))
    }

    /// Clamped to `[0, MAX_FRAME_DELAY_SECS]`; NaN counts as zero.
    pub fn set_delay_secs(&mut self, secs: f64) {
        self.delay_secs = clamp_delay(secs);
    }

    pub fn delay_secs(&self) -> f64 {
        self.delay_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }
}

fn clamp_delay(secs: f64) -> f64 {
    if secs.is_nan() {
        0.0
    } else {
        secs.clamp(0.0, MAX_FRAME_DELAY_SECS)
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid.width * self.grid.height
    }

    /// Check that the values describe a run that can be set up
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        let behavior = &self.behavior;
        let rates = [behavior.pick_up_rate, behavior.drop_rate];
        if rates.iter().any(|r| r.is_nan() || *r <= 0.0) {
            return Err(ConfigError::Invalid(
                "pick_up_rate and drop_rate must be positive".into(),
            ));
        }
        check_probability("error_rate", behavior.error_rate)?;
        check_probability("give_up_probability", self.pheromone.give_up_probability)?;
        if behavior.memory_capacity() == 0 {
            return Err(ConfigError::Invalid("memory_capacity must be at least 1".into()));
        }
        let span = self.grid.width.max(self.grid.height);
        if self.movement.step == 0 || self.movement.step > span {
            return Err(ConfigError::Invalid(format!(
                "movement step must be within [1, {}], got {}",
                span, self.movement.step
            )));
        }
        if self.pheromone.diffusion_radius > span {
            return Err(ConfigError::Invalid(format!(
                "diffusion_radius must be at most {}, got {}",
                span, self.pheromone.diffusion_radius
            )));
        }
        if self.pheromone.initial_strength == 0 {
            return Err(ConfigError::Invalid("initial_strength must be positive".into()));
        }
        let delay = self.frame.delay_secs;
        if !(0.0..=MAX_FRAME_DELAY_SECS).contains(&delay) {
            return Err(ConfigError::Invalid(format!(
                "delay_secs must be within [0, {}], got {}",
                MAX_FRAME_DELAY_SECS, delay
            )));
        }

        let population = &self.population;
        if population.objects_c > 0 && behavior.policy != Policy::Cooperative {
            return Err(ConfigError::Invalid(
                "heavy objects (C) need the cooperative policy".into(),
            ));
        }
        let objects = population.objects_a + population.objects_b + population.objects_c;
        if objects > self.cell_count() {
            return Err(ConfigError::Invalid(format!(
                "{} objects do not fit on {} cells",
                objects,
                self.cell_count()
            )));
        }
        if population.agents > self.cell_count() {
            return Err(ConfigError::Invalid(format!(
                "{} agents do not fit on {} cells",
                population.agents,
                self.cell_count()
            )));
        }
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
