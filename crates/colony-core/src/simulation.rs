//! Simulation Driver
//!
//! Owns the grid, the agent table and the marker store. One tick runs every
//! agent once, in ascending id order, each perceiving and acting before the
//! next one starts. Later agents see what earlier agents did in the same tick.

use colony_events::{AgentId, ColonyEvent, GridSnapshot, ObjectKind, Position};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::components::agent::Agent;
use crate::components::grid::{Grid, Occupant};
use crate::components::pheromone::MarkerStore;
use crate::config::{FrameControl, PopulationConfig, SimConfig};
use crate::error::{SimError, SimResult};
use crate::events::TickEvents;
use crate::output;
use crate::setup::{self, SpawnSummary};
use crate::systems;
use crate::SimRng;

#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) grid: Grid,
    pub(crate) agents: Vec<Agent>,
    pub(crate) markers: MarkerStore,
    pub(crate) rng: SimRng,
    pub(crate) events: TickEvents,
    pub(crate) tick: u64,
    spawned: SpawnSummary,
}

impl Simulation {
    /// Builds a board populated from the config, seeded for reproducibility.
    pub fn new(config: SimConfig, seed: u64) -> SimResult<Self> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    /// Builds a populated board driven by the given random source.
    pub fn with_rng(config: SimConfig, rng: SmallRng) -> SimResult<Self> {
        let mut sim = Self::bare(config, rng)?;
        sim.spawned = setup::populate(&mut sim)?;
        Ok(sim)
    }

    /// Builds an empty board; objects and agents are added by hand with
    /// `place_object` and `spawn_agent`. The config's population is ignored.
    pub fn empty(mut config: SimConfig, seed: u64) -> SimResult<Self> {
        config.population = PopulationConfig::none();
        Self::bare(config, SmallRng::seed_from_u64(seed))
    }

    fn bare(config: SimConfig, rng: SmallRng) -> SimResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid.width, config.grid.height);
        Ok(Self {
            config,
            grid,
            agents: Vec::new(),
            markers: MarkerStore::new(),
            rng: SimRng(rng),
            events: TickEvents::new(),
            tick: 0,
            spawned: SpawnSummary::default(),
        })
    }

    /// Puts an object on a cell. Fails if the cell holds another kind.
    pub fn place_object(&mut self, kind: ObjectKind, position: Position) -> SimResult<()> {
        self.grid.place_at(Occupant::Object(kind), position)
    }

    /// Adds an agent with empty memory. Ids follow spawn order.
    pub fn spawn_agent(&mut self, position: Position) -> SimResult<AgentId> {
        let id = AgentId(self.agents.len());
        self.grid.place_at(Occupant::Agent(id), position)?;
        self.agents.push(Agent::new(
            id,
            position,
            self.config.behavior.memory_capacity(),
        ));
        Ok(id)
    }

    /// Runs every agent once.
    pub fn tick(&mut self) -> SimResult<()> {
        self.tick += 1;
        for index in 0..self.agents.len() {
            systems::step_agent(self, AgentId(index))?;
        }
        Ok(())
    }

    /// Runs `ticks` ticks, stopping at the first fatal error.
    pub fn run(&mut self, ticks: u64) -> SimResult<()> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    /// Advances one presentation frame. Returns the number of ticks run,
    /// zero while paused.
    pub fn advance_frame(&mut self, frame: &FrameControl) -> SimResult<u32> {
        if !frame.is_running() {
            return Ok(0);
        }
        let steps = frame.steps_per_frame();
        for _ in 0..steps {
            self.tick()?;
        }
        Ok(steps)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Agents in iteration order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub(crate) fn agent_ref(&self, id: AgentId) -> SimResult<&Agent> {
        self.agents.get(id.index()).ok_or(SimError::UnknownAgent(id))
    }

    pub(crate) fn agent_mut(&mut self, id: AgentId) -> SimResult<&mut Agent> {
        self.agents
            .get_mut(id.index())
            .ok_or(SimError::UnknownAgent(id))
    }

    pub fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    /// What the initial scatter placed; empty for hand-built boards.
    pub fn spawn_summary(&self) -> SpawnSummary {
        self.spawned
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[ColonyEvent] {
        self.events.as_slice()
    }

    pub fn drain_events(&mut self) -> Vec<ColonyEvent> {
        self.events.drain()
    }

    /// Renderable view of the board.
    pub fn snapshot(&self) -> GridSnapshot {
        output::snapshot::capture(self)
    }
}
