//! Response Functions
//!
//! Probability of picking up or dropping an object as a function of the
//! locally perceived density `f`. Rare kinds get picked up, dense areas
//! receive drops.

use rand::Rng;

use crate::components::agent::Agent;
use crate::config::{BehaviorConfig, Policy};

/// `(kp / (kp + f))^2`
pub fn pick_up_probability(kp: f64, f: f64) -> f64 {
    let ratio = kp / (kp + f);
    ratio * ratio
}

/// `(f / (km + f))^2`
pub fn drop_probability(km: f64, f: f64) -> f64 {
    let ratio = f / (km + f);
    ratio * ratio
}

/// Density estimate for the agent's latest percept, with perceptual error
/// when the policy calls for it.
pub fn local_density(agent: &Agent, behavior: &BehaviorConfig) -> f64 {
    match behavior.policy {
        Policy::BasicWithError => agent.memory.density_with_error(behavior.error_rate),
        Policy::Basic | Policy::Cooperative => agent.memory.density(),
    }
}

/// Bernoulli trial.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}
