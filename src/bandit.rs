//! Epsilon-greedy k-armed bandit core.
//!
//! One [`Bandit`] models a single testbed instance: `arm_count` hidden true
//! means redrawn at every [`reset`](Bandit::reset), a greedy policy over
//! running per-arm estimates, and an epsilon chance per decision of
//! exploring uniformly. Estimates use a fixed-step-size exponential moving
//! average, so they track non-stationary rewards but never collapse to the
//! plain sample mean.
//!
//! Notes:
//! - Seedable, deterministic by default (seed 0), like the rest of the crate.
//! - Greedy ties are broken uniformly among **all** tied arms, not
//!   first-max-wins. With every arm starting at the same initial estimate
//!   the whole arm set ties on the first decision, and collapsing that to
//!   "first max found" skews long-run selection frequencies.

use rand::rngs::StdRng;

use crate::error::Error;
use crate::source::{seeded_source, RandomSource};

/// Configuration for one bandit instance. Immutable after construction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BanditConfig {
    /// Number of arms. Must be positive.
    pub arm_count: usize,
    /// Probability of taking a uniformly random arm instead of the greedy
    /// one. Must be in `[0, 1]`.
    pub exploration_probability: f64,
    /// Starting estimate assigned to every arm at reset. Values above the
    /// expected true means make the policy optimistic (it explores each arm
    /// before settling).
    pub initial_estimate: f64,
    /// Fixed learning-rate weight for the incremental estimate update.
    /// Must be in `(0, 1]`.
    pub step_size: f64,
    /// Additive offset applied to every arm's true mean at reset.
    pub true_reward_offset: f64,
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            arm_count: 10,
            exploration_probability: 0.0,
            initial_estimate: 0.0,
            step_size: 0.1,
            true_reward_offset: 0.0,
        }
    }
}

impl BanditConfig {
    /// Check every parameter range.
    ///
    /// Called by the [`Bandit`] constructors and by
    /// [`run_experiment`](crate::run_experiment) before any state exists.
    pub fn validate(&self) -> Result<(), Error> {
        if self.arm_count == 0 {
            return Err(Error::NoArms);
        }
        if !self.exploration_probability.is_finite()
            || !(0.0..=1.0).contains(&self.exploration_probability)
        {
            return Err(Error::OutOfRange {
                name: "exploration_probability",
                range: "[0, 1]",
                value: self.exploration_probability,
            });
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 || self.step_size > 1.0 {
            return Err(Error::OutOfRange {
                name: "step_size",
                range: "(0, 1]",
                value: self.step_size,
            });
        }
        if !self.initial_estimate.is_finite() {
            return Err(Error::OutOfRange {
                name: "initial_estimate",
                range: "finite",
                value: self.initial_estimate,
            });
        }
        if !self.true_reward_offset.is_finite() {
            return Err(Error::OutOfRange {
                name: "true_reward_offset",
                range: "finite",
                value: self.true_reward_offset,
            });
        }
        Ok(())
    }
}

/// One k-armed bandit run: hidden true values, running estimates, counters.
///
/// Always in a post-reset state: construction validates the config and
/// performs the first [`reset`](Bandit::reset), so `act`/`step` are valid
/// immediately. The per-arm vectors are index-aligned and always have
/// length `arm_count`.
#[derive(Debug, Clone)]
pub struct Bandit<S = StdRng> {
    cfg: BanditConfig,
    true_values: Vec<f64>,
    estimates: Vec<f64>,
    action_counts: Vec<u64>,
    best_action: usize,
    step_count: u64,
    source: S,
}

impl Bandit<StdRng> {
    /// Create a bandit with a deterministic fixed seed (0).
    pub fn new(cfg: BanditConfig) -> Result<Self, Error> {
        Self::with_seed(cfg, 0)
    }

    /// Create a bandit with an explicit seed (reproducible).
    pub fn with_seed(cfg: BanditConfig, seed: u64) -> Result<Self, Error> {
        Self::with_source(cfg, seeded_source(seed))
    }
}

impl<S: RandomSource> Bandit<S> {
    /// Create a bandit driven by an arbitrary [`RandomSource`].
    pub fn with_source(cfg: BanditConfig, source: S) -> Result<Self, Error> {
        cfg.validate()?;
        let k = cfg.arm_count;
        let mut bandit = Self {
            cfg,
            true_values: vec![0.0; k],
            estimates: vec![0.0; k],
            action_counts: vec![0; k],
            best_action: 0,
            step_count: 0,
            source,
        };
        bandit.reset();
        Ok(bandit)
    }

    /// The configuration this bandit was built with.
    pub fn config(&self) -> &BanditConfig {
        &self.cfg
    }

    /// Hidden per-arm true means for the current run.
    ///
    /// Never consulted by the policy; exposed for measurement and tests.
    pub fn true_values(&self) -> &[f64] {
        &self.true_values
    }

    /// Current per-arm estimates.
    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    /// Per-arm selection counts since the last reset.
    pub fn action_counts(&self) -> &[u64] {
        &self.action_counts
    }

    /// Index of the arm with the maximum true value for the current run
    /// (first index on exact ties). Recomputed only at reset.
    pub fn best_action(&self) -> usize {
        self.best_action
    }

    /// Number of `step` calls since the last reset.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Start a fresh run: redraw every arm's true mean (standard normal
    /// plus `true_reward_offset`), refill estimates with
    /// `initial_estimate`, zero the counters, and recompute `best_action`.
    pub fn reset(&mut self) {
        for v in &mut self.true_values {
            *v = self.source.standard_normal() + self.cfg.true_reward_offset;
        }
        self.estimates.fill(self.cfg.initial_estimate);
        self.action_counts.fill(0);
        self.step_count = 0;

        let mut best = 0;
        for i in 1..self.true_values.len() {
            if self.true_values[i] > self.true_values[best] {
                best = i;
            }
        }
        self.best_action = best;
    }

    /// Choose an arm.
    ///
    /// With probability `exploration_probability`, a uniformly random arm;
    /// otherwise a uniform draw among all arms tied (exact `==`) for the
    /// maximum estimate. Mutates only the random source.
    pub fn act(&mut self) -> usize {
        let k = self.cfg.arm_count;
        if self.source.uniform() < self.cfg.exploration_probability {
            return self.source.pick_index(k);
        }

        let q_best = self
            .estimates
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<usize> = self
            .estimates
            .iter()
            .enumerate()
            .filter(|&(_, &q)| q == q_best)
            .map(|(i, _)| i)
            .collect();
        if tied.len() == 1 {
            tied[0]
        } else {
            tied[self.source.pick_index(tied.len())]
        }
    }

    /// Pull `action`: draw its reward (true mean plus unit-variance
    /// Gaussian noise), bump the counters, and fold the reward into the
    /// arm's estimate with the fixed step size.
    ///
    /// Returns the drawn reward, or [`Error::ActionOutOfRange`] before any
    /// mutation if `action >= arm_count`.
    pub fn step(&mut self, action: usize) -> Result<f64, Error> {
        if action >= self.cfg.arm_count {
            return Err(Error::ActionOutOfRange {
                action,
                arm_count: self.cfg.arm_count,
            });
        }
        let reward = self.source.standard_normal() + self.true_values[action];
        self.step_count += 1;
        self.action_counts[action] += 1;
        self.estimates[action] += self.cfg.step_size * (reward - self.estimates[action]);
        Ok(reward)
    }
}
