//! `banditbed`: epsilon-greedy k-armed bandit testbed.
//!
//! A small, seedable simulation core for the classic "k-armed testbed"
//! experiment: `arm_count` arms with hidden Gaussian true means, a policy
//! that is greedy over running estimates except for an epsilon chance of
//! exploring uniformly, and a driver that repeats the whole thing across
//! many independent trials and averages the per-step statistics.
//!
//! A [`Bandit`] exposes exactly three operations:
//! - [`Bandit::reset`]: start a fresh run — redraw the hidden true means,
//!   refill estimates with the configured initial value, zero the counters.
//! - [`Bandit::act`]: choose an arm. Greedy ties are broken uniformly among
//!   **all** tied arms (this matters: every arm ties on the first decision).
//! - [`Bandit::step`]: pull an arm — reward is the arm's true mean plus
//!   unit-variance Gaussian noise, folded into the arm's estimate with a
//!   fixed step size (an exponential moving average, so the policy keeps
//!   adapting under non-stationarity instead of converging to the sample
//!   mean).
//!
//! The experiment layer ([`run_experiment`], [`run_trial`],
//! [`ExperimentAccumulator`]) reduces a `runs × time_steps` grid of
//! rewards and best-action indicators to two curves: mean reward per step
//! and best-action selection rate per step (a regret proxy). The
//! reduction is a per-step sum, so shards of trials can be merged in any
//! order.
//!
//! **Goals:**
//! - **Deterministic by default**: every stochastic component is seedable,
//!   and default construction uses a fixed seed.
//! - **Injectable randomness**: the [`RandomSource`] trait covers the three
//!   draws the simulation needs; any `rand::Rng` satisfies it, and tests
//!   can script exact sequences.
//! - **Fail before mutating**: every argument-range violation surfaces as
//!   an [`Error`] before any simulation state changes.
//!
//! **Non-goals:**
//! - No plotting or dashboards: [`ExperimentResult::rows`] hands per-step
//!   rows to whatever reporting collaborator the caller prefers.
//! - No persistence, no I/O, no CLI surface.
//!
//! # Example
//!
//! ```rust
//! use banditbed::{run_experiment, BanditConfig, ExperimentConfig};
//!
//! let bandit = BanditConfig {
//!     exploration_probability: 0.1,
//!     ..BanditConfig::default()
//! };
//! let experiment = ExperimentConfig {
//!     runs: 50,
//!     time_steps: 200,
//!     seed: 42,
//! };
//! let result = run_experiment(bandit, experiment)?;
//! assert_eq!(result.time_steps(), 200);
//! # Ok::<(), banditbed::Error>(())
//! ```

mod error;
pub use error::*;

mod source;
pub use source::*;

mod bandit;
pub use bandit::*;

mod experiment;
pub use experiment::*;

pub const BANDITBED_VERSION: &str = env!("CARGO_PKG_VERSION");
