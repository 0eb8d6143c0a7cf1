//! Experiment driver: many independent trials, per-step aggregation.
//!
//! A trial is `reset` followed by `time_steps` rounds of `act` + `step`.
//! An experiment runs `runs` such trials against one shared
//! [`BanditConfig`], each with its own RNG stream, and reduces the
//! `runs × time_steps` grid of rewards and best-action indicators to two
//! per-step curves: mean reward and best-action selection rate.
//!
//! The reduction goes through [`ExperimentAccumulator`], which keeps only
//! per-step sums and counts. `absorb`/`merge` commute, so per-trial
//! records can be folded in any order (or merged from concurrently-run
//! shards) without changing the statistics.

use crate::bandit::{Bandit, BanditConfig};
use crate::error::Error;
use crate::source::{mix_seed, RandomSource};

/// Configuration for one experiment.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentConfig {
    /// Number of independent trials. Must be positive.
    pub runs: usize,
    /// Steps per trial. Must be positive.
    pub time_steps: usize,
    /// Base seed. Trial `i` runs on its own stream derived via
    /// [`mix_seed`]`(seed, i)`.
    pub seed: u64,
}

impl Default for ExperimentConfig {
    /// The classic testbed shape: 2000 runs of 1000 steps.
    fn default() -> Self {
        Self {
            runs: 2000,
            time_steps: 1000,
            seed: 0,
        }
    }
}

impl ExperimentConfig {
    /// Reject empty experiments before any simulation starts.
    pub fn validate(&self) -> Result<(), Error> {
        if self.runs == 0 {
            return Err(Error::EmptyExperiment { name: "runs" });
        }
        if self.time_steps == 0 {
            return Err(Error::EmptyExperiment { name: "time_steps" });
        }
        Ok(())
    }
}

/// Per-step record of a single trial.
#[derive(Debug, Clone)]
pub struct TrialRecord {
    /// Reward drawn at each step.
    pub rewards: Vec<f64>,
    /// Whether the chosen arm was the trial's `best_action`, per step.
    pub best_hits: Vec<bool>,
}

/// Order-independent reduction over [`TrialRecord`]s.
///
/// Per-step reward sums plus best-hit counts; divide by the number of
/// absorbed trials at [`finish`](ExperimentAccumulator::finish).
#[derive(Debug, Clone)]
pub struct ExperimentAccumulator {
    reward_sums: Vec<f64>,
    best_hit_counts: Vec<u64>,
    trials: u64,
}

impl ExperimentAccumulator {
    /// Empty accumulator for trials of `time_steps` steps.
    pub fn new(time_steps: usize) -> Self {
        Self {
            reward_sums: vec![0.0; time_steps],
            best_hit_counts: vec![0; time_steps],
            trials: 0,
        }
    }

    /// Number of trials absorbed so far.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Fold one trial into the sums. The record must have the step count
    /// this accumulator was built for.
    pub fn absorb(&mut self, record: &TrialRecord) {
        debug_assert_eq!(record.rewards.len(), self.reward_sums.len());
        debug_assert_eq!(record.best_hits.len(), self.best_hit_counts.len());
        for (sum, &r) in self.reward_sums.iter_mut().zip(&record.rewards) {
            *sum += r;
        }
        for (count, &hit) in self.best_hit_counts.iter_mut().zip(&record.best_hits) {
            *count += u64::from(hit);
        }
        self.trials += 1;
    }

    /// Combine another accumulator into this one (e.g. a shard of trials
    /// run elsewhere). Both must have the same step count.
    pub fn merge(&mut self, other: &ExperimentAccumulator) {
        debug_assert_eq!(other.reward_sums.len(), self.reward_sums.len());
        for (sum, &r) in self.reward_sums.iter_mut().zip(&other.reward_sums) {
            *sum += r;
        }
        for (count, &c) in self.best_hit_counts.iter_mut().zip(&other.best_hit_counts) {
            *count += c;
        }
        self.trials += other.trials;
    }

    /// Per-step means across all absorbed trials.
    pub fn finish(&self) -> ExperimentResult {
        let n = self.trials.max(1) as f64;
        ExperimentResult {
            mean_rewards: self.reward_sums.iter().map(|&s| s / n).collect(),
            best_action_rate: self
                .best_hit_counts
                .iter()
                .map(|&c| c as f64 / n)
                .collect(),
        }
    }
}

/// Aggregated output of an experiment: two curves of length `time_steps`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentResult {
    /// Mean reward per step index, across trials.
    pub mean_rewards: Vec<f64>,
    /// Fraction of trials that chose their best arm, per step index.
    pub best_action_rate: Vec<f64>,
}

/// A compact, log-ready row for one time step of an aggregated experiment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRow {
    pub step: usize,
    pub mean_reward: f64,
    pub best_action_rate: f64,
}

impl ExperimentResult {
    /// Number of steps per trial.
    pub fn time_steps(&self) -> usize {
        self.mean_rewards.len()
    }

    /// Per-step rows, ready for any external plotting/reporting collaborator.
    pub fn rows(&self) -> Vec<StepRow> {
        self.mean_rewards
            .iter()
            .zip(&self.best_action_rate)
            .enumerate()
            .map(|(step, (&mean_reward, &best_action_rate))| StepRow {
                step,
                mean_reward,
                best_action_rate,
            })
            .collect()
    }
}

/// Run one trial: `reset`, then `time_steps` rounds of `act` + `step`.
pub fn run_trial<S: RandomSource>(
    bandit: &mut Bandit<S>,
    time_steps: usize,
) -> Result<TrialRecord, Error> {
    if time_steps == 0 {
        return Err(Error::EmptyExperiment { name: "time_steps" });
    }
    bandit.reset();
    let mut rewards = Vec::with_capacity(time_steps);
    let mut best_hits = Vec::with_capacity(time_steps);
    for _ in 0..time_steps {
        let action = bandit.act();
        let reward = bandit.step(action)?;
        rewards.push(reward);
        best_hits.push(action == bandit.best_action());
    }
    Ok(TrialRecord { rewards, best_hits })
}

/// Run `runs` independent trials and aggregate them.
///
/// Both configs are validated before any simulation starts. Each trial
/// gets a fresh [`Bandit`] on its own [`mix_seed`]-derived stream, so the
/// whole experiment is reproducible from `exp_cfg.seed` and trials stay
/// statistically independent.
pub fn run_experiment(
    bandit_cfg: BanditConfig,
    exp_cfg: ExperimentConfig,
) -> Result<ExperimentResult, Error> {
    bandit_cfg.validate()?;
    exp_cfg.validate()?;

    let mut acc = ExperimentAccumulator::new(exp_cfg.time_steps);
    for trial in 0..exp_cfg.runs {
        let mut bandit = Bandit::with_seed(bandit_cfg, mix_seed(exp_cfg.seed, trial as u64))?;
        let record = run_trial(&mut bandit, exp_cfg.time_steps)?;
        acc.absorb(&record);
    }
    Ok(acc.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_exp(runs: usize, time_steps: usize) -> ExperimentConfig {
        ExperimentConfig {
            runs,
            time_steps,
            seed: 99,
        }
    }

    #[test]
    fn rejects_empty_experiments() {
        let cfg = BanditConfig::default();
        assert_eq!(
            run_experiment(cfg, small_exp(0, 10)).unwrap_err(),
            Error::EmptyExperiment { name: "runs" }
        );
        assert_eq!(
            run_experiment(cfg, small_exp(10, 0)).unwrap_err(),
            Error::EmptyExperiment { name: "time_steps" }
        );
    }

    #[test]
    fn invalid_bandit_config_fails_before_simulation() {
        let bad = BanditConfig {
            step_size: 0.0,
            ..BanditConfig::default()
        };
        assert!(matches!(
            run_experiment(bad, small_exp(5, 5)),
            Err(Error::OutOfRange {
                name: "step_size",
                ..
            })
        ));
    }

    #[test]
    fn result_curves_have_time_steps_length() {
        let r = run_experiment(BanditConfig::default(), small_exp(8, 40)).unwrap();
        assert_eq!(r.mean_rewards.len(), 40);
        assert_eq!(r.best_action_rate.len(), 40);
        assert_eq!(r.time_steps(), 40);
        assert!(r.best_action_rate.iter().all(|&p| (0.0..=1.0).contains(&p)));
        assert!(r.mean_rewards.iter().all(|m| m.is_finite()));
    }

    #[test]
    fn rows_are_aligned_with_the_curves() {
        let r = run_experiment(BanditConfig::default(), small_exp(4, 12)).unwrap();
        let rows = r.rows();
        assert_eq!(rows.len(), 12);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.step, i);
            assert_eq!(row.mean_reward, r.mean_rewards[i]);
            assert_eq!(row.best_action_rate, r.best_action_rate[i]);
        }
    }

    #[test]
    fn same_seed_reproduces_the_result() {
        let cfg = BanditConfig {
            exploration_probability: 0.1,
            ..BanditConfig::default()
        };
        let a = run_experiment(cfg, small_exp(10, 30)).unwrap();
        let b = run_experiment(cfg, small_exp(10, 30)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let cfg = BanditConfig {
            exploration_probability: 0.1,
            ..BanditConfig::default()
        };
        let a = run_experiment(cfg, small_exp(5, 20)).unwrap();
        let b = run_experiment(
            cfg,
            ExperimentConfig {
                seed: 100,
                ..small_exp(5, 20)
            },
        )
        .unwrap();
        assert_ne!(a.mean_rewards, b.mean_rewards);
    }

    #[test]
    fn merged_shards_match_a_single_accumulator() {
        let cfg = BanditConfig {
            exploration_probability: 0.2,
            ..BanditConfig::default()
        };
        let steps = 25;
        let records: Vec<TrialRecord> = (0..12u64)
            .map(|t| {
                let mut b = Bandit::with_seed(cfg, mix_seed(7, t)).unwrap();
                run_trial(&mut b, steps).unwrap()
            })
            .collect();

        let mut whole = ExperimentAccumulator::new(steps);
        for r in &records {
            whole.absorb(r);
        }

        let (left, right) = records.split_at(5);
        let mut shard_a = ExperimentAccumulator::new(steps);
        let mut shard_b = ExperimentAccumulator::new(steps);
        for r in left {
            shard_a.absorb(r);
        }
        for r in right {
            shard_b.absorb(r);
        }
        shard_a.merge(&shard_b);

        assert_eq!(shard_a.trials(), whole.trials());
        let merged = shard_a.finish();
        let direct = whole.finish();
        assert_eq!(merged.best_action_rate, direct.best_action_rate);
        for (m, d) in merged.mean_rewards.iter().zip(&direct.mean_rewards) {
            assert!((m - d).abs() < 1e-9, "m={m} d={d}");
        }
    }

    #[test]
    fn run_trial_leaves_bandit_bookkeeping_consistent() {
        let mut b = Bandit::with_seed(BanditConfig::default(), 31).unwrap();
        let record = run_trial(&mut b, 50).unwrap();
        assert_eq!(record.rewards.len(), 50);
        assert_eq!(record.best_hits.len(), 50);
        assert_eq!(b.step_count(), 50);
        assert_eq!(b.action_counts().iter().sum::<u64>(), 50);
    }
}
