//! The classic 10-armed testbed: 2000 runs of 1000 steps, epsilon = 0.1.
//!
//! Prints every 100th aggregated row instead of plotting; pipe the full
//! `rows()` output into your plotting tool of choice if you want the
//! figure.
//!
//! Run with: `cargo run --example testbed --release`

use banditbed::{run_experiment, BanditConfig, ExperimentConfig};

fn main() {
    let bandit = BanditConfig {
        exploration_probability: 0.1,
        ..BanditConfig::default()
    };
    let experiment = ExperimentConfig {
        runs: 2000,
        time_steps: 1000,
        seed: 42,
    };

    let result = run_experiment(bandit, experiment).expect("configs are valid");

    println!(
        "{:>6}  {:>12}  {:>18}",
        "step", "mean_reward", "best_action_rate"
    );
    for row in result.rows().iter().step_by(100) {
        println!(
            "{:>6}  {:>12.4}  {:>18.4}",
            row.step, row.mean_reward, row.best_action_rate
        );
    }
    let last = result.rows().last().copied().expect("time_steps > 0");
    println!(
        "{:>6}  {:>12.4}  {:>18.4}",
        last.step, last.mean_reward, last.best_action_rate
    );
}
