//! Timed execution of the registered strategies: verify each result
//! against the scalar oracle, render images, and report relative
//! timings.

use super::Strategy;
use crate::field::{scalar, verify, FieldParams};
use crate::render;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed { elapsed_ms: f64 },
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyRun {
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub outcome: RunOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub generated_at: DateTime<Utc>,
    pub runs: Vec<StrategyRun>,
}

impl BenchReport {
    /// Completed runs as `(name, elapsed_ms)` pairs.
    fn completed(&self) -> Vec<(&str, f64)> {
        self.runs
            .iter()
            .filter_map(|run| match run.outcome {
                RunOutcome::Completed { elapsed_ms } => Some((run.name.as_str(), elapsed_ms)),
                _ => None,
            })
            .collect()
    }
}

/// Run every strategy against the same parameters. A failing or
/// unavailable backend is recorded and skipped; it never aborts the
/// remaining strategies. Each successful field is checked cell-for-cell
/// against the scalar oracle before its timing is trusted.
pub fn run_all(
    strategies: &[Box<dyn Strategy>],
    params: &FieldParams,
    out_dir: Option<&Path>,
) -> BenchReport {
    let oracle = scalar::compute(params);
    let mut runs = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        if !strategy.available() {
            warn!("{}: backend unavailable, skipping", strategy.name());
            runs.push(StrategyRun {
                name: strategy.name().to_string(),
                slug: strategy.slug().to_string(),
                outcome: RunOutcome::Skipped {
                    reason: "backend unavailable".to_string(),
                },
            });
            continue;
        }

        info!("running {}", strategy.name());
        let start = Instant::now();
        let outcome = match strategy.compute(params) {
            Ok(field) => {
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                match verify::compare_fields(&oracle, &field) {
                    Ok(()) => {
                        if let Some(dir) = out_dir {
                            let path = dir.join(format!("{}.png", strategy.slug()));
                            if let Err(e) =
                                render::save_field_image(&field, params.max_iterations, &path)
                            {
                                warn!("{}: image not written: {e:#}", strategy.name());
                            }
                        }
                        info!("{} completed in {:.2} ms", strategy.name(), elapsed_ms);
                        RunOutcome::Completed { elapsed_ms }
                    }
                    Err(e) => {
                        warn!("{}: {e}", strategy.name());
                        RunOutcome::Failed {
                            error: format!("equivalence check failed: {e}"),
                        }
                    }
                }
            }
            Err(e) => {
                warn!("{} failed: {e:#}", strategy.name());
                RunOutcome::Failed {
                    error: format!("{e:#}"),
                }
            }
        };
        runs.push(StrategyRun {
            name: strategy.name().to_string(),
            slug: strategy.slug().to_string(),
            outcome,
        });
    }

    BenchReport {
        width: params.width,
        height: params.height,
        max_iterations: params.max_iterations,
        generated_at: Utc::now(),
        runs,
    }
}

pub fn print_header(params: &FieldParams) {
    println!("{}", "=".repeat(60));
    println!("MANDELBROT ESCAPE-TIME BENCHMARK");
    println!("{}", "=".repeat(60));
    println!("Image size: {}x{} pixels", params.width, params.height);
    println!("Max iterations: {}", params.max_iterations);
    println!("{}", "=".repeat(60));
}

pub fn print_results(report: &BenchReport) {
    println!();
    println!("{}", "=".repeat(60));
    println!("BENCHMARK RESULTS");
    println!("{}", "=".repeat(60));
    println!(
        "Configuration: {}x{} pixels, {} max iterations",
        report.width, report.height, report.max_iterations
    );
    println!("{}", "-".repeat(60));

    let completed = report.completed();
    if completed.is_empty() {
        println!("No successful runs to report.");
        return;
    }

    // The SQL engine is the baseline the suite was built to compare
    // against; fall back to the fastest run when it did not complete.
    let baseline = completed
        .iter()
        .find(|(name, _)| name.starts_with("SQLite"))
        .map(|&(_, ms)| ms)
        .unwrap_or_else(|| {
            completed
                .iter()
                .map(|&(_, ms)| ms)
                .fold(f64::INFINITY, f64::min)
        });
    let fastest = completed
        .iter()
        .map(|&(_, ms)| ms)
        .fold(f64::INFINITY, f64::min);

    println!("{:<24} {:>12}   {:>10}", "Strategy", "Time (ms)", "Relative");
    println!("{}", "-".repeat(60));
    for (name, ms) in &completed {
        let marker = if *ms == fastest { "  *" } else { "" };
        println!("{:<24} {:>12.2}   {:>9.2}x{}", name, ms, ms / baseline, marker);
    }
    for run in &report.runs {
        match &run.outcome {
            RunOutcome::Skipped { reason } => {
                println!("{:<24} {:>12}   ({})", run.name, "-", reason);
            }
            RunOutcome::Failed { error } => {
                println!("{:<24} {:>12}   FAILED: {}", run.name, "-", error);
            }
            RunOutcome::Completed { .. } => {}
        }
    }
    println!("{}", "-".repeat(60));
    println!("Baseline: {:.2} ms, fastest marked with *", baseline);
    println!("{}", "=".repeat(60));
}
