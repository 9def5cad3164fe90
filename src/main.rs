//! cuke-shard - Parallel Scenario Test Orchestrator
//!
//! A CLI tool that distributes Gherkin-style test units across a fixed number
//! of worker processes, synthesizes the right invocation for each worker, and
//! merges the per-worker result summaries into one canonical total.
//!
//! ## Features
//!
//! - File-, scenario-, and runtime-balanced distribution of test units
//! - Automatic executable resolution (bin/, bundler, script/, PATH)
//! - Auto-selection of a `parallel` profile from the framework's config file
//! - Canonically ordered, correctly pluralized merged result summary
//!
//! ## Usage
//!
//! ```bash
//! # Run feature files across 4 workers
//! cuke-shard run -n 4 features/login.feature features/cart.feature
//!
//! # Distribute at scenario granularity with extra framework options
//! cuke-shard run -n 2 --group-by scenario -o "--tags @smoke" features/a.feature:3 features/a.feature:7
//!
//! # Preview the distribution without executing anything
//! cuke-shard show -n 4 features/*.feature
//! ```

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

mod cli;
mod command;
mod error;
mod executor;
mod grouper;
mod models;
mod output;
mod partition;
mod summary;
mod utils;

use cli::Args;
use command::{CommandSynthesizer, DiskProbe};
use executor::{ParallelRunner, ShellExecutor};
use models::{GroupMode, RunPlan, TestUnitId, WorkerOptions};
use output::{OutputFormat, ReportFormatter};
use partition::{Partitioner, RuntimePartitioner};
use utils::logger::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    match args.command {
        cli::Command::Run(run_args) => run(run_args).await,
        cli::Command::Show(show_args) => show(show_args),
    }
}

async fn run(args: cli::RunArgs) -> Result<()> {
    let options =
        worker_options(&args.group_by, args.test_options.as_deref())?.detect_interactive();
    let plan = build_plan(&args.units, args.processes, &args.name, &options)?;

    info!(
        "Distributing {} unit(s) across {} worker(s)",
        args.units.len(),
        plan.num_workers()
    );

    let runner = ParallelRunner::new(Arc::new(ShellExecutor));
    let report = runner.run(plan.commands, &options).await;

    let format = OutputFormat::from_str(&args.format).unwrap_or(OutputFormat::Text);
    println!("{}", ReportFormatter::new(format).format_report(&report));

    if !report.success {
        std::process::exit(1);
    }
    Ok(())
}

fn show(args: cli::ShowArgs) -> Result<()> {
    let options = worker_options(&args.group_by, args.test_options.as_deref())?;
    let plan = build_plan(&args.units, args.processes, &args.name, &options)?;

    let format = OutputFormat::from_str(&args.format).unwrap_or(OutputFormat::Text);
    println!("{}", ReportFormatter::new(format).format_plan(&plan));
    Ok(())
}

fn worker_options(group_by: &str, test_options: Option<&str>) -> Result<WorkerOptions> {
    let mode = GroupMode::from_str(group_by)
        .ok_or_else(|| anyhow::anyhow!("Unknown grouping mode: {group_by}"))?;
    let test_args = test_options
        .map(|s| s.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    Ok(WorkerOptions::new(mode).with_test_args(test_args))
}

/// Partition the discovered units, regroup each worker's slice, and
/// synthesize one command per worker.
fn build_plan(
    units: &[String],
    processes: usize,
    name: &str,
    options: &WorkerOptions,
) -> Result<RunPlan> {
    let ids: Vec<TestUnitId> = units.iter().map(|u| TestUnitId::new(u.as_str())).collect();

    let synthesizer = CommandSynthesizer::new(name, DiskProbe);
    let partitioner = RuntimePartitioner::new(DiskProbe, synthesizer.runtime_log());

    let groups = partitioner.partition(&ids, processes, options);

    let mut commands = Vec::with_capacity(groups.len());
    for group in &groups {
        let grouped = grouper::group(group, options.group_by);
        commands.push(synthesizer.build(&grouped, options)?);
    }

    Ok(RunPlan { groups, commands })
}
