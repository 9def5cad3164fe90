//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Parallel scenario test orchestrator for Gherkin-style suites
#[derive(Parser, Debug)]
#[command(name = "cuke-shard")]
#[command(author = "hephaex@gmail.com")]
#[command(version = "0.1.0")]
#[command(about = "Distribute scenario tests across parallel worker processes")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run test units across parallel workers and print the merged summary
    Run(RunArgs),

    /// Show the computed groups and worker commands without executing
    Show(ShowArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Test unit ids: feature paths, optionally with `:line` selectors
    #[arg(required = true)]
    pub units: Vec<String>,

    /// Number of worker processes
    #[arg(short = 'n', long, default_value = "2")]
    pub processes: usize,

    /// Grouping mode (file, scenario, runtime)
    #[arg(short, long, default_value = "file")]
    pub group_by: String,

    /// Base command name of the test framework
    #[arg(long, default_value = "cucumber")]
    pub name: String,

    /// Extra options passed through to the test framework, e.g. "--tags @smoke"
    #[arg(short = 'o', long, allow_hyphen_values = true)]
    pub test_options: Option<String>,

    /// Output format (text, json, json-pretty)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Arguments for show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Test unit ids: feature paths, optionally with `:line` selectors
    #[arg(required = true)]
    pub units: Vec<String>,

    /// Number of worker processes
    #[arg(short = 'n', long, default_value = "2")]
    pub processes: usize,

    /// Grouping mode (file, scenario, runtime)
    #[arg(short, long, default_value = "file")]
    pub group_by: String,

    /// Base command name of the test framework
    #[arg(long, default_value = "cucumber")]
    pub name: String,

    /// Extra options passed through to the test framework
    #[arg(short = 'o', long, allow_hyphen_values = true)]
    pub test_options: Option<String>,

    /// Output format (text, json, json-pretty)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_command() {
        let args = Args::parse_from([
            "cuke-shard",
            "run",
            "-n",
            "4",
            "--group-by",
            "scenario",
            "a.feature:3",
            "b.feature",
        ]);

        match args.command {
            Command::Run(run) => {
                assert_eq!(run.processes, 4);
                assert_eq!(run.group_by, "scenario");
                assert_eq!(run.units, vec!["a.feature:3", "b.feature"]);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_parse_show_with_test_options() {
        let args = Args::parse_from([
            "cuke-shard",
            "show",
            "--test-options",
            "--tags @smoke",
            "a.feature",
        ]);

        match args.command {
            Command::Show(show) => {
                assert_eq!(show.test_options.as_deref(), Some("--tags @smoke"));
                assert_eq!(show.name, "cucumber");
            }
            _ => panic!("expected show command"),
        }
    }

    #[test]
    fn test_units_are_required() {
        assert!(Args::try_parse_from(["cuke-shard", "run"]).is_err());
    }
}
