//! task-nsga CLI - order tasks with NSGA-II.
//!
//! Reads a JSON request (or a bare array of tasks) from a file or stdin and
//! prints the optimization result as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use task_nsga::{OptimizeRequest, Task, TaskOptimizer};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "task-nsga")]
#[command(about = "Multi-objective task ordering with NSGA-II", long_about = None)]
struct Cli {
    /// Request file; reads stdin when omitted
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
    /// Population size
    #[arg(long)]
    pop_size: Option<usize>,
    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,
    /// Maximum number of solutions to return (at most 10)
    #[arg(long)]
    max_solutions: Option<usize>,
    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
    /// Log filter, overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

/// Accepted input shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Input {
    Request(OptimizeRequest),
    Tasks(Vec<Task>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let raw = read_input(cli.input.as_ref())?;
    let mut request = match serde_json::from_str::<Input>(&raw).context("failed to parse request JSON")? {
        Input::Request(request) => request,
        Input::Tasks(tasks) => OptimizeRequest::new(tasks),
    };
    if let Some(seed) = cli.seed {
        request.seed = seed;
    }
    if let Some(n) = cli.pop_size {
        request.pop_size = Some(n);
    }
    if let Some(n) = cli.generations {
        request.n_gen = Some(n);
    }
    if let Some(n) = cli.max_solutions {
        request.max_solutions = n;
    }
    debug!(tasks = request.tasks.len(), seed = request.seed, "request loaded");

    let result = TaskOptimizer::new()
        .optimize(&request)
        .context("optimization rejected")?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{output}");
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
