use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use mc_config::MockCondConfig;
use mc_lang::LexMode;

mod check;
mod eval;
mod tracing_init;

use eval::{RequestSpec, parse_header, parse_query};
use tracing_init::init_tracing;

#[derive(Parser)]
#[command(name = "mockcond", about = "Check and evaluate mock endpoint conditions")]
struct Cli {
    /// Path to mockcond.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report syntax errors, semantic errors and lint warnings
    Check {
        /// Files containing `>` condition lines
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Evaluate a condition block against a simulated request
    Eval {
        /// File containing `>` condition lines
        #[arg(short, long, conflicts_with = "expr")]
        file: Option<PathBuf>,
        /// Condition line; repeat for a multi-line block
        #[arg(short, long, required_unless_present = "file")]
        expr: Vec<String>,
        #[arg(long, default_value_t = 1)]
        call_count: u64,
        #[arg(long, default_value = "GET")]
        method: String,
        #[arg(long, default_value = "/")]
        path: String,
        /// Request header as NAME:VALUE
        #[arg(long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
        /// Query parameter as KEY=VALUE
        #[arg(long = "query", value_parser = parse_query)]
        query: Vec<(String, String)>,
        /// Request body; parsed as JSON when possible
        #[arg(long)]
        body: Option<String>,
        /// Seed for the random builtins, overrides `[eval] seed`
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn load_config(path: Option<&Path>) -> Result<(MockCondConfig, PathBuf)> {
    match path {
        Some(path) => {
            let path = path
                .canonicalize()
                .map_err(|e| anyhow::anyhow!("config path '{}': {e}", path.display()))?;
            let config = MockCondConfig::load(&path)?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            Ok((config, base_dir))
        }
        None => Ok((MockCondConfig::default(), std::env::current_dir()?)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, base_dir) = load_config(cli.config.as_deref())?;
    let _guard = init_tracing(&config.logging, &base_dir)?;

    let mode = if config.lexer.strict {
        LexMode::Strict
    } else {
        LexMode::Lenient
    };
    tracing::debug!(domain = "sys", ?mode, on_error = ?config.eval.on_error, "configuration loaded");

    match cli.command {
        Commands::Check { files } => check::run(&files, mode)?,
        Commands::Eval {
            file,
            expr,
            call_count,
            method,
            path,
            headers,
            query,
            body,
            seed,
        } => {
            let text = match file {
                Some(file) => std::fs::read_to_string(&file)
                    .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?,
                None => eval::block_from_exprs(&expr),
            };
            let request = RequestSpec {
                method,
                path,
                headers,
                query,
                body,
            }
            .build();
            let report = eval::evaluate_text(&text, request, call_count, seed, &config)?;
            eval::print_report(&report);
        }
    }

    Ok(())
}
