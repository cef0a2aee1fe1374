//! Dialoglint CLI - dialog template validation.
//!
//! Validates every module of a repository and prints a per-module report.
//! Exit status is 1 when any module has errors.

use anyhow::Context;
use clap::Parser;
use dialoglint::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dialoglint", version, about = "Validate voice-assistant module dialog templates")]
struct Cli {
    /// Repository root (the directory containing PublishedModules).
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Validate only the named modules (repeatable).
    #[arg(short, long = "module")]
    modules: Vec<String>,

    /// Increase output detail (-v shows warnings, -vv shows passing modules).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit the full report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let repository = ModuleRepository::new(&cli.root);
    let pipeline = ValidationPipeline::default_pipeline()?;
    let only = if cli.modules.is_empty() {
        None
    } else {
        Some(cli.modules.as_slice())
    };
    let report = pipeline
        .validate_repository(&repository, only)
        .with_context(|| format!("validating repository at {}", cli.root.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, cli.verbose);
    }

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(report: &RepositoryReport, verbosity: u8) {
    for module in report.modules.values() {
        let show_warnings = verbosity >= 1;
        let interesting =
            module.has_errors() || (show_warnings && !module.warnings().is_empty());
        if !interesting && verbosity < 2 {
            continue;
        }

        println!("{}", module.summary());
        for line in module.detailed_issues(show_warnings) {
            for (index, part) in line.lines().enumerate() {
                if index == 0 {
                    println!("   {}", part);
                } else {
                    println!("   {}", part.trim_start());
                }
            }
        }
    }

    println!();
    println!("{} ({}ms)", report.summary(), report.duration_ms);
}
