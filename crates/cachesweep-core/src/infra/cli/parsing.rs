// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::cachesweep::{CacheSweepTask, CleanSelection};
use crate::infra::catalog::CatalogSource;
use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
struct CleanArguments {
    /// Actually delete cached contents; nothing is removed without it
    #[arg(long)]
    pub confirm: bool,

    /// Restrict cleaning to catalog entries with this name (repeatable)
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,

    /// Leave entries flagged as critical untouched
    #[arg(long)]
    pub skip_critical: bool,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = false)]
struct CliParser {
    #[command(subcommand)]
    pub command: MainCommands,

    /// JSON file with cache locations, replacing the built-in catalog
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand)]
enum MainCommands {
    /// List known cache locations
    List,
    /// Measure every known cache location
    Scan,
    /// Remove the contents of known cache locations
    Clean(CleanArguments),
    /// Show how much space has been reclaimed so far
    Stats,
}

#[derive(Debug)]
pub struct CacheSweepOptions {
    pub catalog_source: CatalogSource,
    pub use_colors: bool,
}

pub fn parse_arguments() -> anyhow::Result<(CacheSweepTask, CacheSweepOptions)> {
    let cli = CliParser::parse();
    evaluate(cli)
}

fn evaluate(cli: CliParser) -> anyhow::Result<(CacheSweepTask, CacheSweepOptions)> {
    let catalog_source = match cli.catalog {
        Some(catalog_file) => {
            if !catalog_file.exists() {
                bail!("cachesweep.cli : no such file or directory ({:?})", catalog_file)
            }
            CatalogSource::JsonFile(catalog_file)
        },
        None => CatalogSource::BuiltIn,
    };

    let task = match cli.command {
        MainCommands::List => CacheSweepTask::ListTargets,
        MainCommands::Scan => CacheSweepTask::ScanTargets,
        MainCommands::Clean(args) => {
            if !args.confirm {
                bail!("cachesweep.cli : refusing to delete anything without --confirm")
            }
            let selection = CleanSelection::new(args.only, args.skip_critical);
            CacheSweepTask::CleanTargets(selection)
        },
        MainCommands::Stats => CacheSweepTask::ShowStatistics,
    };

    let options = CacheSweepOptions {
        catalog_source,
        use_colors: !cli.no_colors,
    };

    Ok((task, options))
}
