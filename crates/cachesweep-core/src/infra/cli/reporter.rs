// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::models::{CacheTarget, CleanOutcome, ScanResult};
use crate::infra::ledger::FreedBytesLedger;
use comfy_table::Table;
use console::{StyledObject, style};

static KILOBYTE: u64 = 1_000;
static MEGABYTE: u64 = 1_000_000;
static GIGABYTE: u64 = 1_000_000_000;

/// Decimal file-style rendering (1 KB = 1000 bytes).
pub fn format_bytes(bytes: u64) -> String {
    match bytes {
        0 => "0 KB".to_string(),
        _ if bytes < MEGABYTE => format!("{} KB", bytes.div_ceil(KILOBYTE).min(999)),
        _ if bytes < GIGABYTE => format!("{:.1} MB", bytes as f64 / MEGABYTE as f64),
        _ => format!("{:.2} GB", bytes as f64 / GIGABYTE as f64),
    }
}

pub struct TargetOverview<'a> {
    pub target: &'a CacheTarget,
    pub requires_elevation: bool,
}

#[derive(Default)]
pub struct ConsoleReporter {
    use_colors: bool,
}

impl ConsoleReporter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn report_catalog(&self, overviews: &[TargetOverview<'_>]) {
        println!();
        println!("Known cache locations : ");
        println!();

        let mut table = Table::new();
        table.set_header(vec!["Name", "Path", "Critical", "Needs admin"]);
        overviews.iter().for_each(|overview| {
            table.add_row(vec![
                overview.target.name.clone(),
                overview.target.path.display().to_string(),
                yes_or_no(overview.target.is_critical).to_string(),
                yes_or_no(overview.requires_elevation).to_string(),
            ]);
        });

        println!("{table}");
        println!();
    }

    pub fn report_scan_started(&self, total_targets: usize) {
        println!();
        println!("Scanning {} cache locations. This operation may take some time ...", total_targets);
    }

    pub fn report_scan_outcomes(&self, targets: &[CacheTarget], scan: &ScanResult) {
        println!();

        let mut table = Table::new();
        table.set_header(vec!["Name", "Path", "Size"]);
        targets.iter().for_each(|target| {
            let size = match scan.is_unreadable(&target.path) {
                true => format!("{} (unreadable)", format_bytes(0)),
                false => format_bytes(target.size),
            };
            table.add_row(vec![target.name.clone(), target.path.display().to_string(), size]);
        });

        println!("{table}");
        println!();
        println!("• total reclaimable : {}", self.cyan(format_bytes(scan.total_bytes())));
        println!();
    }

    pub fn report_clean_started(&self, targets: &[CacheTarget]) {
        println!();
        println!("Cleaning {} cache locations ...", targets.len());
        println!();
        targets
            .iter()
            .for_each(|target| println!("• {}", target));
    }

    pub fn report_clean_outcomes(&self, outcome: &CleanOutcome, ledger: &FreedBytesLedger) {
        println!();

        if outcome.has_failures() {
            println!("Failures : ");
            println!();
            outcome
                .errors
                .iter()
                .for_each(|(path, failure)| println!("• {} : {}", path.display(), self.red(failure)));
            println!();
        }

        println!("• freed in this run : {}", self.cyan(format_bytes(outcome.total_freed)));
        println!("• freed so far : {}", self.cyan(format_bytes(ledger.total_freed_bytes)));
        println!();
    }

    pub fn report_statistics(&self, ledger: &FreedBytesLedger) {
        println!();
        println!("Statistics : ");
        println!();
        println!("• total freed : {}", self.cyan(format_bytes(ledger.total_freed_bytes)));
        println!("• clean runs : {}", self.cyan(ledger.clean_runs));
        println!("• freed in last run : {}", self.cyan(format_bytes(ledger.last_run_freed_bytes)));
        println!();
    }

    fn cyan<T>(&self, what: T) -> StyledObject<T> {
        match self.use_colors {
            true => style(what).cyan(),
            false => style(what),
        }
    }

    fn red<T>(&self, what: T) -> StyledObject<T> {
        match self.use_colors {
            true => style(what).red(),
            false => style(what),
        }
    }
}

fn yes_or_no(flag: bool) -> &'static str {
    match flag {
        true => "yes",
        false => "no",
    }
}
