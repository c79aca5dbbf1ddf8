// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

pub(crate) mod cleaner;
pub(crate) mod scanner;

use crate::domain::engine::CacheEngine;
use crate::domain::models::CacheTarget;
use crate::infra::cli::reporter::{ConsoleReporter, TargetOverview};
use crate::infra::ledger::LedgerStorage;
use anyhow::bail;
use cleaner::CacheSweepCleaner;
use scanner::CacheSweepScanner;
use std::sync::Arc;

pub use cleaner::CleanSelection;

#[derive(Debug)]
pub enum CacheSweepTask {
    ListTargets,
    ScanTargets,
    CleanTargets(CleanSelection),
    ShowStatistics,
}

pub struct CacheSweep {
    catalog: Vec<CacheTarget>,
    engine: Arc<CacheEngine>,
    scanner: CacheSweepScanner,
    cleaner: CacheSweepCleaner,
    ledger: LedgerStorage,
    console_reporter: ConsoleReporter,
}

impl CacheSweep {
    pub(crate) fn new(
        catalog: Vec<CacheTarget>,
        engine: Arc<CacheEngine>,
        ledger: LedgerStorage,
        console_reporter: ConsoleReporter,
    ) -> Self {
        Self {
            catalog,
            scanner: CacheSweepScanner::new(Arc::clone(&engine)),
            cleaner: CacheSweepCleaner::new(Arc::clone(&engine)),
            engine,
            ledger,
            console_reporter,
        }
    }

    pub async fn execute(mut self, task: CacheSweepTask) -> anyhow::Result<()> {
        match task {
            CacheSweepTask::ListTargets => {
                let overviews = self
                    .catalog
                    .iter()
                    .map(|target| TargetOverview {
                        target,
                        requires_elevation: self.engine.requires_elevated_privileges(&target.path),
                    })
                    .collect::<Vec<_>>();
                self.console_reporter.report_catalog(&overviews);
            },
            CacheSweepTask::ScanTargets => {
                self.console_reporter.report_scan_started(self.catalog.len());
                let scan = self.scanner.scan(&mut self.catalog).await;
                self.console_reporter.report_scan_outcomes(&self.catalog, &scan);
            },
            CacheSweepTask::CleanTargets(selection) => {
                let selected = self.cleaner.select(&self.catalog, &selection)?;
                self.console_reporter.report_clean_started(&selected);
                let outcome = self.cleaner.clean(&selected).await;
                let ledger = self.ledger.record_run(outcome.total_freed)?;
                self.console_reporter.report_clean_outcomes(&outcome, &ledger);

                if outcome.has_failures() {
                    bail!("cachesweep : {} locations could not be cleaned", outcome.errors.len())
                }
            },
            CacheSweepTask::ShowStatistics => {
                let ledger = self.ledger.read()?;
                self.console_reporter.report_statistics(&ledger);
            },
        }

        Ok(())
    }
}
