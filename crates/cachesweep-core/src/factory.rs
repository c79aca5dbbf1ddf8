// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::cachesweep::CacheSweep;
use crate::domain::engine::CacheEngine;
use crate::domain::executors::{ElevatedExecutor, ShellExecutor};
use crate::domain::privileges::PrivilegePolicy;
use crate::domain::probes::chained::SizeProbe;
use crate::infra::catalog::CatalogLoader;
use crate::infra::cli::parsing::CacheSweepOptions;
use crate::infra::cli::reporter::ConsoleReporter;
use crate::infra::ledger::LedgerStorage;
use crate::infra::system::launchers::PosixShell;
use std::env::home_dir;
use std::sync::Arc;

fn cache_engine() -> CacheEngine {
    CacheEngine::new(
        SizeProbe::default(),
        ShellExecutor::Posix(PosixShell),
        ElevatedExecutor::platform_default(),
        PrivilegePolicy::default(),
    )
}

pub fn create_cachesweep(options: CacheSweepOptions) -> anyhow::Result<CacheSweep> {
    let catalog = CatalogLoader::new(home_dir()).load(&options.catalog_source)?;
    let console_reporter = ConsoleReporter::new(options.use_colors);
    Ok(CacheSweep::new(catalog, Arc::new(cache_engine()), LedgerStorage::get(), console_reporter))
}
