// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::engine::CacheEngine;
use crate::domain::models::{CacheTarget, CleanOutcome};
use anyhow::bail;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CleanSelection {
    pub names: Vec<String>,
    pub skip_critical: bool,
}

impl CleanSelection {
    pub fn new(names: Vec<String>, skip_critical: bool) -> Self {
        Self { names, skip_critical }
    }

    fn includes(&self, target: &CacheTarget) -> bool {
        if self.skip_critical && target.is_critical {
            return false;
        }

        self.names.is_empty() || self.names.iter().any(|name| name.eq_ignore_ascii_case(&target.name))
    }
}

pub(crate) struct CacheSweepCleaner {
    engine: Arc<CacheEngine>,
}

impl CacheSweepCleaner {
    pub fn new(engine: Arc<CacheEngine>) -> Self {
        Self { engine }
    }

    pub fn select(&self, catalog: &[CacheTarget], selection: &CleanSelection) -> anyhow::Result<Vec<CacheTarget>> {
        let unknown = selection
            .names
            .iter()
            .filter(|name| !catalog.iter().any(|target| target.name.eq_ignore_ascii_case(name)))
            .cloned()
            .collect::<Vec<_>>();

        if !unknown.is_empty() {
            bail!("cachesweep.cleaner : unknown cache locations {:?}", unknown)
        }

        let selected = catalog
            .iter()
            .filter(|target| selection.includes(target))
            .cloned()
            .collect();

        Ok(selected)
    }

    pub async fn clean(&self, targets: &[CacheTarget]) -> CleanOutcome {
        let paths = targets.iter().map(|target| target.path.clone()).collect::<Vec<_>>();

        log::info!("[cachesweep.cleaner] starting cleanup for {} targets", paths.len());
        let outcome = self.engine.clean(&paths).await;
        log::info!(
            "[cachesweep.cleaner] finished cleanup | freed = {} bytes, failures = {}",
            outcome.total_freed,
            outcome.errors.len()
        );

        outcome
    }
}
