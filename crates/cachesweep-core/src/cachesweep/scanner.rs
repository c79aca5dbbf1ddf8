// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::engine::CacheEngine;
use crate::domain::models::{CacheTarget, ScanResult};
use std::sync::Arc;

pub(crate) struct CacheSweepScanner {
    engine: Arc<CacheEngine>,
}

impl CacheSweepScanner {
    pub fn new(engine: Arc<CacheEngine>) -> Self {
        Self { engine }
    }

    /// Scans every target and overwrites its last measured size.
    pub async fn scan(&self, targets: &mut [CacheTarget]) -> ScanResult {
        let paths = targets.iter().map(|target| target.path.clone()).collect::<Vec<_>>();

        log::info!("[cachesweep.scanner] starting scan for {} targets", paths.len());
        let scan = self.engine.scan(&paths).await;
        log::info!("[cachesweep.scanner] finished scan for {} targets", paths.len());

        targets
            .iter_mut()
            .for_each(|target| target.size = scan.size_of(&target.path));

        scan
    }
}
