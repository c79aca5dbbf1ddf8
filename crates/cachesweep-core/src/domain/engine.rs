// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::executors::{ElevatedExecutor, ShellExecutor, contents_removal_command};
use crate::domain::interfaces::{CommandExecution, SizeMeasurement};
use crate::domain::models::{CleanOutcome, PathMeasurement, ScanResult};
use crate::domain::privileges::PrivilegePolicy;
use crate::domain::probes::chained::SizeProbe;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub static DEFAULT_MAX_CONCURRENT_SCANS: usize = 16;

pub struct CacheEngine {
    probe: Arc<SizeProbe>,
    shell: ShellExecutor,
    elevated: ElevatedExecutor,
    privileges: PrivilegePolicy,
    max_concurrent_scans: usize,
}

impl CacheEngine {
    pub fn new(
        probe: SizeProbe,
        shell: ShellExecutor,
        elevated: ElevatedExecutor,
        privileges: PrivilegePolicy,
    ) -> Self {
        Self {
            probe: Arc::new(probe),
            shell,
            elevated,
            privileges,
            max_concurrent_scans: DEFAULT_MAX_CONCURRENT_SCANS,
        }
    }

    pub fn with_max_concurrent_scans(mut self, max_concurrent_scans: usize) -> Self {
        self.max_concurrent_scans = max_concurrent_scans.max(1);
        self
    }

    pub async fn measure(&self, path: &Path) -> CacheResult<u64> {
        self.probe.measure(path).await
    }

    /// Measures every distinct path concurrently. Never fails as a whole: a path whose
    /// measurement fails, or whose task dies, is reported as unreadable with zero bytes.
    pub async fn scan(&self, paths: &[PathBuf]) -> ScanResult {
        let unique_paths = paths.iter().cloned().collect::<BTreeSet<_>>();
        let permits = Arc::new(Semaphore::new(self.max_concurrent_scans));
        let mut tasks = JoinSet::new();
        let mut in_flight = HashMap::new();

        for path in unique_paths {
            let probe = Arc::clone(&self.probe);
            let permits = Arc::clone(&permits);
            let task_path = path.clone();

            let handle = tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                probe.measure(&task_path).await
            });

            in_flight.insert(handle.id(), path);
        }

        log::info!("[cachesweep.engine] scanning {} paths", in_flight.len());

        let mut scan_result = ScanResult::default();

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((task_id, measured)) => {
                    let Some(path) = in_flight.remove(&task_id) else {
                        continue;
                    };

                    if let Err(failure) = &measured {
                        log::info!("[cachesweep.engine] cannot measure {:?} | reason = {}", path, failure);
                    }

                    scan_result.record(path, PathMeasurement::from(measured));
                },
                Err(join_error) => {
                    let Some(path) = in_flight.remove(&join_error.id()) else {
                        continue;
                    };

                    log::error!("[cachesweep.engine] measurement task for {:?} died : {}", path, join_error);
                    scan_result.record(path, PathMeasurement::unreadable());
                },
            }
        }

        scan_result
    }

    pub fn requires_elevated_privileges(&self, path: &Path) -> bool {
        self.privileges.requires_elevated_privileges(path)
    }

    /// Empties `path`, keeping the directory itself, and returns its size measured right before removal.
    /// A directory the caller cannot read counts as zero bytes and is still handed to the removal.
    pub async fn delete_contents(&self, path: &Path) -> CacheResult<u64> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_dir() => {},
            Ok(_) => return Err(CacheError::CommandFailed(format!("{} is not a directory", path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(CacheError::PathNotFound(path.to_path_buf())),
            Err(e) => {
                return Err(CacheError::PathUnreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            },
        }

        let command = contents_removal_command(path)?;
        let requires_elevation = self.requires_elevated_privileges(path);

        let size_before_deletion = match self.probe.measure(path).await {
            Ok(bytes) => bytes,
            Err(CacheError::PathUnreadable { reason, .. }) => {
                log::warn!("[cachesweep.engine] cannot measure {:?} before removal | reason = {}", path, reason);
                0
            },
            Err(failure) => return Err(failure),
        };

        if requires_elevation {
            log::info!("[cachesweep.engine] removing contents of {:?} with elevated privileges", path);
            self.elevated.execute(&command).await?;
        } else {
            log::info!("[cachesweep.engine] removing contents of {:?}", path);
            self.shell.execute(&command).await?;
        }

        Ok(size_before_deletion)
    }

    /// Cleans paths one after another in input order. A failing path is recorded and skipped.
    pub async fn clean(&self, paths: &[PathBuf]) -> CleanOutcome {
        let mut outcome = CleanOutcome::default();
        let mut visited = HashSet::new();

        for path in paths {
            if !visited.insert(path) {
                continue;
            }

            match self.delete_contents(path).await {
                Ok(freed) => {
                    log::info!("[cachesweep.engine] freed {} bytes from {:?}", freed, path);
                    outcome.record_freed(freed);
                },
                Err(failure) => {
                    log::error!("[cachesweep.engine] cannot clean {:?} | reason = {}", path, failure);
                    outcome.record_failure(path.clone(), failure);
                },
            }
        }

        outcome
    }
}
