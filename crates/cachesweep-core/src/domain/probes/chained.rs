// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::interfaces::SizeMeasurement;
use crate::domain::probes::standalone::SizeStrategy;
use crate::infra::system::disk_usage::DiskUsageCommand;
use crate::infra::system::traversal::ManualTraversal;
use std::path::Path;

/// Tries each strategy in order and settles on the first one that produces a value.
pub struct SizeProbe {
    strategies: Vec<SizeStrategy>,
}

impl Default for SizeProbe {
    fn default() -> Self {
        Self::new(vec![
            SizeStrategy::DiskUsage(DiskUsageCommand::default()),
            SizeStrategy::ManualTraversal(ManualTraversal),
        ])
    }
}

impl SizeProbe {
    pub fn new(strategies: Vec<SizeStrategy>) -> Self {
        Self { strategies }
    }
}

impl SizeMeasurement for SizeProbe {
    async fn measure(&self, path: &Path) -> CacheResult<u64> {
        let mut last_failure = CacheError::PathUnreadable {
            path: path.to_path_buf(),
            reason: "no size strategy configured".to_string(),
        };

        for strategy in &self.strategies {
            match strategy.measure(path).await {
                Ok(bytes) => {
                    log::info!("[cachesweep.probe] {:?} measured by {} : {} bytes", path, strategy.label(), bytes);
                    return Ok(bytes);
                },
                Err(failure) => {
                    log::info!(
                        "[cachesweep.probe] {} failed for {:?} | reason = {}",
                        strategy.label(),
                        path,
                        failure
                    );
                    last_failure = failure;
                },
            }
        }

        Err(last_failure)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::errors::CacheError;
    use crate::domain::interfaces::SizeMeasurement;
    use crate::domain::probes::chained::SizeProbe;
    use crate::domain::probes::standalone::{FakeSizeStrategy, SizeStrategy};
    use crate::infra::system::disk_usage::DiskUsageCommand;
    use crate::infra::system::traversal::ManualTraversal;
    use assertor::{EqualityAssertion, ResultAssertion};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use temp_dir::TempDir;

    #[tokio::test]
    async fn should_prefer_first_strategy_when_it_succeeds() {
        let probe = SizeProbe::new(vec![
            SizeStrategy::FakeStrategy(FakeSizeStrategy::with_sizes(&[("/cache", 10_485_760)])),
            SizeStrategy::FakeStrategy(FakeSizeStrategy::with_sizes(&[("/cache", 1)])),
        ]);

        let measured = probe.measure(Path::new("/cache")).await;

        assertor::assert_that!(measured).is_equal_to(Ok(10_485_760));
        match &probe.strategies[1] {
            SizeStrategy::FakeStrategy(fallback) => assertor::assert_that!(fallback.total_calls()).is_equal_to(0),
            _ => panic!("Not allowed on this test"),
        }
    }

    #[tokio::test]
    async fn should_fall_back_when_fast_path_fails() {
        let probe = SizeProbe::new(vec![
            SizeStrategy::FakeStrategy(FakeSizeStrategy::always_failing()),
            SizeStrategy::FakeStrategy(FakeSizeStrategy::with_sizes(&[("/cache", 5_242_880)])),
        ]);

        let measured = probe.measure(Path::new("/cache")).await;

        assertor::assert_that!(measured).is_equal_to(Ok(5_242_880));
    }

    #[tokio::test]
    async fn should_propagate_last_failure_when_every_strategy_fails() {
        let unreadable = CacheError::PathUnreadable {
            path: PathBuf::from("/private/var/db/diagnostics"),
            reason: "permission denied".to_string(),
        };
        let outcomes = HashMap::from([(PathBuf::from("/private/var/db/diagnostics"), Err(unreadable.clone()))]);

        let probe = SizeProbe::new(vec![
            SizeStrategy::FakeStrategy(FakeSizeStrategy::always_failing()),
            SizeStrategy::FakeStrategy(FakeSizeStrategy::new(outcomes)),
        ]);

        let measured = probe.measure(Path::new("/private/var/db/diagnostics")).await;

        assertor::assert_that!(measured).is_equal_to(Err(unreadable));
    }

    #[tokio::test]
    async fn should_fail_without_strategies() {
        let probe = SizeProbe::new(vec![]);

        let measured = probe.measure(Path::new("/cache")).await;

        assertor::assert_that!(measured).is_err();
    }

    #[tokio::test]
    async fn should_report_zero_for_missing_path_with_default_chain() {
        let sandbox = TempDir::new().expect("cannot create temp dir");

        let measured = SizeProbe::default().measure(&sandbox.path().join("gone")).await;

        assertor::assert_that!(measured).is_equal_to(Ok(0));
    }

    #[tokio::test]
    async fn should_fall_back_to_traversal_when_du_is_unavailable() {
        let sandbox = TempDir::new().expect("cannot create temp dir");
        std::fs::write(sandbox.path().join("blob.bin"), vec![0u8; 2048]).expect("cannot write file");

        let probe = SizeProbe::new(vec![
            SizeStrategy::DiskUsage(DiskUsageCommand::new(PathBuf::from("/nonexistent/bin/du"))),
            SizeStrategy::ManualTraversal(ManualTraversal),
        ]);

        let measured = probe.measure(sandbox.path()).await;

        assertor::assert_that!(measured).is_equal_to(Ok(2048));
    }
}
