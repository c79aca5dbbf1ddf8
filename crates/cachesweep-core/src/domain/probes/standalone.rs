// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::errors::CacheResult;
use crate::domain::interfaces::SizeMeasurement;
use crate::infra::system::disk_usage::DiskUsageCommand;
use crate::infra::system::traversal::ManualTraversal;
#[cfg(test)]
use crate::domain::errors::CacheError;
#[cfg(test)]
use std::collections::HashMap;
use std::path::Path;
#[cfg(test)]
use std::path::PathBuf;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use tokio::sync::Barrier;

pub enum SizeStrategy {
    DiskUsage(DiskUsageCommand),
    ManualTraversal(ManualTraversal),
    #[cfg(test)]
    FakeStrategy(FakeSizeStrategy),
}

impl SizeStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            SizeStrategy::DiskUsage(_) => "disk-usage",
            SizeStrategy::ManualTraversal(_) => "manual-traversal",
            #[cfg(test)]
            SizeStrategy::FakeStrategy(_) => "fake",
        }
    }
}

impl SizeMeasurement for SizeStrategy {
    async fn measure(&self, path: &Path) -> CacheResult<u64> {
        match self {
            SizeStrategy::DiskUsage(delegate) => delegate.measure(path).await,
            SizeStrategy::ManualTraversal(delegate) => delegate.measure(path).await,
            #[cfg(test)]
            SizeStrategy::FakeStrategy(fake) => fake.measure(path).await,
        }
    }
}

#[cfg(test)]
pub struct FakeSizeStrategy {
    outcomes: HashMap<PathBuf, CacheResult<u64>>,
    panicking: Vec<PathBuf>,
    rendezvous: Option<Arc<Barrier>>,
    pub calls: AtomicUsize,
}

#[cfg(test)]
impl FakeSizeStrategy {
    pub fn new(outcomes: HashMap<PathBuf, CacheResult<u64>>) -> Self {
        Self {
            outcomes,
            panicking: vec![],
            rendezvous: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_sizes(sizes: &[(&str, u64)]) -> Self {
        let outcomes = sizes
            .iter()
            .map(|(path, bytes)| (PathBuf::from(path), Ok(*bytes)))
            .collect();
        Self::new(outcomes)
    }

    pub fn always_failing() -> Self {
        Self::new(HashMap::new())
    }

    pub fn panicking_on(mut self, path: &str) -> Self {
        self.panicking.push(PathBuf::from(path));
        self
    }

    /// Every measurement waits until `parties` measurements are in flight at once.
    pub fn meeting_at(mut self, parties: usize) -> Self {
        self.rendezvous = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn total_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
impl SizeMeasurement for FakeSizeStrategy {
    async fn measure(&self, path: &Path) -> CacheResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }

        if self.panicking.iter().any(|candidate| candidate == path) {
            panic!("fake strategy exploded for {:?}", path);
        }

        self.outcomes
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(CacheError::InvalidOutput(String::new())))
    }
}
