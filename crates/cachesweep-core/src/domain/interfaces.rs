// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::errors::CacheResult;
use std::path::Path;

pub trait SizeMeasurement {
    async fn measure(&self, path: &Path) -> CacheResult<u64>;
}

pub trait CommandExecution {
    async fn execute(&self, command: &str) -> CacheResult<String>;
}
