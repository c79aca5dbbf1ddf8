// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::errors::CacheError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheTarget {
    pub path: PathBuf,
    pub name: String,
    pub description: String,
    #[serde(default, rename = "critical")]
    pub is_critical: bool,
    #[serde(skip)]
    pub size: u64,
}

impl CacheTarget {
    pub fn new(path: PathBuf, name: String, description: String, is_critical: bool) -> Self {
        Self {
            path,
            name,
            description,
            is_critical,
            size: 0,
        }
    }

    pub fn with(path: &str, name: &str, description: &str, is_critical: bool) -> Self {
        Self::new(PathBuf::from(path), name.to_string(), description.to_string(), is_critical)
    }
}

impl Display for CacheTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} ({})", self.name, self.path.display()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasurementStatus {
    Measured,
    Unreadable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathMeasurement {
    pub bytes: u64,
    pub status: MeasurementStatus,
}

impl PathMeasurement {
    pub fn measured(bytes: u64) -> Self {
        Self {
            bytes,
            status: MeasurementStatus::Measured,
        }
    }

    pub fn unreadable() -> Self {
        Self {
            bytes: 0,
            status: MeasurementStatus::Unreadable,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        self.status == MeasurementStatus::Unreadable
    }
}

impl From<Result<u64, CacheError>> for PathMeasurement {
    fn from(value: Result<u64, CacheError>) -> Self {
        match value {
            Ok(bytes) => PathMeasurement::measured(bytes),
            Err(_) => PathMeasurement::unreadable(),
        }
    }
}

/// Outcome of a batch scan: exactly one entry per distinct input path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanResult {
    pub measurements: HashMap<PathBuf, PathMeasurement>,
}

impl ScanResult {
    pub fn record(&mut self, path: PathBuf, measurement: PathMeasurement) {
        self.measurements.insert(path, measurement);
    }

    /// Unreadable and missing paths both report zero.
    pub fn size_of(&self, path: &Path) -> u64 {
        self.measurements
            .get(path)
            .map(|measurement| measurement.bytes)
            .unwrap_or_default()
    }

    pub fn is_unreadable(&self, path: &Path) -> bool {
        self.measurements
            .get(path)
            .is_some_and(|measurement| measurement.is_unreadable())
    }

    pub fn total_bytes(&self) -> u64 {
        self.measurements.values().map(|measurement| measurement.bytes).sum()
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn sizes(&self) -> HashMap<PathBuf, u64> {
        self.measurements
            .iter()
            .map(|(path, measurement)| (path.clone(), measurement.bytes))
            .collect()
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct CleanOutcome {
    pub total_freed: u64,
    pub errors: HashMap<PathBuf, CacheError>,
}

impl CleanOutcome {
    pub fn record_freed(&mut self, bytes: u64) {
        self.total_freed += bytes;
    }

    pub fn record_failure(&mut self, path: PathBuf, error: CacheError) {
        self.errors.insert(path, error);
    }

    pub fn succeeded(&self, path: &Path) -> bool {
        !self.errors.contains_key(path)
    }

    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty()
    }
}
