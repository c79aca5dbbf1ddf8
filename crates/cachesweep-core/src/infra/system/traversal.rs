// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::interfaces::SizeMeasurement;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

/// Sums the size attribute of every non-directory entry below a root.
#[derive(Default)]
pub struct ManualTraversal;

impl SizeMeasurement for ManualTraversal {
    async fn measure(&self, path: &Path) -> CacheResult<u64> {
        let root = path.to_path_buf();
        tokio::task::spawn_blocking(move || sum_entries(&root))
            .await
            .map_err(|e| CacheError::PathUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
    }
}

fn sum_entries(root: &Path) -> CacheResult<u64> {
    let root_metadata = match std::fs::symlink_metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(unreadable(root, e)),
    };

    if root_metadata.is_dir() {
        std::fs::read_dir(root).map_err(|e| unreadable(root, e))?;
    }

    let total = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("[cachesweep.traversal] skipping entry : {}", e);
                None
            },
        })
        .filter(|entry| !entry.file_type().is_dir())
        .map(|entry| entry.metadata().map(|metadata| metadata.len()).unwrap_or(0))
        .sum();

    Ok(total)
}

fn unreadable(root: &Path, error: std::io::Error) -> CacheError {
    CacheError::PathUnreadable {
        path: root.to_path_buf(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::interfaces::SizeMeasurement;
    use crate::infra::system::traversal::ManualTraversal;
    use assertor::EqualityAssertion;
    use std::fs;
    use temp_dir::TempDir;

    #[tokio::test]
    async fn should_report_zero_for_missing_root() {
        let sandbox = TempDir::new().expect("cannot create temp dir");

        let measured = ManualTraversal.measure(&sandbox.path().join("missing")).await;

        assertor::assert_that!(measured).is_equal_to(Ok(0));
    }

    #[tokio::test]
    async fn should_report_zero_for_empty_directory() {
        let sandbox = TempDir::new().expect("cannot create temp dir");

        let measured = ManualTraversal.measure(sandbox.path()).await;

        assertor::assert_that!(measured).is_equal_to(Ok(0));
    }

    #[tokio::test]
    async fn should_sum_nested_files() {
        let sandbox = TempDir::new().expect("cannot create temp dir");
        let nested = sandbox.path().join("com.example.app").join("fsCachedData");
        fs::create_dir_all(&nested).expect("cannot create nested dirs");
        fs::write(sandbox.path().join("top.bin"), vec![0u8; 1000]).expect("cannot write file");
        fs::write(nested.join("blob.bin"), vec![0u8; 2500]).expect("cannot write file");
        fs::write(nested.join(".hidden"), vec![0u8; 24]).expect("cannot write file");

        let measured = ManualTraversal.measure(sandbox.path()).await;

        assertor::assert_that!(measured).is_equal_to(Ok(3524));
    }

    #[tokio::test]
    async fn should_measure_single_file_root() {
        let sandbox = TempDir::new().expect("cannot create temp dir");
        let file = sandbox.path().join("single.log");
        fs::write(&file, vec![0u8; 777]).expect("cannot write file");

        let measured = ManualTraversal.measure(&file).await;

        assertor::assert_that!(measured).is_equal_to(Ok(777));
    }
}
