// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::interfaces::SizeMeasurement;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

static DISK_USAGE_PROGRAM: &str = "du";
static BYTES_PER_KILOBYTE: u64 = 1024;

/// Bulk measurement through `du -sk`, reporting kilobytes.
pub struct DiskUsageCommand {
    program: PathBuf,
}

impl Default for DiskUsageCommand {
    fn default() -> Self {
        Self::new(PathBuf::from(DISK_USAGE_PROGRAM))
    }
}

impl DiskUsageCommand {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl SizeMeasurement for DiskUsageCommand {
    async fn measure(&self, path: &Path) -> CacheResult<u64> {
        let output = Command::new(&self.program)
            .arg("-sk")
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| CacheError::CommandFailed(format!("cannot launch {:?} : {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();

        if !output.status.success() {
            return Err(CacheError::CommandFailed(format!("{:?} exited with {}", self.program, output.status)));
        }

        parse_bytes(&stdout)
    }
}

fn parse_bytes(output: &str) -> CacheResult<u64> {
    output
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<u64>().ok())
        .and_then(|kilobytes| kilobytes.checked_mul(BYTES_PER_KILOBYTE))
        .ok_or_else(|| CacheError::InvalidOutput(output.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use crate::domain::errors::CacheError;
    use crate::domain::interfaces::SizeMeasurement;
    use crate::infra::system::disk_usage::{DiskUsageCommand, parse_bytes};
    use crate::infra::system::traversal::ManualTraversal;
    use assertor::{BooleanAssertion, EqualityAssertion, ResultAssertion};
    use std::fs;
    use std::path::PathBuf;
    use temp_dir::TempDir;

    #[test]
    fn should_parse_du_summary_line() {
        let parsed = parse_bytes("10240\t/Users/someone/Library/Caches\n");
        assertor::assert_that!(parsed).is_equal_to(Ok(10_485_760));
    }

    #[test]
    fn should_reject_unparsable_output() {
        let parsed = parse_bytes("du: cannot access\n");
        assertor::assert_that!(parsed).is_equal_to(Err(CacheError::InvalidOutput("du: cannot access".to_string())));
    }

    #[test]
    fn should_reject_empty_output() {
        let parsed = parse_bytes("");
        assertor::assert_that!(parsed).is_err();
    }

    #[test]
    fn should_reject_totals_beyond_byte_range() {
        let output = format!("{}\t/private/var/db\n", u64::MAX / 2);

        let parsed = parse_bytes(&output);

        assertor::assert_that!(parsed).is_equal_to(Err(CacheError::InvalidOutput(output.trim().to_string())));
    }

    #[tokio::test]
    async fn should_agree_with_traversal_on_single_file() {
        let sandbox = TempDir::new().expect("cannot create temp dir");
        let file = sandbox.path().join("fsCachedData.bin");
        let contents = (0..16_384u32).map(|index| (index % 251) as u8 + 1).collect::<Vec<_>>();
        fs::write(&file, contents).expect("cannot write file");

        let from_du = DiskUsageCommand::default().measure(&file).await.expect("du should succeed");
        let from_traversal = ManualTraversal.measure(&file).await.expect("traversal should succeed");

        assertor::assert_that!(from_traversal).is_equal_to(16_384);
        assertor::assert_that!(from_du.abs_diff(from_traversal) <= 1024).is_true();
    }

    #[tokio::test]
    async fn should_fail_for_missing_path() {
        let sandbox = TempDir::new().expect("cannot create temp dir");
        let missing = sandbox.path().join("missing");

        let measured = DiskUsageCommand::default().measure(&missing).await;

        assertor::assert_that!(measured).is_err();
    }

    #[tokio::test]
    async fn should_fail_when_program_is_not_available() {
        let command = DiskUsageCommand::new(PathBuf::from("/nonexistent/bin/du"));
        let sandbox = TempDir::new().expect("cannot create temp dir");

        let measured = command.measure(sandbox.path()).await;

        assertor::assert_that!(matches!(measured, Err(CacheError::CommandFailed(_)))).is_true();
    }
}
