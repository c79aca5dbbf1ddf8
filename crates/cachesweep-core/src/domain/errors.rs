// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("the specified path could not be found : {0:?}")]
    PathNotFound(PathBuf),
    #[error("failed to parse output from command : {0:?}")]
    InvalidOutput(String),
    #[error("command failed : {0}")]
    CommandFailed(String),
    #[error("cannot read {path:?} : {reason}")]
    PathUnreadable { path: PathBuf, reason: String },
}

pub type CacheResult<T> = Result<T, CacheError>;
