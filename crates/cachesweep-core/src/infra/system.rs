// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

pub mod disk_usage;
pub mod launchers;
pub mod traversal;
