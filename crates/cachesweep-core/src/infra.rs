// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

pub mod cli;

pub(crate) mod catalog;
pub(crate) mod ledger;
pub(crate) mod system;
