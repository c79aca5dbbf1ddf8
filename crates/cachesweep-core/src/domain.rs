// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

pub mod engine;
pub mod errors;
pub mod executors;
pub mod interfaces;
pub mod models;
pub mod privileges;
pub mod probes;
