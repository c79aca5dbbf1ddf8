// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::env::home_dir;
use std::path::PathBuf;

static LEDGER_FILE_NAME: &str = "ledger.json";
static STATE_DIR_VARIABLE: &str = "CACHESWEEP_HOME";
static STATE_DIR_NAME: &str = ".cachesweep";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FreedBytesLedger {
    pub total_freed_bytes: u64,
    pub clean_runs: u64,
    pub last_run_freed_bytes: u64,
}

/// Persists the running total of freed bytes across clean runs.
pub struct LedgerStorage {
    state_dir: PathBuf,
}

impl LedgerStorage {
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }

    pub fn get() -> Self {
        let state_dir = match std::env::var_os(STATE_DIR_VARIABLE) {
            Some(dir) => PathBuf::from(dir),
            None => match home_dir() {
                None => PathBuf::from("/var/tmp").join(STATE_DIR_NAME),
                Some(dir) => dir.join(STATE_DIR_NAME),
            },
        };
        Self::new(state_dir)
    }

    fn ledger_file(&self) -> PathBuf {
        self.state_dir.join(LEDGER_FILE_NAME)
    }

    pub fn read(&self) -> anyhow::Result<FreedBytesLedger> {
        let ledger_file = self.ledger_file();

        if !ledger_file.exists() {
            log::info!("[cachesweep.ledger] {:?} not found", ledger_file);
            return Ok(FreedBytesLedger::default());
        }

        let serialized = std::fs::read(&ledger_file)?;
        let ledger = serde_json::from_slice(&serialized)?;
        Ok(ledger)
    }

    pub fn record_run(&self, freed_bytes: u64) -> anyhow::Result<FreedBytesLedger> {
        let previous = self.read()?;

        let updated = FreedBytesLedger {
            total_freed_bytes: previous.total_freed_bytes.saturating_add(freed_bytes),
            clean_runs: previous.clean_runs + 1,
            last_run_freed_bytes: freed_bytes,
        };

        if !self.state_dir.exists() {
            std::fs::create_dir_all(&self.state_dir)?;
            log::info!("[cachesweep.ledger] {:?} created", self.state_dir);
        }

        let serialized = serde_json::to_vec_pretty(&updated)?;
        std::fs::write(self.ledger_file(), serialized)?;
        log::info!("[cachesweep.ledger] {:?} saved", self.ledger_file());
        Ok(updated)
    }
}
