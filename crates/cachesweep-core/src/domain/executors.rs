// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::interfaces::CommandExecution;
use crate::infra::system::launchers::{AppleScriptPrompt, PosixShell, SudoPrompt};
use std::path::Path;
#[cfg(test)]
use std::sync::Mutex;

pub enum ShellExecutor {
    Posix(PosixShell),
    #[cfg(test)]
    FakeShell(FakeCommandExecutor),
}

impl CommandExecution for ShellExecutor {
    async fn execute(&self, command: &str) -> CacheResult<String> {
        match self {
            ShellExecutor::Posix(delegate) => delegate.execute(command).await,
            #[cfg(test)]
            ShellExecutor::FakeShell(fake) => fake.execute(command).await,
        }
    }
}

/// Capability to run a command line with elevated rights after an interactive credential check.
pub enum ElevatedExecutor {
    AppleScriptPrompt(AppleScriptPrompt),
    SudoPrompt(SudoPrompt),
    #[cfg(test)]
    FakePrompt(FakeCommandExecutor),
}

impl ElevatedExecutor {
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            ElevatedExecutor::AppleScriptPrompt(AppleScriptPrompt)
        } else {
            ElevatedExecutor::SudoPrompt(SudoPrompt)
        }
    }
}

impl CommandExecution for ElevatedExecutor {
    async fn execute(&self, command: &str) -> CacheResult<String> {
        match self {
            ElevatedExecutor::AppleScriptPrompt(delegate) => delegate.execute(command).await,
            ElevatedExecutor::SudoPrompt(delegate) => delegate.execute(command).await,
            #[cfg(test)]
            ElevatedExecutor::FakePrompt(fake) => fake.execute(command).await,
        }
    }
}

/// Removes every child of `directory`, hidden entries included, keeping the directory itself.
pub fn contents_removal_command(directory: &Path) -> CacheResult<String> {
    let Some(raw) = directory.to_str() else {
        return Err(CacheError::CommandFailed(format!(
            "cannot build a shell command for non UTF-8 path {:?}",
            directory
        )));
    };

    let quoted = quote_for_shell(raw);
    Ok(format!("rm -rf -- {quoted}/* {quoted}/.[!.]* {quoted}/..?*"))
}

fn quote_for_shell(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', r"'\''"))
}

#[cfg(test)]
pub struct FakeCommandExecutor {
    outcome: CacheResult<String>,
    pub received: Mutex<Vec<String>>,
}

#[cfg(test)]
impl FakeCommandExecutor {
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(String::new()),
            received: Mutex::new(vec![]),
        }
    }

    pub fn failing(diagnostic: &str) -> Self {
        Self {
            outcome: Err(CacheError::CommandFailed(diagnostic.to_string())),
            received: Mutex::new(vec![]),
        }
    }

    pub fn received_commands(&self) -> Vec<String> {
        self.received.lock().map(|commands| commands.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl CommandExecution for FakeCommandExecutor {
    async fn execute(&self, command: &str) -> CacheResult<String> {
        if let Ok(mut commands) = self.received.lock() {
            commands.push(command.to_string());
        }
        self.outcome.clone()
    }
}
