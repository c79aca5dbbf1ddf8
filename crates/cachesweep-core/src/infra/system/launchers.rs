// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::interfaces::CommandExecution;
use std::process::Stdio;
use tokio::process::Command;

static POSIX_SHELL: &str = "/bin/sh";
static OSASCRIPT: &str = "/usr/bin/osascript";
static SUDO: &str = "sudo";

/// Runs a command line through `/bin/sh -c` with the caller's own rights.
#[derive(Default)]
pub struct PosixShell;

impl CommandExecution for PosixShell {
    async fn execute(&self, command: &str) -> CacheResult<String> {
        let mut shell = Command::new(POSIX_SHELL);
        shell.arg("-c").arg(command).stdin(Stdio::null());
        run_capturing(shell, POSIX_SHELL).await
    }
}

/// Asks for administrator credentials through the macOS authorization dialog.
#[derive(Default)]
pub struct AppleScriptPrompt;

impl CommandExecution for AppleScriptPrompt {
    async fn execute(&self, command: &str) -> CacheResult<String> {
        let script = format!(
            "do shell script \"{}\" with administrator privileges",
            escape_applescript(command)
        );

        let mut osascript = Command::new(OSASCRIPT);
        osascript.arg("-e").arg(script).stdin(Stdio::null());
        run_capturing(osascript, OSASCRIPT).await
    }
}

/// Asks for credentials on the controlling terminal through `sudo`.
#[derive(Default)]
pub struct SudoPrompt;

impl CommandExecution for SudoPrompt {
    async fn execute(&self, command: &str) -> CacheResult<String> {
        let mut sudo = Command::new(SUDO);
        sudo.arg("--").arg(POSIX_SHELL).arg("-c").arg(command).stdin(Stdio::inherit());
        run_capturing(sudo, SUDO).await
    }
}

async fn run_capturing(mut command: Command, program: &str) -> CacheResult<String> {
    let output = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| CacheError::CommandFailed(format!("cannot launch {} : {}", program, e)))?;

    let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        log::info!("[cachesweep.launcher] {} exited with {}", program, output.status);
        return Err(CacheError::CommandFailed(combined));
    }

    Ok(combined)
}

fn escape_applescript(command: &str) -> String {
    command.replace('\\', "\\\\").replace('"', "\\\"")
}
