// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use cachesweep_core::factory;
use cachesweep_core::infra::cli;
use tikv_jemallocator::Jemalloc;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::troubleshooting::setup_troubleshooting();
    let (task, options) = cli::parsing::parse_arguments()?;

    let cachesweep = factory::create_cachesweep(options)?;
    cachesweep.execute(task).await?;

    Ok(())
}
