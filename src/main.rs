// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use drand_verifier::cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
