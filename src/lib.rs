// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

#![warn(clippy::pedantic)]
#![allow(
    clippy::unreadable_literal,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod crypto;
pub mod log;

#[cfg(test)]
mod test;
