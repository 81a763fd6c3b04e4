// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use tracing::Span;
use tracing_subscriber::fmt::time;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn init_log(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::builder().parse_lossy(match verbose {
        true => "drand_verifier=trace",
        false => "drand_verifier=info",
    });

    let layer = tracing_subscriber::fmt::layer()
        .with_timer(time::time())
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

/// Span hierarchy of a verification session: one span per chain, children per round.
pub struct Logger {
    chain: Arc<str>,
    pub span: Span,
}

impl Logger {
    pub fn register_chain(beacon_id: &str) -> Self {
        let span = tracing::info_span!("", chain = beacon_id);
        Self {
            chain: beacon_id.into(),
            span,
        }
    }

    pub fn new_child(&self, mut args: String) -> Self {
        args.insert_str(0, self.chain.as_ref());
        let span = tracing::info_span!("", id = args);
        Self {
            chain: Arc::clone(&self.chain),
            span,
        }
    }
}
