// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Once;

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a logger writing to stderr, so stdout only carries command output.
///
/// The verbosity is set by the `RUST_LOG` environment variable, e.g. `info` or `debug`. Calling
/// this more than once has no effect.
pub fn setup_logger() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::Subscriber::builder()
            .without_time()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::from_default_env())
            .finish()
            .init();
    });
}
