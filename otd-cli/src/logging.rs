//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{
    Logging, LoggingFile, LoggingFileRotation, LoggingFmt, LoggingFmtStyle,
};

// Boxed layer attachable to any registry-based subscriber.
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

// Installs the global subscriber. The `RUST_LOG` environment variable
// overrides the default `info` level.
pub fn init(config: &Logging) {
    let file = config
        .file
        .enabled
        .then(|| fmt_layer(file_appender(&config.file), &config.file.fmt));
    let stdout = config
        .stdout
        .enabled
        .then(|| fmt_layer(std::io::stdout, &config.stdout.fmt));

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file)
        .with(stdout)
        .init();
}

pub fn file_appender(config: &LoggingFile) -> RollingFileAppender {
    match config.rotation {
        LoggingFileRotation::Never => rolling::never(&config.dir, &config.name),
        LoggingFileRotation::Hourly => {
            rolling::hourly(&config.dir, &config.name)
        }
        LoggingFileRotation::Daily => rolling::daily(&config.dir, &config.name),
    }
}

// Formatting layer shared by the file and stdout outputs.
pub fn fmt_layer<S, W>(writer: W, fmt: &LoggingFmt) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_thread_ids(fmt.show_thread_id)
        .with_file(fmt.show_source)
        .with_line_number(fmt.show_source)
        .with_ansi(fmt.colors);
    match fmt.style {
        LoggingFmtStyle::Compact => layer.compact().boxed(),
        LoggingFmtStyle::Full => layer.boxed(),
        LoggingFmtStyle::Json => layer.json().boxed(),
        LoggingFmtStyle::Pretty => layer.pretty().boxed(),
    }
}
