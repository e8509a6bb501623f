//! Log output for the CLI. Events go to stderr so command output on stdout
//! stays clean for piping.

use shared::config::{LogFormat, LoggingConfig};
use tracing::{Subscriber, level_filters::LevelFilter};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
};

/// Install the global subscriber and return the configured level.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn initialize_tracing(config: &LoggingConfig) -> String {
    let subscriber = subscriber_with_writer(config, std::io::stderr);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    config.level.clone()
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    let default_level = config
        .level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    })
}

fn subscriber_with_writer<W>(config: &LoggingConfig, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let builder = fmt::fmt()
        .with_env_filter(build_env_filter(config))
        .with_target(false)
        .with_level(true)
        .with_writer(writer);

    match config.format {
        LogFormat::Json => Box::new(builder.json().with_ansi(false).finish()),
        LogFormat::Text => Box::new(builder.with_ansi(false).finish()),
    }
}
