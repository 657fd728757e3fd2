use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "smartsheet_core=info";

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Compact human-readable output. `RUST_LOG` overrides the default level.
pub fn init_logger(verbose: bool) {
    let filter = if verbose {
        env_filter("smartsheet_core=debug,info")
    } else {
        env_filter(DEFAULT_DIRECTIVE)
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

pub fn init_json_logger() {
    init_json_with(env_filter(DEFAULT_DIRECTIVE));
}

fn init_json_with(filter: EnvFilter) {
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .try_init();
}

/// Install a subscriber from the `[logging]` section.
///
/// A second call is a no-op: the first installed subscriber stays.
pub fn init_from_config(config: &LoggingConfig) {
    let directive = config
        .level
        .as_deref()
        .map(|level| format!("smartsheet_core={}", level))
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string());

    match config.format.as_deref() {
        Some("json") => init_json_with(env_filter(&directive)),
        _ => {
            let _ = tracing_subscriber::registry()
                .with(env_filter(&directive))
                .with(tracing_subscriber::fmt::layer().with_target(false).compact())
                .try_init();
        }
    }
}
