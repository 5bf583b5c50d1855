//! Structured logging for the Ridgeline terrain renderer.
//!
//! One `tracing` subscriber for the whole process: console output with
//! uptime timestamps and module paths, and optionally a JSON log file for
//! post-mortem analysis. The filter comes from `RUST_LOG` when set, else
//! from the configuration system's `debug.log_level`, else a default that
//! quiets the GPU stack.

use ridgeline_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Install the global tracing subscriber.
///
/// Passing a `log_dir` adds a JSON file layer writing `ridgeline.log`
/// there; hosts typically only wire that up in debug builds.
///
/// # Examples
///
/// ```no_run
/// use ridgeline_config::Config;
/// use ridgeline_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, config: Option<&Config>) {
    // RUST_LOG wins over the config value when set.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_string(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("ridgeline.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The filter string to use when `RUST_LOG` is unset.
fn filter_string(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// The default filter: `info` everywhere, `warn` for the noisy GPU stack.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
