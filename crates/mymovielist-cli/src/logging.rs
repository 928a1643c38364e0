use anyhow::Result;
use movielist_config::LoggingConfig;
use std::io;
use std::io::IsTerminal;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is unset.
///
/// 0 = configured level, 1 = debug without hyper's connection chatter,
/// 2+ = trace.
fn default_directive(verbose_level: u8, level: &str) -> String {
    match verbose_level {
        0 => level.to_lowercase(),
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn".to_string(),
        _ => "trace".to_string(),
    }
}

fn use_json(configured: Option<bool>) -> bool {
    match std::env::var("RUST_LOG_JSON") {
        Ok(v) => v == "true",
        Err(_) => configured.unwrap_or_else(|| !io::stdout().is_terminal()),
    }
}

pub fn init_logging(verbose_level: u8, quiet: bool, settings: &LoggingConfig) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose_level, &settings.level)))
    };

    let json = use_json(settings.json);
    let registry = Registry::default().with(filter);

    // With a log file configured, logs go there; otherwise to stderr so they
    // never mix with command output on stdout.
    if let Some(log_path) = &settings.file {
        let log_dir = log_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
        std::fs::create_dir_all(log_dir)?;
        let log_filename = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

        // mymovielist.log rotates to mymovielist.2026-01-17 etc.
        let log_prefix = log_filename.rsplit_once('.').map_or(log_filename, |(stem, _)| stem);
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);
            registry.with(json_layer).try_init()?;
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);
            registry.with(fmt_layer).try_init()?;
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(json_layer).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(fmt_layer).try_init()?;
    }

    Ok(())
}
