//! Logging setup routed through `tracing` and `tracing-subscriber`.

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber from the CLI verbosity count.
///
/// `RUST_LOG` takes precedence when set; otherwise our crates log at the
/// requested level while external crates stay at warn to reduce noise.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let level_str = level.as_str().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,seqsheet_cli={level},seqsheet_common={level},seqsheet_ingest={level},\
             seqsheet_model={level},seqsheet_profiles={level},seqsheet_transform={level},\
             seqsheet_validate={level}",
            level = level_str
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();
}
