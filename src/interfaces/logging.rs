use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::LevelFilter};

/// Warnings only by default; `-v` adds progress, `-vv` adds debug detail.
/// `RUST_LOG` overrides either.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|error| anyhow!("Unable to initialise logging: {error}"))
}

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}
