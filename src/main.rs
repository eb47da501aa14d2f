//! gatelog main entrypoint.

use gatelog_archiver::run;
use gatelog_archiver::ui::messages::error;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics on stderr; RUST_LOG=debug shows every backend call.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run() {
        tracing::debug!(stage = e.stage(), "run aborted");
        error(&e);
        std::process::exit(1);
    }
}
