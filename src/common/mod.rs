//! Implements some helpers that both exercises and the binary need

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::settings::Settings;

pub mod interface;

/// Install a global [tracing] subscriber that writes to stderr.
///
/// stdout is reserved for the responses. Verbose settings enable debug output of the
/// intermediate steps.
pub fn setup_logging(settings: &Settings) {
    let level = if settings.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("! could not set up logging: {e}");
    }
}
