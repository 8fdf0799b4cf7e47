//! Logging to the javascript console.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Directives used when the application has no preference.
pub const DEFAULT_DIRECTIVES: &str = "error,client=debug,ui=debug";

/// Initialize logging. Later calls are ignored.
pub fn init_logging(directives: &str) {
    let env_filter = EnvFilter::new(directives);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    tracing::info!("Initialized logs");
}
