use tracing_subscriber::{EnvFilter, FmtSubscriber};

const LOG_ENV_VARS: [&str; 2] = ["REQPROBE_LOG", "RUST_LOG"];

/// Installs the global subscriber. Log lines go to stderr so stdout only
/// carries the run summary.
pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = log_filter(verbose, |name| std::env::var(name).ok());

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn log_filter<F>(verbose: bool, lookup: F) -> EnvFilter
where
    F: Fn(&str) -> Option<String>,
{
    LOG_ENV_VARS.iter().find_map(|name| lookup(name)).map_or_else(
        || {
            if verbose {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new("info")
            }
        },
        |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
    )
}
