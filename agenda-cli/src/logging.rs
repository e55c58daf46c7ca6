use tracing_subscriber::EnvFilter;

/// Pick the filter directive: `-v` flags beat the config level.
pub fn filter_directive(config_level: &str, verbose: u8) -> String {
    match verbose {
        0 => config_level.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins when set.
pub fn init(config_level: &str, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config_level, verbose)));

    // A second init (tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
