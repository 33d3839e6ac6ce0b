use env_logger::{Builder, Env};

const DEFAULT_FILTER: &str = "chargeway=info,warn";

/// Installs the process logger. `RUST_LOG` overrides the default filter.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_millis()
        .format_module_path(false)
        .format_target(true)
        .try_init();
}
