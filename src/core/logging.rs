//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Example
/// ```no_run
/// voxedit::core::logging::init();
/// log::info!("Editor started");
/// ```
pub fn init() {
    builder().init();
}

/// Same as [`init`] but does not panic if a logger is already installed.
/// Tests and embedding hosts call this.
pub fn try_init() -> bool {
    builder().try_init().is_ok()
}

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    );
    builder.format_timestamp_millis();
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_is_repeatable() {
        try_init();
        assert!(!try_init());
        log::debug!("logger installed once");
    }
}
