use std::sync::{Arc, OnceLock};

use super::StaticConfig;

/// Loaded once at startup and never replaced
static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
        .clone()
}

/// Initialize the global configuration
///
/// Loads configuration from "config.toml" in the current directory.
/// If the file doesn't exist, uses in-memory defaults.
///
/// # Examples
/// ```no_run
/// use shortmark::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load()));
}

/// Initialize the global configuration from an explicit TOML path
///
/// Has no effect if the configuration was already initialized.
pub fn init_config_from(path: &str) {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load_from(path)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_first_writer_wins() {
        init_config();
        let first = get_config();

        init_config_from("does-not-exist.toml");
        let second = get_config();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.pagination.max_per_page >= 1);
    }
}
