use std::env;
use std::path::PathBuf;

use log::{info, warn};

/// Runtime configuration, sourced from the environment with logged defaults.
/// CLI flags override whatever was loaded here.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
}

/// Port the original front end calls.
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATA_DIR: &str = "./data";

impl Config {
    pub fn load() -> Self {
        let port = var_or("KAUL_PORT", &DEFAULT_PORT.to_string())
            .parse()
            .unwrap_or_else(|e| {
                warn!("Invalid KAUL_PORT value: {e}, falling back to {DEFAULT_PORT}");
                DEFAULT_PORT
            });
        let data_dir = PathBuf::from(var_or("KAUL_DATA_DIR", DEFAULT_DATA_DIR));

        Self { port, data_dir }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns the environment variables; parallel tests would race on
    // the process-wide environment.
    #[test]
    fn environment_overrides_and_fallbacks() {
        env::set_var("KAUL_PORT", "4040");
        env::set_var("KAUL_DATA_DIR", "/tmp/kaulvote-config-test");
        let config = Config::load();
        assert_eq!(config.port, 4040);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/kaulvote-config-test"));

        env::set_var("KAUL_PORT", "not-a-port");
        let config = Config::load();
        assert_eq!(config.port, DEFAULT_PORT);

        env::remove_var("KAUL_PORT");
        env::remove_var("KAUL_DATA_DIR");
        let config = Config::load();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }
}
