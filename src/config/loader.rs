//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

const CONFIG_FILENAME: &str = "lostfound.toml";

/// Load configuration from lostfound.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Compile-time constant pattern, panicking indicates a bug
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Lost & Found Board Configuration

[server]
host = "0.0.0.0"
port = 8080
uploads_dir = "./uploads"

[database]
host = "${DB_HOST:-localhost}"
port = 5432
user = "${DB_USER:-postgres}"
password = "${DB_PASSWORD:-postgres}"
dbname = "${DB_NAME:-lostfound}"

[auth]
# Rotating the secret invalidates all outstanding session tokens
secret = "${JWT_SECRET:-lostfound-secret-key-change-in-production}"
token_ttl_hours = 24
sweep_interval_secs = 3600
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_interpolation() {
        env::set_var("LOSTFOUND_TEST_VAR", "hello");
        let content = "value = \"${LOSTFOUND_TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("LOSTFOUND_TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&interpolate_env_vars(default_config_content()))
            .expect("default config must parse");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.dbname, "lostfound");
    }

    #[test]
    fn test_load_config_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lostfound.toml");
        fs::write(&path, "[auth]\ntoken_ttl_hours = 1\n").unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.auth.token_ttl_hours, 1);
    }

    #[test]
    fn test_missing_config_file() {
        let result = load_config_from_path(Path::new("/nonexistent/lostfound.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound)));
    }
}
