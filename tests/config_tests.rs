//! Configuration integration tests

use lostfound::config::Config;

#[test]
fn test_example_config_is_valid_toml() {
    let content = include_str!("../lostfound.toml.example");
    let value: toml::Value = toml::from_str(content).expect("example config must be valid TOML");
    assert!(value.is_table());
}

#[test]
fn test_example_config_has_required_sections() {
    let content = include_str!("../lostfound.toml.example");
    let value: toml::Value = toml::from_str(content).unwrap();

    for section in ["server", "database", "auth"] {
        assert!(
            value.get(section).is_some(),
            "Section '{}' should exist in config",
            section
        );
    }
}

#[test]
fn test_example_config_parses_into_schema() {
    // The example uses ${VAR:-default} placeholders; after the loader's
    // interpolation the defaults apply, but the raw schema types still need
    // to line up for the non-interpolated fields.
    let content = include_str!("../lostfound.toml.example");
    let interpolated = content
        .replace("${DB_HOST:-localhost}", "localhost")
        .replace("${DB_USER:-postgres}", "postgres")
        .replace("${DB_PASSWORD:-postgres}", "postgres")
        .replace("${DB_NAME:-lostfound}", "lostfound")
        .replace(
            "${JWT_SECRET:-lostfound-secret-key-change-in-production}",
            "test-secret",
        );

    let config: Config = toml::from_str(&interpolated).expect("example config must parse");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.auth.token_ttl_hours, 24);
    assert_eq!(config.auth.secret, "test-secret");
}
