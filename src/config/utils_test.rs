use crate::config::{
    StorageConfig,
    constants::{
        DEFAULT_API_BASE_URL, HELLO_MESSAGE, LIGHT_HIGHLIGHT_THEME, LOG_FILE_PATH,
        STORAGE_FILE_PATH,
    },
};

use super::*;

#[test]
fn test_load_configuration() {
    let config = load_configuration("./testdata/config.toml").expect("failed to load config");

    assert_eq!(config.general.verbose, true);
    assert_eq!(config.hello_message(), "Ask me about the travel policy.");

    assert_eq!(config.api.base_url, "https://regulations.example.com");
    assert_eq!(config.api.timeout_secs, Some(60));

    let log = &config.log;
    assert_eq!(log.level.as_deref(), Some("info"));
    let log_filters = log.filters.as_deref().unwrap_or_default();
    assert_eq!(log_filters.len(), 1);
    assert_eq!(log_filters[0].module.as_deref(), Some("regbot::api"));
    assert_eq!(log_filters[0].level.as_deref(), Some("debug"));

    let log_file = &log.file;
    assert_eq!(log_file.path, "/var/log/regbot.log");
    assert_eq!(log_file.append, true);

    assert_eq!(config.theme.light, "Solarized (light)");
    assert_eq!(config.theme.dark, "base16-eighties.dark");
    assert_eq!(
        config.theme.folder_path.as_deref(),
        Some("/etc/regbot/themes")
    );

    match &config.storage {
        StorageConfig::Sqlite(sqlite) => {
            assert_eq!(sqlite.path(), Some("/var/lib/regbot/session.db"));
        }
    }
}

#[test]
fn test_load_configuration_with_some_default_fields() {
    let config =
        load_configuration("./testdata/config_with_default.toml").expect("failed to load config");

    assert_eq!(config.general.verbose, false);
    assert_eq!(config.hello_message(), HELLO_MESSAGE);

    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.api.timeout_secs, Some(30));

    let log = &config.log;
    assert_eq!(log.level.as_deref(), Some("info"));
    assert_eq!(log.file.path, LOG_FILE_PATH);

    assert_eq!(config.theme.light, LIGHT_HIGHLIGHT_THEME);
    assert_eq!(config.theme.dark, "Solarized (dark)");

    match &config.storage {
        StorageConfig::Sqlite(sqlite) => assert_eq!(sqlite.path(), Some(STORAGE_FILE_PATH)),
    }
}

#[test]
fn test_load_highlight_theme() {
    let config = ThemeConfig::default();
    load_highlight_theme(&config, &config.light).expect("light theme is bundled");
    load_highlight_theme(&config, &config.dark).expect("dark theme is bundled");

    let err = load_highlight_theme(&config, "no-such-theme").unwrap_err();
    assert_eq!(err.to_string(), "theme no-such-theme not found");
}

#[test]
fn test_resolve_path() {
    let ret = resolve_path("$REGBOT_TEST_PATH/${REGBOT_USER_PATH}/config.toml")
        .expect("failed to resolve path");
    assert_eq!(ret, "//config.toml");

    let dir = "/tmp/test";
    let user_path = "user_path";
    unsafe {
        std::env::set_var("REGBOT_TEST_PATH", dir);
        std::env::set_var("REGBOT_USER_PATH", user_path);
    }
    let ret = resolve_path("$REGBOT_TEST_PATH/${REGBOT_USER_PATH}/config.toml")
        .expect("failed to resolve path");
    assert_eq!(ret, format!("{dir}/{user_path}/config.toml"));
}

#[test]
fn test_basename() {
    assert_eq!(basename("src/api/client.rs"), "client.rs");
    assert_eq!(basename("main.rs"), "main.rs");
}
