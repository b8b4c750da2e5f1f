use super::constants::*;

pub(crate) fn hello_message() -> Option<String> {
    Some(HELLO_MESSAGE.to_string())
}

pub(crate) fn api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn log_file_path() -> String {
    LOG_FILE_PATH.to_string()
}

pub(crate) fn light_highlight_theme() -> String {
    LIGHT_HIGHLIGHT_THEME.to_string()
}

pub(crate) fn dark_highlight_theme() -> String {
    DARK_HIGHLIGHT_THEME.to_string()
}

pub(crate) fn storage_file_path() -> Option<String> {
    Some(STORAGE_FILE_PATH.to_string())
}
