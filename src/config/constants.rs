pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

pub const HELLO_MESSAGE: &str = "Welcome to the regulation lookup assistant. Ask a question about company regulations to get started.";

pub const LOG_FILE_PATH: &str = "/tmp/regbot.log";

pub const STORAGE_FILE_PATH: &str = "${HOME}/.local/share/regbot/session.db";

pub const LIGHT_HIGHLIGHT_THEME: &str = "InspiredGitHub";

pub const DARK_HIGHLIGHT_THEME: &str = "base16-ocean.dark";

/// Storage keys shared with the web client
pub const TOKEN_KEY: &str = "regulation_token";
pub const USER_KEY: &str = "regulation_user";
pub const THEME_KEY: &str = "regulation_theme";

/// Document types accepted by the knowledge base
pub const ALLOWED_DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".doc", ".txt"];

pub const MAX_TITLE_WIDTH: usize = 40;
