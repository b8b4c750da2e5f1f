pub const LOGIN: &str = "/api/auth/login";
pub const REGISTER: &str = "/api/auth/register";
pub const ME: &str = "/api/auth/me";
pub const LOGOUT: &str = "/api/auth/logout";
pub const CHAT: &str = "/api/chat";
pub const CONVERSATIONS: &str = "/api/conversations";
pub const KNOWLEDGE: &str = "/api/knowledge";
