pub mod conversation;
pub mod knowledge;
pub mod notice;
pub mod page;
pub mod theme;
pub mod timestamp;
pub mod user;

pub use conversation::{
    Block, ChatRequest, ChatResponse, CodeBlock, Conversation, ConversationSummary, Message,
    RenameRequest, Role,
};
pub use knowledge::*;
pub use notice::*;
pub use page::{AccessError, Page, require_admin, require_authenticated};
pub use theme::Theme;
pub use user::{RegisterRequest, Token, User};
