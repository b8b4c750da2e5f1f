pub mod client;
pub mod endpoints;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;

#[cfg(test)]
use mockall::automock;

use crate::{
    config::ApiConfig,
    models::{
        ChatRequest, ChatResponse, Conversation, ConversationSummary, DocumentList,
        KnowledgeStats, Message, RebuildResult, RegisterRequest, Token, UploadResult, User,
    },
};
use async_trait::async_trait;
use eyre::Result;
use std::{path::PathBuf, sync::Arc, time::Duration};

/// The regulation backend as seen by the client. Failed responses surface
/// as [`ApiError`] inside the returned report.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait Api {
    /// Set or clear the bearer token attached to every request.
    fn set_token(&self, token: Option<String>);

    async fn login(&self, username: String, password: String) -> Result<Token>;
    async fn register(&self, request: RegisterRequest) -> Result<User>;
    async fn me(&self) -> Result<User>;
    async fn logout(&self) -> Result<()>;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>>;
    async fn get_conversation(&self, id: String) -> Result<Conversation>;
    async fn rename_conversation(&self, id: String, title: String) -> Result<Conversation>;
    async fn delete_conversation(&self, id: String) -> Result<()>;
    async fn get_messages(&self, conversation_id: String) -> Result<Vec<Message>>;

    async fn upload_document(&self, path: PathBuf) -> Result<UploadResult>;
    async fn list_documents(&self) -> Result<DocumentList>;
    async fn delete_document(&self, filename: String) -> Result<()>;
    async fn knowledge_stats(&self) -> Result<KnowledgeStats>;
    async fn rebuild_knowledge(&self) -> Result<RebuildResult>;
}

pub type ArcApi = Arc<dyn Api + Send + Sync>;

pub fn new_client(config: &ApiConfig) -> Result<ArcApi> {
    let mut client = ApiClient::new(&config.base_url)?;
    if let Some(secs) = config.timeout_secs {
        client = client.with_timeout(Duration::from_secs(secs as u64));
    }
    Ok(Arc::new(client))
}

/// Find the backend error behind a report, if any.
pub fn api_error(err: &eyre::Report) -> Option<&ApiError> {
    err.chain().find_map(|e| e.downcast_ref::<ApiError>())
}

/// Whether the backend rejected the request's credentials.
pub fn is_unauthorized(err: &eyre::Report) -> bool {
    api_error(err).is_some_and(ApiError::is_unauthorized)
}
