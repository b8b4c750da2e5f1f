#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use crate::api::{
    Api, endpoints,
    error::{ApiError, LOGIN_FAILED, REQUEST_FAILED, UPLOAD_FAILED},
};
use crate::config::user_agent;
use crate::models::{
    ChatRequest, ChatResponse, Conversation, ConversationSummary, DocumentList, KnowledgeStats,
    Message, RebuildResult, RegisterRequest, RenameRequest, Token, UploadResult, User,
};
use async_trait::async_trait;
use eyre::{Context, Result};
use reqwest::{Method, RequestBuilder, Url, multipart};
use serde::de::DeserializeOwned;
use std::{path::PathBuf, sync::RwLock, time};

/// HTTP client for the regulation backend. Holds the bearer token of the
/// current session; requests are never retried.
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
    timeout: Option<time::Duration>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .wrap_err(format!("parsing api base url {}", base_url))?;
        if base_url.cannot_be_a_base() {
            eyre::bail!("invalid api base url {}", base_url);
        }

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            token: RwLock::new(None),
            timeout: None,
        })
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    /// Join `endpoint` and any extra path segments onto the base url. Extra
    /// segments are percent-encoded.
    pub fn url(&self, endpoint: &str, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(endpoint.split('/').filter(|s| !s.is_empty()))
                .extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, url)
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn execute(&self, req: RequestBuilder, fallback: &str) -> Result<String> {
        let res = req.send().await.map_err(|err| {
            log::error!("API error: {}", err);
            err
        })?;

        let status = res.status();
        let body = res.text().await.wrap_err("reading response body")?;

        if !status.is_success() {
            let err = ApiError::from_body(status.as_u16(), &body, fallback);
            log::error!("API error ({}): {}", err.status, err.message);
            return Err(err.into());
        }

        log::trace!("API response: {}", body);
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        fallback: &str,
        what: &str,
    ) -> Result<T> {
        let body = self.execute(req, fallback).await?;
        let data =
            serde_json::from_str::<T>(&body).wrap_err(format!("parsing {} response", what))?;
        Ok(data)
    }
}

#[async_trait]
impl Api for ApiClient {
    fn set_token(&self, token: Option<String>) {
        if let Ok(mut current) = self.token.write() {
            *current = token.filter(|t| !t.is_empty());
        }
    }

    async fn login(&self, username: String, password: String) -> Result<Token> {
        let req = self
            .request(Method::POST, self.url(endpoints::LOGIN, &[]))
            .form(&[("username", username), ("password", password)]);
        self.send_json(req, LOGIN_FAILED, "login").await
    }

    async fn register(&self, request: RegisterRequest) -> Result<User> {
        let req = self
            .request(Method::POST, self.url(endpoints::REGISTER, &[]))
            .json(&request);
        self.send_json(req, REQUEST_FAILED, "register").await
    }

    async fn me(&self) -> Result<User> {
        let req = self.request(Method::GET, self.url(endpoints::ME, &[]));
        self.send_json(req, REQUEST_FAILED, "profile").await
    }

    async fn logout(&self) -> Result<()> {
        let req = self.request(Method::POST, self.url(endpoints::LOGOUT, &[]));
        self.execute(req, REQUEST_FAILED).await?;
        Ok(())
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        log::debug!(
            "Sending chat message (conversation: {:?})",
            request.conversation_id
        );
        let req = self
            .request(Method::POST, self.url(endpoints::CHAT, &[]))
            .json(&request);
        self.send_json(req, REQUEST_FAILED, "chat").await
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        let req = self.request(Method::GET, self.url(endpoints::CONVERSATIONS, &[]));
        self.send_json(req, REQUEST_FAILED, "conversation list").await
    }

    async fn get_conversation(&self, id: String) -> Result<Conversation> {
        let req = self.request(Method::GET, self.url(endpoints::CONVERSATIONS, &[id.as_str()]));
        self.send_json(req, REQUEST_FAILED, "conversation").await
    }

    async fn rename_conversation(&self, id: String, title: String) -> Result<Conversation> {
        let req = self
            .request(Method::PUT, self.url(endpoints::CONVERSATIONS, &[id.as_str()]))
            .json(&RenameRequest { title });
        self.send_json(req, REQUEST_FAILED, "rename conversation")
            .await
    }

    async fn delete_conversation(&self, id: String) -> Result<()> {
        let req = self.request(Method::DELETE, self.url(endpoints::CONVERSATIONS, &[id.as_str()]));
        self.execute(req, REQUEST_FAILED).await?;
        Ok(())
    }

    async fn get_messages(&self, conversation_id: String) -> Result<Vec<Message>> {
        let url = self.url(endpoints::CONVERSATIONS, &[conversation_id.as_str(), "messages"]);
        let req = self.request(Method::GET, url);
        self.send_json(req, REQUEST_FAILED, "messages").await
    }

    async fn upload_document(&self, path: PathBuf) -> Result<UploadResult> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| eyre::eyre!("{} is not a file", path.display()))?;
        let content = tokio::fs::read(&path)
            .await
            .wrap_err(format!("reading {}", path.display()))?;

        log::debug!("Uploading {} ({} bytes)", filename, content.len());
        let part = multipart::Part::bytes(content).file_name(filename);
        let form = multipart::Form::new().part("file", part);

        let req = self
            .request(Method::POST, self.url(endpoints::KNOWLEDGE, &["upload"]))
            .multipart(form);
        self.send_json(req, UPLOAD_FAILED, "upload").await
    }

    async fn list_documents(&self) -> Result<DocumentList> {
        let req = self.request(Method::GET, self.url(endpoints::KNOWLEDGE, &["documents"]));
        self.send_json(req, REQUEST_FAILED, "document list").await
    }

    async fn delete_document(&self, filename: String) -> Result<()> {
        let url = self.url(endpoints::KNOWLEDGE, &["documents", filename.as_str()]);
        let req = self.request(Method::DELETE, url);
        self.execute(req, REQUEST_FAILED).await?;
        Ok(())
    }

    async fn knowledge_stats(&self) -> Result<KnowledgeStats> {
        let req = self.request(Method::GET, self.url(endpoints::KNOWLEDGE, &["stats"]));
        self.send_json(req, REQUEST_FAILED, "knowledge stats").await
    }

    async fn rebuild_knowledge(&self) -> Result<RebuildResult> {
        let req = self.request(Method::POST, self.url(endpoints::KNOWLEDGE, &["rebuild"]));
        self.send_json(req, REQUEST_FAILED, "rebuild").await
    }
}
