#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use eyre::{Context, Report, Result};
use futures::future::join_all;
use thiserror::Error;

use crate::{
    api::ArcApi,
    models::{
        ChatRequest, ConversationSummary, Message,
        conversation::{NEW_CONVERSATION_TITLE, UNTITLED_CONVERSATION},
    },
};

pub const CHAT_FAILED_REPLY: &str =
    "Sorry, something went wrong while processing your request. Please try again later.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("conversation title cannot be empty")]
    EmptyTitle,
    #[error("no conversation matches {0:?}")]
    UnknownConversation(String),
}

/// State of the chat page: the open conversation, its transcript and the
/// cached conversation list shown next to it.
pub struct ChatSession {
    api: ArcApi,
    current: Option<String>,
    title: String,
    conversations: Vec<ConversationSummary>,
    transcript: Vec<Message>,
    last_error: Option<Report>,
}

impl ChatSession {
    pub fn new(api: ArcApi) -> Self {
        Self {
            api,
            current: None,
            title: NEW_CONVERSATION_TITLE.to_string(),
            conversations: vec![],
            transcript: vec![],
            last_error: None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// The failure behind the last error reply, if it was not taken yet.
    pub fn take_error(&mut self) -> Option<Report> {
        self.last_error.take()
    }

    pub fn start_new_chat(&mut self) {
        self.current = None;
        self.title = NEW_CONVERSATION_TITLE.to_string();
        self.transcript.clear();
    }

    /// Send `text` in the current conversation and return the reply. Blank
    /// input sends nothing and returns `None`. A failed request yields a
    /// locally built reply flagged with [`Message::failed`]; the failure
    /// itself is kept for [`ChatSession::take_error`].
    pub async fn send_message(&mut self, text: &str) -> Option<Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.last_error = None;

        let user_message = Message::user(text);
        self.transcript.push(match &self.current {
            Some(id) => user_message.with_conversation_id(id.as_str()),
            None => user_message,
        });

        let request = ChatRequest::new(text).with_conversation_id(self.current.clone());
        let reply = match self.api.chat(request).await {
            Ok(res) => {
                if self.current.is_none() {
                    log::info!("Started conversation {}", res.conversation_id);
                    self.current = Some(res.conversation_id.clone());
                    if let Err(err) = self.load_conversations().await {
                        log::error!("Failed to reload conversations: {}", err);
                    }
                    self.title = self.title_of(&res.conversation_id);
                }
                res.response
            }
            Err(err) => {
                log::error!("Chat error: {:#}", err);
                self.last_error = Some(err);
                Message::assistant(CHAT_FAILED_REPLY).with_failed(true)
            }
        };

        self.transcript.push(reply.clone());
        Some(reply)
    }

    pub async fn load_conversations(&mut self) -> Result<&[ConversationSummary]> {
        self.conversations = self
            .api
            .list_conversations()
            .await
            .wrap_err("loading conversations")?;
        Ok(&self.conversations)
    }

    pub async fn open_conversation(&mut self, id: &str) -> Result<&[Message]> {
        let messages = self
            .api
            .get_messages(id.to_string())
            .await
            .wrap_err(format!("loading conversation {}", id))?;

        self.current = Some(id.to_string());
        self.title = self.title_of(id);
        self.transcript = messages;
        Ok(&self.transcript)
    }

    pub async fn delete_conversation(&mut self, id: &str) -> Result<()> {
        self.api
            .delete_conversation(id.to_string())
            .await
            .wrap_err(format!("deleting conversation {}", id))?;

        if self.current.as_deref() == Some(id) {
            self.start_new_chat();
        }
        self.load_conversations().await?;
        Ok(())
    }

    /// Delete every cached conversation at once. All deletions run to
    /// completion; the first failure is reported.
    pub async fn clear_all(&mut self) -> Result<usize> {
        let ids = self
            .conversations
            .iter()
            .map(|c| c.id.clone())
            .collect::<Vec<_>>();

        let results = join_all(
            ids.iter()
                .map(|id| self.api.delete_conversation(id.to_string())),
        )
        .await;

        let total = results.len();
        if let Some(err) = results.into_iter().find_map(Result::err) {
            log::error!("Failed to clear conversations: {}", err);
            if let Err(reload_err) = self.load_conversations().await {
                log::error!("Failed to reload conversations: {}", reload_err);
            }
            return Err(err.wrap_err("clearing conversations"));
        }

        self.start_new_chat();
        self.load_conversations().await?;
        Ok(total)
    }

    pub async fn rename_conversation(&mut self, id: &str, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatError::EmptyTitle.into());
        }

        let renamed = self
            .api
            .rename_conversation(id.to_string(), title.to_string())
            .await
            .wrap_err(format!("renaming conversation {}", id))?;

        if self.current.as_deref() == Some(id) {
            self.title = renamed.title;
        }
        self.load_conversations().await?;
        Ok(())
    }

    /// Resolve a 1-based index into the cached list, or a conversation id.
    pub fn resolve(&self, reference: &str) -> Result<String, ChatError> {
        let reference = reference.trim();
        if let Ok(index) = reference.parse::<usize>() {
            if let Some(conversation) = index
                .checked_sub(1)
                .and_then(|i| self.conversations.get(i))
            {
                return Ok(conversation.id.clone());
            }
        }

        self.conversations
            .iter()
            .find(|c| c.id == reference)
            .map(|c| c.id.clone())
            .ok_or_else(|| ChatError::UnknownConversation(reference.to_string()))
    }

    fn title_of(&self, id: &str) -> String {
        self.conversations
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| UNTITLED_CONVERSATION.to_string())
    }
}
