#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;

use eyre::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{
    api::ArcApi,
    config::constants::ALLOWED_DOCUMENT_EXTENSIONS,
    models::{DocumentList, KnowledgeStats, NoticeMessage, RebuildResult, UploadResult, User},
    warn_notice,
};

use super::Session;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("unsupported file type, allowed types are {}", ALLOWED_DOCUMENT_EXTENSIONS.join(", "))]
    UnsupportedType,
    #[error("file {0} does not exist")]
    NotFound(String),
}

/// Check that `path` names an existing document of a supported type.
pub fn validate_document(path: &Path) -> Result<(), UploadError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_DOCUMENT_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(ext))
    {
        return Err(UploadError::UnsupportedType);
    }

    if !path.is_file() {
        return Err(UploadError::NotFound(path.display().to_string()));
    }
    Ok(())
}

/// Knowledge-base management, available to superusers only.
pub struct AdminConsole {
    api: ArcApi,
    user: User,
}

impl AdminConsole {
    pub async fn open(api: ArcApi, session: &Session) -> Result<Self> {
        let user = session.require_admin().await?;
        Ok(Self { api, user })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub async fn stats(&self) -> Result<KnowledgeStats> {
        self.api
            .knowledge_stats()
            .await
            .wrap_err("loading knowledge stats")
    }

    pub async fn documents(&self) -> Result<DocumentList> {
        self.api
            .list_documents()
            .await
            .wrap_err("loading documents")
    }

    pub async fn upload(&self, path: impl AsRef<Path>) -> Result<UploadResult> {
        let path = path.as_ref();
        validate_document(path)?;

        let result = self.api.upload_document(PathBuf::from(path)).await?;
        log::info!(
            "Uploaded {} ({} chunks)",
            result.filename,
            result.chunks_count
        );
        Ok(result)
    }

    /// Remove a document file. The backend keeps its vectors, so the
    /// returned notice always says so.
    pub async fn delete_document(&self, filename: &str) -> Result<NoticeMessage> {
        self.api
            .delete_document(filename.to_string())
            .await
            .wrap_err(format!("deleting document {}", filename))?;

        log::info!("Deleted document {}", filename);
        Ok(warn_notice!(format!(
            "Deleted {}. Its vector data is not removed from the knowledge base, run `regbot admin rebuild` to drop it.",
            filename
        )))
    }

    pub async fn rebuild(&self) -> Result<RebuildResult> {
        let result = self
            .api
            .rebuild_knowledge()
            .await
            .wrap_err("rebuilding knowledge base")?;
        log::info!(
            "Rebuilt knowledge base: {} documents, {} chunks",
            result.documents_processed,
            result.total_chunks
        );
        Ok(result)
    }
}
