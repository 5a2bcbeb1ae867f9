//! Materializes remote attachments on local disk.
//!
//! Every ticket gets a deterministic directory under the uploads root:
//! `{uploads_root}/fluent-support/{handler}-ticket-{origin_id}/`. A file
//! already present there is reused as-is, with no network call, so
//! re-running a page never re-downloads. Download problems (transport,
//! non-success status, empty body, disk errors) skip the single
//! attachment and never fail the ticket.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ticketport_core::importer::{
    attachment_dir_name, AttachmentDraft, ATTACHMENT_DRIVER_LOCAL, ATTACHMENT_STATUS_ACTIVE,
    UPLOAD_NAMESPACE,
};

/// A successfully materialized attachment, ready to be recorded in the
/// `attachments` table.
#[derive(Debug, Clone)]
pub struct StoredAttachment {
    pub title: String,
    /// Path relative to the uploads root.
    pub file_path: String,
    /// Public URL under the configured uploads base URL.
    pub full_url: String,
    pub driver: String,
    pub status: String,
    pub file_type: Option<String>,
}

pub struct AttachmentFetcher {
    client: reqwest::Client,
    uploads_root: PathBuf,
    base_url: String,
    timeout: Duration,
}

impl AttachmentFetcher {
    pub fn new(
        client: reqwest::Client,
        uploads_root: PathBuf,
        base_url: String,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            uploads_root,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Ensure `attachment` exists on disk for the given ticket and
    /// return its stored descriptor, or `None` when the item had to be
    /// skipped.
    pub async fn store(
        &self,
        handler: &str,
        origin_id: i64,
        attachment: &AttachmentDraft,
    ) -> Option<StoredAttachment> {
        let dir_rel = format!(
            "{UPLOAD_NAMESPACE}/{}",
            attachment_dir_name(handler, origin_id)
        );
        let file_name = safe_file_name(&attachment.file_name);
        let dir_abs = self.uploads_root.join(&dir_rel);
        let file_abs = dir_abs.join(&file_name);

        if tokio::fs::try_exists(&file_abs).await.unwrap_or(false) {
            tracing::debug!(file = %file_abs.display(), "attachment already on disk, reusing");
        } else {
            self.download(&attachment.content_url, &dir_abs, &file_abs)
                .await?;
        }

        Some(StoredAttachment {
            title: attachment.file_name.clone(),
            file_path: format!("{dir_rel}/{file_name}"),
            full_url: format!("{}/{dir_rel}/{file_name}", self.base_url),
            driver: ATTACHMENT_DRIVER_LOCAL.to_string(),
            status: ATTACHMENT_STATUS_ACTIVE.to_string(),
            file_type: attachment.content_type.clone(),
        })
    }

    async fn download(&self, url: &str, dir: &Path, target: &Path) -> Option<()> {
        if let Err(err) = tokio::fs::create_dir_all(dir).await {
            tracing::warn!(dir = %dir.display(), error = %err, "could not create attachment directory");
            return None;
        }

        let response = match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url, error = %err, "attachment download failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(url, status = %response.status(), "attachment download rejected");
            return None;
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(url, error = %err, "attachment body read failed");
                return None;
            }
        };
        if bytes.is_empty() {
            tracing::warn!(url, "attachment body empty, skipping");
            return None;
        }

        if let Err(err) = tokio::fs::write(target, &bytes).await {
            tracing::warn!(file = %target.display(), error = %err, "could not write attachment");
            return None;
        }
        Some(())
    }
}

/// Reduce a remote-supplied file name to its final component. Remote
/// names are untrusted; a name like `../../x` must not escape the
/// ticket's directory.
fn safe_file_name(name: &str) -> String {
    let candidate = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if candidate.is_empty() || candidate == "." || candidate == ".." {
        "attachment".to_string()
    } else {
        candidate.to_string()
    }
}
