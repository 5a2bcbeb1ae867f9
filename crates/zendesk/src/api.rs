//! REST API client for the Zendesk v2 endpoints the importer needs:
//! ticket count, ticket pages, per-ticket comments, and single users.
//!
//! Authentication is HTTP basic with the `{email}/token` convention.
//! Response classification is a pure function over status and body so
//! the error taxonomy is testable without a live endpoint.

use serde::de::DeserializeOwned;
use ticketport_core::importer::ImportError;

use crate::types::{CommentsPayload, RemoteUser, TicketCount, TicketsPage, UserEnvelope};

/// HTTP client for a single Zendesk workspace.
pub struct ZendeskApi {
    client: reqwest::Client,
    base_url: String,
    email: String,
    access_token: String,
}

impl ZendeskApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Workspace URL, e.g. `https://acme.zendesk.com`.
    /// * `email` - Agent email the API token belongs to.
    /// * `access_token` - Zendesk API token.
    pub fn new(base_url: String, email: String, access_token: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, email, access_token)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (the server shares one client across importers).
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        email: String,
        access_token: String,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            email,
            access_token,
        }
    }

    /// Total number of tickets in the workspace.
    pub async fn count_tickets(&self) -> Result<u64, ImportError> {
        let body = self.get_json("/api/v2/tickets/count.json").await?;
        let payload: TicketCount = decode("ticket count", body)?;
        Ok(payload.count.value)
    }

    /// One page of tickets in creation order.
    pub async fn tickets_page(&self, page: u64, per_page: u64) -> Result<TicketsPage, ImportError> {
        let body = self
            .get_json(&format!("/api/v2/tickets.json?page={page}&per_page={per_page}"))
            .await?;
        decode("tickets page", body)
    }

    /// All comments on a ticket, oldest first, with side-loaded authors.
    pub async fn ticket_comments(&self, ticket_id: i64) -> Result<CommentsPayload, ImportError> {
        let body = self
            .get_json(&format!("/api/v2/tickets/{ticket_id}/comments.json?include=attachments,users"))
            .await?;
        decode("ticket comments", body)
    }

    /// A single user by id; used to resolve ticket requesters.
    pub async fn user(&self, user_id: i64) -> Result<RemoteUser, ImportError> {
        let body = self.get_json(&format!("/api/v2/users/{user_id}.json")).await?;
        let payload: UserEnvelope = decode("user", body)?;
        Ok(payload.user)
    }

    // ---- private helpers ----

    /// Issue a GET, read the body as JSON (null when unparseable), and
    /// run it through [`classify_response`].
    async fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value, ImportError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self
            .client
            .get(&url)
            .basic_auth(format!("{}/token", self.email), Some(&self.access_token))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| ImportError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
        classify_response(status, &body)?;
        Ok(body)
    }
}

/// Sort a response into the importer's error taxonomy.
///
/// * 401 always means bad credentials, whatever the body says.
/// * A 2xx whose body carries an `error` key is an application error;
///   Zendesk appends detail under `description`.
/// * Any other non-2xx becomes an HTTP error, preferring the body's
///   `error` text over a generic `HTTP Error {code}`.
pub(crate) fn classify_response(status: u16, body: &serde_json::Value) -> Result<(), ImportError> {
    if status == 401 {
        return Err(ImportError::Authentication);
    }

    let success = (200..300).contains(&status);
    if let Some(message) = error_field(body) {
        if success {
            return Err(ImportError::Application {
                message,
                description: body
                    .get("description")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            });
        }
        return Err(ImportError::Http { code: status, message });
    }

    if !success {
        return Err(ImportError::Http {
            code: status,
            message: format!("HTTP Error {status}"),
        });
    }
    Ok(())
}

/// Extract the `error` field; Zendesk sends either a bare string or an
/// object with a `title`.
fn error_field(body: &serde_json::Value) -> Option<String> {
    match body.get("error")? {
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Object(map) => map
            .get("title")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    }
}

/// Parse a classified-OK body into the expected wire type.
fn decode<T: DeserializeOwned>(what: &'static str, body: serde_json::Value) -> Result<T, ImportError> {
    serde_json::from_value(body).map_err(|err| ImportError::Application {
        message: format!("Unexpected {what} payload"),
        description: Some(err.to_string()),
    })
}
