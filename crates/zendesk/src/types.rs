//! Wire types for the Zendesk REST API (v2).
//!
//! Everything except record ids is optional with a default: real
//! exports are full of half-filled records, and a missing field must
//! degrade to a skip or a fallback, never to a failed page.

use serde::Deserialize;

/// `GET /api/v2/tickets/count.json`
#[derive(Debug, Deserialize)]
pub struct TicketCount {
    pub count: CountValue,
}

#[derive(Debug, Deserialize)]
pub struct CountValue {
    #[serde(default)]
    pub value: u64,
}

/// One page of `GET /api/v2/tickets.json`.
#[derive(Debug, Default, Deserialize)]
pub struct TicketsPage {
    #[serde(default)]
    pub tickets: Vec<RemoteTicket>,
}

/// A ticket as Zendesk returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTicket {
    pub id: i64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub requester_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `GET /api/v2/tickets/{id}/comments.json?include=attachments,users`
///
/// `users` is the side-loaded author list; comment `author_id`s are
/// resolved against it without extra requests.
#[derive(Debug, Default, Deserialize)]
pub struct CommentsPayload {
    #[serde(default)]
    pub comments: Vec<RemoteComment>,
    #[serde(default)]
    pub users: Vec<RemoteUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteComment {
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub attachments: Vec<RemoteAttachment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAttachment {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// `GET /api/v2/users/{id}.json`
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: RemoteUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
