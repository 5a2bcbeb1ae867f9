//! Core types, constants, and pure logic for the remote help-desk ticket
//! importer.
//!
//! This module has zero I/O (no DB, no HTTP). It provides:
//!
//! - Constants for import configuration (page size, upload namespace,
//!   attachment timeout).
//! - Draft types produced by source importers and consumed by the
//!   migration engine (people, attachments, replies, tickets).
//! - The [`SourceImporter`] capability trait implemented once per remote
//!   system.
//! - The [`ImportError`] taxonomy for remote-call failures.
//! - Pure functions: pagination and progress arithmetic, display-name
//!   splitting, remote timestamp handling, and naming helpers.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ticket::{PersonType, SourceKind, TicketPriority, TicketStatus};
use crate::types::{DbId, Timestamp};

// ── Constants ────────────────────────────────────────────────────────

/// Default number of remote tickets fetched per migration page.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Upper bound for a configured page size. Large pages make a single
/// request run long; the remote is queried one ticket at a time.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Directory namespace under the uploads root for imported attachments.
/// Kept identical to the system this service replaces so existing
/// attachment trees remain valid.
pub const UPLOAD_NAMESPACE: &str = "fluent-support";

/// Default timeout for a single attachment download, in seconds.
pub const ATTACHMENT_TIMEOUT_SECS: u64 = 60;

/// Conversation type recorded for imported replies.
pub const CONVERSATION_TYPE_RESPONSE: &str = "response";

/// Storage driver recorded for locally materialized attachments.
pub const ATTACHMENT_DRIVER_LOCAL: &str = "local";

/// Status recorded for successfully materialized attachments.
pub const ATTACHMENT_STATUS_ACTIVE: &str = "active";

// ── Draft types ──────────────────────────────────────────────────────

/// A person as described by the remote system, before resolution against
/// the local `persons` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub person_type: PersonType,
}

/// A remote attachment reference. Nothing has been downloaded yet; the
/// engine decides whether the content URL is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDraft {
    pub file_name: String,
    pub content_url: String,
    pub content_type: Option<String>,
}

/// A single reply (conversation entry) under a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyDraft {
    pub content: String,
    pub conversation_type: String,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    /// Author resolved from the remote payload. `None` when the remote
    /// thread referenced an author it did not embed; no fallback person
    /// is invented.
    pub author: Option<PersonDraft>,
    /// Whether the reply came from the customer side. `None` exactly when
    /// `author` is `None`.
    pub is_customer_reply: Option<bool>,
    pub attachments: Vec<AttachmentDraft>,
}

/// A remote ticket fully described and normalized, ready for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDraft {
    /// The remote system's native ticket id. Together with `source` this
    /// is the local dedup key.
    pub origin_id: i64,
    pub title: String,
    pub content: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub client_priority: TicketPriority,
    pub source: String,
    pub customer: PersonDraft,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub attachments: Vec<AttachmentDraft>,
    pub replies: Vec<ReplyDraft>,
}

/// A ticket that could not be fully fetched; the page continues without
/// it. Also used to report per-ticket persistence failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedTicket {
    pub origin_id: i64,
    pub reason: String,
}

/// One fetched page of remote tickets plus the tickets the importer had
/// to leave behind.
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    pub tickets: Vec<TicketDraft>,
    pub skipped: Vec<SkippedTicket>,
}

/// Outcome of a `delete_tickets` call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeletedPage {
    pub deleted: u64,
    /// `false` when the importer kept the default no-op; imports through
    /// such an importer are one-way.
    pub supported: bool,
}

// ── Per-ticket outcomes ──────────────────────────────────────────────

/// Persistence outcome for a single ticket within one imported page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    /// Newly inserted, with the local ticket id.
    Inserted(DbId),
    /// Already present locally for this `(origin_id, source)`; nothing
    /// was written.
    Skipped,
    /// Fetch or persistence failed for this ticket alone.
    Failed { origin_id: i64, reason: String },
}

/// Aggregated view of one page's per-ticket outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub insert_ids: Vec<DbId>,
    pub skips: u64,
    pub failures: Vec<SkippedTicket>,
}

/// Fold a list of per-ticket outcomes into insert ids, a skip count, and
/// itemized failures.
pub fn summarize_outcomes(outcomes: &[TicketOutcome]) -> PageSummary {
    let mut summary = PageSummary::default();
    for outcome in outcomes {
        match outcome {
            TicketOutcome::Inserted(id) => summary.insert_ids.push(*id),
            TicketOutcome::Skipped => summary.skips += 1,
            TicketOutcome::Failed { origin_id, reason } => summary.failures.push(SkippedTicket {
                origin_id: *origin_id,
                reason: reason.clone(),
            }),
        }
    }
    summary
}

// ── Errors ───────────────────────────────────────────────────────────

/// Failure of a remote source call.
///
/// `Transport` and `Authentication` are fatal to the page being imported.
/// `Application` and `Http` abort the page when raised by the count or
/// list calls, but are isolated to a single ticket when raised while
/// fetching that ticket's detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// The request never produced an HTTP response (DNS, TLS, connect,
    /// timeout).
    #[error("Error while making request: {0}")]
    Transport(String),

    /// The remote rejected the credentials (HTTP 401).
    #[error("Couldn't authenticate you")]
    Authentication,

    /// A structured error payload delivered with HTTP 200.
    #[error("{}", application_message(.message, .description))]
    Application {
        message: String,
        description: Option<String>,
    },

    /// Any other non-success HTTP status.
    #[error("{message}")]
    Http { code: u16, message: String },
}

impl ImportError {
    /// Fatal errors abort the page being imported regardless of where
    /// they occur.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Authentication)
    }
}

fn application_message(message: &str, description: &Option<String>) -> String {
    match description {
        Some(desc) => format!("{message}: {desc}"),
        None => message.to_string(),
    }
}

/// Fixed user-facing message shown when a source rejects the configured
/// credentials.
pub fn authentication_failed_message(display_name: &str) -> String {
    format!("Authentication failed. Please check your {display_name} credentials.")
}

// ── SourceImporter ───────────────────────────────────────────────────

/// Capability interface for a remote help-desk system.
///
/// Implementations fetch remote tickets one page at a time and normalize
/// them into draft values; the migration engine owns persistence,
/// attachment materialization, and progress reporting.
#[async_trait]
pub trait SourceImporter: Send + Sync {
    /// Stable key identifying the source system (e.g. `"zendesk"`).
    fn handler(&self) -> &str;

    /// Human-readable name used in stats and error messages.
    fn display_name(&self) -> &str;

    /// Source category.
    fn kind(&self) -> SourceKind {
        SourceKind::Saas
    }

    /// Total number of tickets on the remote system. Re-queried on every
    /// page request; totals can legitimately change mid-migration.
    async fn count_total(&self) -> Result<u64, ImportError>;

    /// Fetch one page of tickets, fully described (customer, replies,
    /// attachment references).
    async fn fetch_page(&self, page: u64, per_page: u64) -> Result<FetchedPage, ImportError>;

    /// Reverse one page of a previous import. Importer-specific and
    /// optional; the default does nothing and reports itself unsupported.
    async fn delete_tickets(&self, _page: u64) -> Result<DeletedPage, ImportError> {
        Ok(DeletedPage {
            deleted: 0,
            supported: false,
        })
    }
}

// ── Pagination & progress arithmetic ─────────────────────────────────

/// Number of pages needed to cover `total_tickets` at `page_size` per
/// page. Zero when `page_size` is zero.
pub fn total_pages(total_tickets: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        0
    } else {
        total_tickets.div_ceil(page_size)
    }
}

/// Whether any page after `page` remains.
pub fn has_more(page: u64, total_pages: u64) -> bool {
    page < total_pages
}

/// Cumulative ticket count after this page: what this call inserted plus
/// everything prior full pages covered.
pub fn completed_tickets(completed_now: u64, page: u64, page_size: u64) -> u64 {
    completed_now + page.saturating_sub(1) * page_size
}

/// Whole-number completion percentage, floored. Zero when the total is
/// zero.
pub fn completed_percent(completed: u64, total_tickets: u64) -> u64 {
    if total_tickets == 0 {
        0
    } else {
        completed.saturating_mul(100) / total_tickets
    }
}

/// Tickets not yet covered. Saturates at zero when the remote total
/// shrank mid-migration.
pub fn remaining(total_tickets: u64, completed: u64) -> u64 {
    total_tickets.saturating_sub(completed)
}

// ── Naming & formatting helpers ──────────────────────────────────────

/// Split a remote display name on the first space into (first, last).
/// A name with no space yields an empty last name; this quirk is kept
/// deliberately rather than guessed around.
pub fn split_display_name(name: &str) -> (String, String) {
    let name = name.trim();
    match name.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (name.to_string(), String::new()),
    }
}

/// Parse a remote timestamp. Accepts RFC 3339 plus two common bare
/// datetime layouts (assumed UTC). `None` on anything else.
pub fn parse_remote_timestamp(value: &str) -> Option<Timestamp> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for layout in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` in UTC, 24-hour clock.
/// Used for the persisted `last_migrated` marker.
pub fn format_mysql_datetime(ts: Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Per-ticket attachment directory name under the upload namespace:
/// `{handler}-ticket-{origin_id}`.
pub fn attachment_dir_name(handler: &str, origin_id: i64) -> String {
    format!("{handler}-ticket-{origin_id}")
}

/// Key of the per-handler option row holding the last-migrated marker.
pub fn last_migrated_option_key(handler: &str) -> String {
    format!("_ticketport_migrate_{handler}")
}

// ── Tests ────────────────────────────────────────────────────────────
