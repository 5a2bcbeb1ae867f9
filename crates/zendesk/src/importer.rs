//! Transformation from Zendesk wire records into ticketport drafts,
//! plus the [`SourceImporter`] implementation.
//!
//! Vocabulary mapping is total: unknown remote statuses and priorities
//! fall back to the defaults rather than failing the ticket. The first
//! comment on a Zendesk ticket repeats the description, so it becomes
//! the ticket body (and donates its attachments) instead of a reply.

use async_trait::async_trait;
use ticketport_core::importer::{
    parse_remote_timestamp, split_display_name, AttachmentDraft, FetchedPage, ImportError,
    PersonDraft, ReplyDraft, SkippedTicket, SourceImporter, TicketDraft,
    CONVERSATION_TYPE_RESPONSE,
};
use ticketport_core::sanitize::{sanitize_plain_text, sanitize_rich_text};
use ticketport_core::ticket::{PersonType, TicketPriority, TicketStatus};

use crate::api::ZendeskApi;
use crate::types::{CommentsPayload, RemoteAttachment, RemoteComment, RemoteTicket, RemoteUser};

pub const HANDLER: &str = "zendesk";

/// Importer for a Zendesk workspace.
pub struct ZendeskImporter {
    api: ZendeskApi,
}

impl ZendeskImporter {
    pub fn new(api: ZendeskApi) -> Self {
        Self { api }
    }

    /// Fetch the comment thread and requester for one remote ticket and
    /// build the draft. Errors are demoted to per-ticket skips unless
    /// they are fatal for the whole run.
    async fn assemble(&self, ticket: &RemoteTicket) -> Result<TicketDraft, AssembleError> {
        let thread = self.api.ticket_comments(ticket.id).await.map_err(demote)?;

        let requester_id = ticket
            .requester_id
            .ok_or_else(|| AssembleError::Skip("ticket has no requester".to_string()))?;
        let user = self.api.user(requester_id).await.map_err(demote)?;
        let customer = requester_person(&user).ok_or_else(|| {
            AssembleError::Skip(format!("requester {requester_id} has no email address"))
        })?;

        Ok(build_ticket_draft(ticket, customer, thread))
    }
}

#[async_trait]
impl SourceImporter for ZendeskImporter {
    fn handler(&self) -> &str {
        HANDLER
    }

    fn display_name(&self) -> &str {
        "Zendesk"
    }

    async fn count_total(&self) -> Result<u64, ImportError> {
        self.api.count_tickets().await
    }

    async fn fetch_page(&self, page: u64, per_page: u64) -> Result<FetchedPage, ImportError> {
        let remote = self.api.tickets_page(page, per_page).await?;
        let mut fetched = FetchedPage::default();
        for ticket in &remote.tickets {
            match self.assemble(ticket).await {
                Ok(draft) => fetched.tickets.push(draft),
                Err(AssembleError::Skip(reason)) => fetched.skipped.push(SkippedTicket {
                    origin_id: ticket.id,
                    reason,
                }),
                Err(AssembleError::Fatal(err)) => return Err(err),
            }
        }
        Ok(fetched)
    }
}

enum AssembleError {
    /// This ticket is unusable; record it and move on.
    Skip(String),
    /// The whole run must stop (credentials or transport).
    Fatal(ImportError),
}

fn demote(err: ImportError) -> AssembleError {
    if err.is_fatal() {
        AssembleError::Fatal(err)
    } else {
        AssembleError::Skip(err.to_string())
    }
}

// ── Vocabulary mapping ──────────────────────────────────────────────────────

fn map_status(value: Option<&str>) -> TicketStatus {
    match value {
        Some("open") => TicketStatus::Active,
        Some("pending") => TicketStatus::Waiting,
        Some("solved") => TicketStatus::Closed,
        _ => TicketStatus::Active,
    }
}

fn map_priority(value: Option<&str>) -> TicketPriority {
    match value {
        Some("low") | Some("normal") => TicketPriority::Normal,
        Some("high") => TicketPriority::Medium,
        Some("urgent") => TicketPriority::Critical,
        _ => TicketPriority::Normal,
    }
}

// ── Person resolution ───────────────────────────────────────────────────────

/// The ticket requester is always stored as a customer, whatever role
/// Zendesk assigns them.
fn requester_person(user: &RemoteUser) -> Option<PersonDraft> {
    person_with_type(user, PersonType::Customer)
}

/// Comment authors keep their remote role: end-users are customers,
/// everyone else is an agent.
fn author_person(user: &RemoteUser) -> Option<PersonDraft> {
    let person_type = if user.role.as_deref() == Some("end-user") {
        PersonType::Customer
    } else {
        PersonType::Agent
    };
    person_with_type(user, person_type)
}

fn person_with_type(user: &RemoteUser, person_type: PersonType) -> Option<PersonDraft> {
    let email = user.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
    let (first_name, last_name) = split_display_name(user.name.as_deref().unwrap_or_default());
    Some(PersonDraft {
        first_name,
        last_name,
        email: email.to_string(),
        person_type,
    })
}

// ── Draft assembly ──────────────────────────────────────────────────────────

/// Build the full draft from a remote ticket, its resolved requester,
/// and its comment thread.
fn build_ticket_draft(
    ticket: &RemoteTicket,
    customer: PersonDraft,
    mut thread: CommentsPayload,
) -> TicketDraft {
    // The first comment mirrors the description; pull it out so it is
    // not duplicated as a reply.
    let first = if thread.comments.is_empty() {
        None
    } else {
        Some(thread.comments.remove(0))
    };

    let raw_content = ticket
        .description
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .or_else(|| first.as_ref().and_then(|c| c.body.clone()))
        .unwrap_or_default();

    let attachments = first
        .as_ref()
        .map(|c| attachment_drafts(&c.attachments))
        .unwrap_or_default();

    let replies = thread
        .comments
        .iter()
        .map(|comment| reply_draft(comment, &thread.users))
        .collect();

    let priority = map_priority(ticket.priority.as_deref());

    TicketDraft {
        origin_id: ticket.id,
        title: ticket_title(ticket),
        content: sanitize_rich_text(&raw_content),
        status: map_status(ticket.status.as_deref()),
        priority,
        client_priority: priority,
        source: HANDLER.to_string(),
        customer,
        created_at: ticket.created_at.as_deref().and_then(parse_remote_timestamp),
        updated_at: ticket.updated_at.as_deref().and_then(parse_remote_timestamp),
        attachments,
        replies,
    }
}

fn ticket_title(ticket: &RemoteTicket) -> String {
    let cleaned = sanitize_plain_text(ticket.subject.as_deref().unwrap_or_default());
    if cleaned.is_empty() {
        format!("Ticket #{}", ticket.id)
    } else {
        cleaned
    }
}

fn reply_draft(comment: &RemoteComment, users: &[RemoteUser]) -> ReplyDraft {
    let author_user = comment
        .author_id
        .and_then(|id| users.iter().find(|u| u.id == id));
    let author = author_user.and_then(author_person);
    let is_customer_reply = author_user.map(|user| user.role.as_deref() == Some("end-user"));

    let created_at = comment.created_at.as_deref().and_then(parse_remote_timestamp);
    let updated_at = comment
        .updated_at
        .as_deref()
        .and_then(parse_remote_timestamp)
        .or(created_at);

    ReplyDraft {
        content: sanitize_rich_text(comment.body.as_deref().unwrap_or_default()),
        conversation_type: CONVERSATION_TYPE_RESPONSE.to_string(),
        created_at,
        updated_at,
        author,
        is_customer_reply,
        attachments: attachment_drafts(&comment.attachments),
    }
}

fn attachment_drafts(attachments: &[RemoteAttachment]) -> Vec<AttachmentDraft> {
    attachments
        .iter()
        .filter_map(|attachment| {
            let content_url = attachment
                .content_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())?;
            let file_name = match attachment.file_name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => file_name_from_url(content_url),
            };
            Some(AttachmentDraft {
                file_name,
                content_url: content_url.to_string(),
                content_type: attachment.content_type.clone(),
            })
        })
        .collect()
}

fn file_name_from_url(url: &str) -> String {
    let tail = url.rsplit('/').next().unwrap_or("");
    let tail = tail.split('?').next().unwrap_or("");
    if tail.is_empty() {
        "attachment".to_string()
    } else {
        tail.to_string()
    }
}
