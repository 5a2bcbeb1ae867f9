//! Runs one page of a migration end to end.
//!
//! The orchestrator holds no state between calls. Each invocation counts
//! the remote total (re-queried every time; totals can legitimately
//! change mid-migration), fetches one page, persists every ticket in it,
//! and reports progress arithmetic computed from whatever was known at
//! the time. A fatal fetch error produces a reportable result rather
//! than an `Err`: the caller always gets the same response shape, with
//! `error = true` and a human message, and already-committed inserts
//! stay committed.

use chrono::Utc;
use serde::Serialize;
use ticketport_core::importer::{
    self, authentication_failed_message, format_mysql_datetime, last_migrated_option_key,
    summarize_outcomes, AttachmentDraft, ImportError, ReplyDraft, SkippedTicket, SourceImporter,
    TicketDraft, TicketOutcome,
};
use ticketport_core::types::DbId;
use ticketport_db::models::{CreateAttachment, CreateConversation, CreateImportedTicket, UpsertPerson};
use ticketport_db::repositories::{
    AttachmentRepo, ConversationRepo, OptionRepo, PersonRepo, TicketRepo,
};
use ticketport_db::DbPool;

use crate::engine::attachments::AttachmentFetcher;

/// Message returned once the final page has been imported cleanly.
pub const COMPLETION_MESSAGE: &str = "All tickets have been imported successfully";

/// One page-import request, already validated by the HTTP layer.
#[derive(Debug, Clone)]
pub struct ImportPageRequest {
    /// 1-based page number.
    pub page: u64,
    pub page_size: u64,
    /// Local mailbox the imported tickets are filed under, if any.
    pub mailbox_id: Option<DbId>,
}

/// Everything the admin UI needs to render progress and decide whether
/// to request the next page.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPageResult {
    pub handler: String,
    pub insert_ids: Vec<DbId>,
    /// Tickets already present locally for this `(origin_id, source)`.
    pub skips: u64,
    /// Tickets this call could not fetch or persist; the page continued
    /// without them.
    pub failures: Vec<SkippedTicket>,
    pub has_more: bool,
    /// Whole-number completion percentage, floored.
    pub completed: u64,
    pub imported_page: u64,
    pub total_pages: u64,
    pub next_page: u64,
    pub total_tickets: u64,
    pub remaining: u64,
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Import one page of tickets from `importer` into the local store.
pub async fn run_import_page(
    pool: &DbPool,
    fetcher: &AttachmentFetcher,
    importer: &dyn SourceImporter,
    request: &ImportPageRequest,
) -> ImportPageResult {
    let handler = importer.handler().to_string();
    let page = request.page;
    let page_size = request.page_size;
    tracing::info!(handler, page, page_size, "importing remote ticket page");

    let mut total_tickets = 0u64;
    let mut fetch_error: Option<ImportError> = None;
    let mut outcomes: Vec<TicketOutcome> = Vec::new();

    match importer.count_total().await {
        Ok(total) => {
            total_tickets = total;
            match importer.fetch_page(page, page_size).await {
                Ok(fetched) => {
                    for skipped in fetched.skipped {
                        outcomes.push(TicketOutcome::Failed {
                            origin_id: skipped.origin_id,
                            reason: skipped.reason,
                        });
                    }
                    for draft in &fetched.tickets {
                        let outcome =
                            match persist_ticket(pool, fetcher, request.mailbox_id, draft).await {
                                Ok(Some(id)) => TicketOutcome::Inserted(id),
                                Ok(None) => TicketOutcome::Skipped,
                                Err(reason) => {
                                    tracing::warn!(
                                        handler,
                                        origin_id = draft.origin_id,
                                        reason,
                                        "ticket left behind"
                                    );
                                    TicketOutcome::Failed {
                                        origin_id: draft.origin_id,
                                        reason,
                                    }
                                }
                            };
                        outcomes.push(outcome);
                    }
                }
                Err(err) => fetch_error = Some(err),
            }
        }
        Err(err) => fetch_error = Some(err),
    }

    let summary = summarize_outcomes(&outcomes);
    let completed_now = summary.insert_ids.len() as u64;

    // Progress is derived from the total as it was known when the page
    // ran. A failed count leaves the total at zero, so has_more comes
    // out false without being forced.
    let total_pages = importer::total_pages(total_tickets, page_size);
    let has_more = importer::has_more(page, total_pages);
    let completed_tickets = importer::completed_tickets(completed_now, page, page_size);
    let completed = importer::completed_percent(completed_tickets, total_tickets);
    let remaining = importer::remaining(total_tickets, completed_tickets);

    let (error, message) = match fetch_error {
        Some(err) => {
            tracing::warn!(handler, page, error = %err, "page import aborted");
            (true, Some(page_error_message(&err, importer.display_name())))
        }
        None if !has_more && (total_tickets > 0 || completed_now > 0) => {
            mark_completed(pool, &handler).await;
            (false, Some(COMPLETION_MESSAGE.to_string()))
        }
        None => (false, None),
    };

    tracing::debug!(
        handler,
        page,
        inserted = summary.insert_ids.len(),
        skips = summary.skips,
        failures = summary.failures.len(),
        has_more,
        "page import finished"
    );

    ImportPageResult {
        handler,
        insert_ids: summary.insert_ids,
        skips: summary.skips,
        failures: summary.failures,
        has_more,
        completed,
        imported_page: page,
        total_pages,
        next_page: page + 1,
        total_tickets,
        remaining,
        error,
        message,
    }
}

fn page_error_message(err: &ImportError, display_name: &str) -> String {
    match err {
        ImportError::Authentication => authentication_failed_message(display_name),
        other => other.to_string(),
    }
}

/// Record the completion marker. Failure to write it is logged and
/// swallowed: the tickets themselves are already imported.
async fn mark_completed(pool: &DbPool, handler: &str) {
    let key = last_migrated_option_key(handler);
    let stamp = format_mysql_datetime(Utc::now());
    match OptionRepo::set(pool, &key, &stamp).await {
        Ok(_) => tracing::info!(handler, last_migrated = stamp, "migration complete"),
        Err(err) => {
            tracing::error!(handler, error = %err, "could not persist migration completion marker");
        }
    }
}

// ── Per-ticket persistence ───────────────────────────────────────────

/// Persist a single ticket draft: dedup check, customer upsert, ticket
/// insert, attachments, then replies with their authors and attachments.
///
/// `Ok(None)` means the ticket already existed locally. There is no
/// surrounding transaction; a failure partway leaves the rows written so
/// far, and the ticket is reported as failed so the operator can see it.
async fn persist_ticket(
    pool: &DbPool,
    fetcher: &AttachmentFetcher,
    mailbox_id: Option<DbId>,
    draft: &TicketDraft,
) -> Result<Option<DbId>, String> {
    if TicketRepo::find_by_origin(pool, draft.origin_id, &draft.source)
        .await
        .map_err(|err| format!("dedup lookup failed: {err}"))?
        .is_some()
    {
        return Ok(None);
    }

    let customer = PersonRepo::upsert(pool, &UpsertPerson::from(&draft.customer))
        .await
        .map_err(|err| format!("customer upsert failed: {err}"))?;

    let inserted = TicketRepo::insert_imported(
        pool,
        &CreateImportedTicket {
            customer_id: customer.id,
            mailbox_id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            status: draft.status.as_str().to_string(),
            priority: draft.priority.as_str().to_string(),
            client_priority: draft.client_priority.as_str().to_string(),
            source: draft.source.clone(),
            origin_id: draft.origin_id,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        },
    )
    .await
    .map_err(|err| format!("ticket insert failed: {err}"))?;

    let ticket = match inserted {
        Some(ticket) => ticket,
        // Another import of the same page won the insert race.
        None => return Ok(None),
    };

    record_attachments(
        pool,
        fetcher,
        draft,
        Some(ticket.id),
        None,
        &draft.attachments,
    )
    .await?;

    for reply in &draft.replies {
        persist_reply(pool, fetcher, draft, ticket.id, reply).await?;
    }

    Ok(Some(ticket.id))
}

async fn persist_reply(
    pool: &DbPool,
    fetcher: &AttachmentFetcher,
    draft: &TicketDraft,
    ticket_id: DbId,
    reply: &ReplyDraft,
) -> Result<(), String> {
    let person_id = match &reply.author {
        Some(author) => Some(
            PersonRepo::upsert(pool, &UpsertPerson::from(author))
                .await
                .map_err(|err| format!("reply author upsert failed: {err}"))?
                .id,
        ),
        None => None,
    };

    let conversation = ConversationRepo::insert(
        pool,
        &CreateConversation {
            ticket_id,
            person_id,
            conversation_type: reply.conversation_type.clone(),
            content: reply.content.clone(),
            is_customer_reply: reply.is_customer_reply,
            created_at: reply.created_at,
            updated_at: reply.updated_at,
        },
    )
    .await
    .map_err(|err| format!("reply insert failed: {err}"))?;

    record_attachments(
        pool,
        fetcher,
        draft,
        None,
        Some(conversation.id),
        &reply.attachments,
    )
    .await
}

/// Materialize and record a batch of attachments for one ticket or one
/// reply. Items the fetcher skips are dropped silently (the fetcher
/// already logged them); an insert failure fails the ticket.
async fn record_attachments(
    pool: &DbPool,
    fetcher: &AttachmentFetcher,
    draft: &TicketDraft,
    ticket_id: Option<DbId>,
    conversation_id: Option<DbId>,
    attachments: &[AttachmentDraft],
) -> Result<(), String> {
    for attachment in attachments {
        let Some(stored) = fetcher.store(&draft.source, draft.origin_id, attachment).await else {
            continue;
        };
        AttachmentRepo::insert(
            pool,
            &CreateAttachment {
                ticket_id,
                conversation_id,
                title: stored.title,
                file_path: stored.file_path,
                full_url: stored.full_url,
                driver: stored.driver,
                status: stored.status,
                file_type: stored.file_type,
            },
        )
        .await
        .map_err(|err| format!("attachment insert failed: {err}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_maps_to_the_fixed_credentials_message() {
        let msg = page_error_message(&ImportError::Authentication, "Zendesk");
        assert_eq!(
            msg,
            "Authentication failed. Please check your Zendesk credentials."
        );
    }

    #[test]
    fn other_errors_surface_their_own_text() {
        let err = ImportError::Http {
            code: 503,
            message: "HTTP Error 503".to_string(),
        };
        assert_eq!(page_error_message(&err, "Zendesk"), "HTTP Error 503");

        let err = ImportError::Transport("connection refused".to_string());
        assert_eq!(
            page_error_message(&err, "Zendesk"),
            "Error while making request: connection refused"
        );
    }
}
