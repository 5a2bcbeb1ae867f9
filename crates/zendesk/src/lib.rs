//! Zendesk source importer: REST API client, wire types, and the
//! transformation from remote tickets into ticketport drafts.

pub mod api;
pub mod importer;
pub mod types;

pub use api::ZendeskApi;
pub use importer::ZendeskImporter;
