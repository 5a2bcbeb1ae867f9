//! Pure domain logic for the ticketport migration service.
//!
//! Everything in this crate is I/O-free: the ticket vocabulary, importer
//! draft types and capability trait, pagination/progress arithmetic, and
//! text sanitizers. The db, zendesk, and api crates build on top.

pub mod error;
pub mod importer;
pub mod query;
pub mod sanitize;
pub mod ticket;
pub mod types;
