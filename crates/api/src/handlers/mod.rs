//! Request handlers.
//!
//! Each submodule provides the async handler functions for one route
//! group. Handlers validate input, delegate to the migration engine or
//! the repositories in `ticketport_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod importer;
pub mod tickets;
