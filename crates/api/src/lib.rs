//! HTTP service for ticketport: configuration, shared state, routes and
//! handlers, plus the migration engine that drives page-by-page imports.

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
