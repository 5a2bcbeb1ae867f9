//! The migration engine: importer registry, per-handler locking,
//! attachment materialization, and the page orchestrator.
//!
//! Importers describe remote tickets; everything stateful (DB writes,
//! file downloads, progress bookkeeping) happens here, so a new source
//! system only has to implement `SourceImporter` and register itself.

pub mod attachments;
pub mod locks;
pub mod orchestrator;
pub mod registry;
