//! Row models and write DTOs.
//!
//! Each submodule pairs a `FromRow` + `Serialize` entity struct that
//! mirrors its table with a plain DTO the import engine builds for
//! inserts. Vocabulary columns (status, priority, person_type) are
//! stored as TEXT; the typed enums live in `ticketport_core::ticket`.

pub mod app_option;
pub mod attachment;
pub mod conversation;
pub mod person;
pub mod ticket;

pub use app_option::AppOption;
pub use attachment::{Attachment, CreateAttachment};
pub use conversation::{Conversation, CreateConversation};
pub use person::{Person, UpsertPerson};
pub use ticket::{CreateImportedTicket, Ticket};
