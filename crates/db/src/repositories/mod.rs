//! Repository functions, one module per table.
//!
//! Repositories are stateless: each function takes a `&PgPool` and
//! returns `Result<_, sqlx::Error>`. Error classification (404 / 409 /
//! 500) happens at the API layer.

pub mod attachment_repo;
pub mod conversation_repo;
pub mod option_repo;
pub mod person_repo;
pub mod ticket_repo;

pub use attachment_repo::AttachmentRepo;
pub use conversation_repo::ConversationRepo;
pub use option_repo::OptionRepo;
pub use person_repo::PersonRepo;
pub use ticket_repo::TicketRepo;
