//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod deck_repo;
pub mod flashcard_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

pub use deck_repo::DeckRepo;
pub use flashcard_repo::FlashcardRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
