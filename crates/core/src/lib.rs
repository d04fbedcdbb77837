//! Domain logic for the Recallr study backend.
//!
//! Everything here is pure: input validation and the flashcard bulk-sync
//! planner. Persistence lives in `recallr_db`.

pub mod account;
pub mod color;
pub mod deck;
pub mod error;
pub mod flashcard;
pub mod task;
pub mod types;
