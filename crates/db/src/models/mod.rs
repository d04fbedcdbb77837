//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Projection structs for list endpoints that do not need every column
//! - Insert/update DTOs built by the API layer after validation

pub mod deck;
pub mod flashcard;
pub mod session;
pub mod task;
pub mod user;
