pub mod auth;
pub mod deck;
pub mod flashcard;
pub mod folder;
pub mod task;
