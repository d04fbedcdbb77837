//! Request extractors shared by authenticated handlers.

pub mod auth;
