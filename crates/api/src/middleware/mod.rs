//! Request extractors shared by handlers.

pub mod auth;
pub mod client_meta;
pub mod payload;
