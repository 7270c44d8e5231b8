//! Domain model for the article store.
//!
//! # Responsibility
//! - Define the canonical record shape used by core business logic.
//! - Keep presence validation in one place so every write path agrees on it.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `ArticleId`.
//! - A record is persistable iff `title` and `content` are present
//!   (non-empty after whitespace trim).

pub mod article;
