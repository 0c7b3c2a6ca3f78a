//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the façade decoupled from storage details.

pub mod glyph_service;
pub mod grammar_service;
pub mod lexicon_service;
