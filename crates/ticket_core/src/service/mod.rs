//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep boundary layers (HTTP, CLI) decoupled from storage details.

pub mod ticket_service;
