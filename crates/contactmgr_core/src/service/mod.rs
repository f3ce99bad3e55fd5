//! Core use-case services.
//!
//! Keep the CLI decoupled from storage details.

pub mod contact_service;
