//! Persistence gateway contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the contact gateway contract (`save`, `fetch_all`).
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Every gateway call opens and closes its own session.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod contact_repo;
