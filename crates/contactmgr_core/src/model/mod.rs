//! Contact domain model.
//!
//! # Responsibility
//! - Define the in-memory contact record and its staged construction.
//! - Keep the model free of persistence concerns.
//!
//! # Invariants
//! - A contact carries `id == 0` until the gateway assigns a surrogate key.
//! - Names, email and phone are stored verbatim; nothing is validated.

pub mod builder;
pub mod contact;
