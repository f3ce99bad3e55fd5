//! Contact use-case service.
//!
//! # Invariants
//! - Service APIs never bypass the gateway contract.
//! - Service layer remains storage-agnostic.

use crate::model::builder::ContactBuilder;
use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoResult};

/// Use-case wrapper over a contact gateway.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves `contact` and returns the generated key, also written to `contact.id`.
    pub fn save(&self, contact: &mut Contact) -> RepoResult<ContactId> {
        self.repo.save(contact)
    }

    /// Builds a contact from `builder`, saves it and returns the saved value.
    pub fn create(&self, builder: &ContactBuilder) -> RepoResult<Contact> {
        let mut contact = builder.build();
        self.repo.save(&mut contact)?;
        Ok(contact)
    }

    /// Returns every stored contact.
    pub fn fetch_all(&self) -> RepoResult<Vec<Contact>> {
        self.repo.fetch_all()
    }
}
