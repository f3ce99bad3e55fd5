//! Contact entity.
//!
//! # Responsibility
//! - Hold the five persisted contact fields.
//! - Render a human-readable line listing every field by name.
//!
//! # Invariants
//! - `id` stays at [`UNSAVED_CONTACT_ID`] until the first successful save.
//! - Once assigned, `id` is unique per table and never reused.

use crate::model::builder::ContactBuilder;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Surrogate key assigned by the storage engine on insert.
pub type ContactId = i64;

/// Key value carried by a contact that has never been saved.
pub const UNSAVED_CONTACT_ID: ContactId = 0;

/// One contact record.
///
/// `Default` yields an unsaved contact with empty names and no email/phone.
/// Fields are public and freely mutable; the gateway only reads them on save
/// and writes `id` back afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Engine-assigned key; `0` means unsaved.
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<i64>,
}

impl Contact {
    /// Creates an unsaved contact from the builder's current values.
    ///
    /// Copies the four user-settable fields verbatim.
    pub fn from_builder(builder: &ContactBuilder) -> Self {
        Self {
            id: UNSAVED_CONTACT_ID,
            first_name: builder.first_name().to_owned(),
            last_name: builder.last_name().to_owned(),
            email: builder.email().map(str::to_owned),
            phone: builder.phone(),
        }
    }

    /// Returns whether the storage engine has assigned a key to this contact.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_CONTACT_ID
    }

    /// Compares every field except `id`.
    pub fn same_details(&self, other: &Contact) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.email == other.email
            && self.phone == other.phone
    }
}

impl From<ContactBuilder> for Contact {
    fn from(builder: ContactBuilder) -> Self {
        Self::from_builder(&builder)
    }
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Contact{{id={}, firstName='{}', lastName='{}', email=",
            self.id, self.first_name, self.last_name
        )?;
        match &self.email {
            Some(email) => write!(f, "'{email}'")?,
            None => f.write_str("'null'")?,
        }
        match self.phone {
            Some(phone) => write!(f, ", phone={phone}}}"),
            None => f.write_str(", phone=null}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, UNSAVED_CONTACT_ID};

    #[test]
    fn display_lists_every_field_by_name() {
        let contact = Contact {
            id: 7,
            first_name: "Moo".to_string(),
            last_name: "Mee".to_string(),
            email: Some("moo@something.com".to_string()),
            phone: Some(888_776_543),
        };

        assert_eq!(
            contact.to_string(),
            "Contact{id=7, firstName='Moo', lastName='Mee', email='moo@something.com', phone=888776543}"
        );
    }

    #[test]
    fn display_renders_absent_email_quoted_and_absent_phone_bare() {
        let contact = Contact::default();

        assert_eq!(
            contact.to_string(),
            "Contact{id=0, firstName='', lastName='', email='null', phone=null}"
        );
    }

    #[test]
    fn same_details_ignores_id() {
        let mut saved = Contact {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            ..Contact::default()
        };
        let unsaved = saved.clone();
        saved.id = 42;

        assert!(saved.same_details(&unsaved));
        assert_ne!(saved, unsaved);
        assert!(saved.is_persisted());
        assert_eq!(unsaved.id, UNSAVED_CONTACT_ID);
    }
}
