//! Staged construction for [`Contact`].
//!
//! Both names are required up front; email and phone attach in any order
//! or not at all. `build` borrows the builder, so one builder can stamp out
//! several independent contacts.

use crate::model::contact::Contact;

/// Fluent builder for contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactBuilder {
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<i64>,
}

impl ContactBuilder {
    /// Starts a builder with the two mandatory name fields.
    ///
    /// Empty strings are accepted as-is.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            phone: None,
        }
    }

    /// Sets the email, replacing any earlier value.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number, replacing any earlier value.
    #[must_use]
    pub fn with_phone(mut self, phone: i64) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Produces a new unsaved contact from the current values.
    pub fn build(&self) -> Contact {
        Contact::from_builder(self)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<i64> {
        self.phone
    }
}
