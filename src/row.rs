use std::fmt;

use thiserror::Error;

use crate::{EMAIL_SIZE, USERNAME_SIZE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("String is too long.")]
    StringTooLong { field: &'static str, len: usize, max: usize },

    #[error("String contains a NUL byte.")]
    NulByte { field: &'static str },
}

/// A single row of the fixed `(id, username, email)` schema.
///
/// Text fields are checked against their column capacity (in bytes) when
/// the row is built, so every `Row` fits its on-page slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

impl Row {
    pub fn new(
        id: u32,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, RowError> {
        let username = username.into();
        let email = email.into();
        check_field("username", &username, USERNAME_SIZE)?;
        check_field("email", &email, EMAIL_SIZE)?;

        Ok(Self {
            id,
            username,
            email,
        })
    }

    pub(crate) fn from_parts(id: u32, username: String, email: String) -> Self {
        debug_assert!(username.len() <= USERNAME_SIZE);
        debug_assert!(email.len() <= EMAIL_SIZE);
        Self {
            id,
            username,
            email,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

// Zero bytes terminate a field on decode, so they cannot appear inside one.
fn check_field(field: &'static str, value: &str, max: usize) -> Result<(), RowError> {
    if value.len() > max {
        return Err(RowError::StringTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    if value.as_bytes().contains(&0) {
        return Err(RowError::NulByte { field });
    }
    Ok(())
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}
