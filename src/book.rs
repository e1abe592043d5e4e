use std::fmt;

use serde::{Deserialize, Serialize};

/// A book held by the catalog
///
/// Books are plain values. Two books are the same book when title, author
/// and ISBN all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Book {
    /// Title as printed on the cover
    pub title: String,
    /// Author name
    pub author: String,
    /// ISBN, expected to be unique but not enforced
    pub isbn: String,
}

impl Book {
    /// Create a new book
    #[must_use]
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self { title: title.to_string(), author: author.to_string(), isbn: isbn.to_string() }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.author)
    }
}

/// Stable identity of a user, used as the ledger key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A library user
///
/// Only [`User::id`] takes part in ledger lookups; the name is carried for
/// notifications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// Display name
    pub name: String,
    /// Identity key, fixed at construction
    id: UserId,
}

impl User {
    /// Create a new user
    #[must_use]
    pub fn new(name: &str, id: u64) -> Self {
        Self { name: name.to_string(), id: UserId(id) }
    }

    /// The user's identity key
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }
}
