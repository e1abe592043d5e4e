use serde::{Deserialize, Serialize};

use crate::book::UserId;

/// Where a book currently sits in the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookState {
    /// Book is on the shelf
    #[default]
    Available,
    /// Book is held by the given user
    BorrowedBy(UserId),
}

impl BookState {
    /// Get a human-readable description of the current state
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Available => "Book is available for borrowing".to_string(),
            Self::BorrowedBy(user) => format!("Book is borrowed by user {user}"),
        }
    }

    /// Whether the book can be borrowed right now
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}
