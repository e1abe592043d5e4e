use std::fmt;

use serde::{Deserialize, Serialize};

/// Events that move a book between the shelf and a user's ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CatalogEvent {
    /// Book left the shelf for a user
    Borrow,
    /// Book came back to the shelf from a user
    Return,
}

impl fmt::Display for CatalogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrow => write!(f, "borrow"),
            Self::Return => write!(f, "return"),
        }
    }
}

/// Result of a borrow attempt
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowOutcome {
    /// Book moved from the shelf to the user
    Success,
    /// Book was not on the shelf; nothing changed
    BookUnavailable,
}

impl BorrowOutcome {
    /// Whether the borrow went through
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Convert into a `Result` so callers can use `?`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::BookUnavailable` for a rejected borrow
    pub fn into_result(self) -> Result<(), CatalogError> {
        match self {
            Self::Success => Ok(()),
            Self::BookUnavailable => Err(CatalogError::BookUnavailable),
        }
    }
}

/// Result of a return attempt
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// Book moved from the user back to the shelf
    Success,
    /// The user does not hold this book; nothing changed
    NotBorrowedByUser,
}

impl ReturnOutcome {
    /// Whether the return went through
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Convert into a `Result` so callers can use `?`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotBorrowedByUser` for a rejected return
    pub fn into_result(self) -> Result<(), CatalogError> {
        match self {
            Self::Success => Ok(()),
            Self::NotBorrowedByUser => Err(CatalogError::NotBorrowedByUser),
        }
    }
}

/// Rejected catalog operations, for callers that prefer `Result`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Borrow attempted on a book that is not on the shelf
    #[error("book is not available in the library")]
    BookUnavailable,
    /// Return attempted for a book the user does not hold
    #[error("user has not borrowed this book")]
    NotBorrowedByUser,
}
