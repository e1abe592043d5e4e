use std::fmt;

use crate::book::{Book, User};

/// Human-readable outcome of a borrow or return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A user took a book off the shelf
    Borrowed {
        /// Borrower
        user: User,
        /// Book that moved
        book: Book,
    },
    /// A user put a book back on the shelf
    Returned {
        /// Returning user
        user: User,
        /// Book that moved
        book: Book,
    },
    /// Borrow rejected because the book was not on the shelf
    Unavailable {
        /// User who asked
        user: User,
        /// Book that was asked for
        book: Book,
    },
    /// Return rejected because the user does not hold the book
    NotBorrowed {
        /// User who tried to return
        user: User,
        /// Book they tried to return
        book: Book,
    },
}

impl Notice {
    /// Whether the notice reports a completed transition
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Borrowed { .. } | Self::Returned { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed { user, book } => write!(f, "{} borrowed {}.", user.name, book.title),
            Self::Returned { user, book } => write!(f, "{} returned {}.", user.name, book.title),
            Self::Unavailable { .. } => write!(f, "Book is not available in the library."),
            Self::NotBorrowed { .. } => write!(f, "User has not borrowed this book."),
        }
    }
}

/// Trait for catalog notifications
///
/// Observers are called after the catalog lock is released, so they may
/// query the catalog themselves.
pub trait CatalogObserver: Send + Sync {
    /// Called once per borrow or return attempt
    fn on_notice(&self, notice: &Notice);
}

/// Logs every notice through `tracing`
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl CatalogObserver for TracingNotifier {
    fn on_notice(&self, notice: &Notice) {
        match notice {
            Notice::Borrowed { user, book } | Notice::Returned { user, book } => {
                tracing::info!(user = %user.id(), isbn = %book.isbn, "{notice}");
            }
            Notice::Unavailable { user, book } | Notice::NotBorrowed { user, book } => {
                tracing::warn!(user = %user.id(), isbn = %book.isbn, "{notice}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        let user = User::new("padma", 100);
        let book = Book::new("Java", "Yuval Noah Harari", "9780062316097");

        let borrowed = Notice::Borrowed { user: user.clone(), book: book.clone() };
        let returned = Notice::Returned { user: user.clone(), book: book.clone() };
        let unavailable = Notice::Unavailable { user: user.clone(), book: book.clone() };
        let not_borrowed = Notice::NotBorrowed { user, book };

        assert_eq!(borrowed.to_string(), "padma borrowed Java.");
        assert_eq!(returned.to_string(), "padma returned Java.");
        assert_eq!(unavailable.to_string(), "Book is not available in the library.");
        assert_eq!(not_borrowed.to_string(), "User has not borrowed this book.");

        assert!(borrowed.is_success());
        assert!(!unavailable.is_success());
    }
}
