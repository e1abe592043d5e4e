use std::fmt::Write;

use crate::{
    book::Book,
    book_state::BookState,
    catalog::{CatalogSnapshot, Transition},
};

/// Rendering helpers for catalog contents
#[derive(Debug)]
pub struct CatalogReport;

impl CatalogReport {
    /// Generate a markdown table of books, ordered by title
    #[must_use]
    pub fn book_table(books: &[Book]) -> String {
        if books.is_empty() {
            return "No books.".to_string();
        }

        let mut ordered: Vec<&Book> = books.iter().collect();
        ordered.sort_by_cached_key(|book| book.title.to_lowercase());

        let mut table = String::from("| Title | Author | ISBN |\n");
        table.push_str("|-------|--------|------|\n");
        for book in ordered {
            let _ = writeln!(table, "| {} | {} | {} |", book.title, book.author, book.isbn);
        }
        table
    }

    /// Generate a markdown table of the transition history
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn history_table(transitions: &[Transition]) -> String {
        if transitions.is_empty() {
            return "No transitions recorded yet.".to_string();
        }

        let mut table = String::from("| # | Book | Event | From | To |\n");
        table.push_str("|---|------|-------|------|----|\n");

        for (i, transition) in transitions.iter().enumerate() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} |",
                i + 1,
                transition.book.title,
                transition.event,
                Self::format_state(transition.state_before()),
                Self::format_state(transition.state_after())
            );
        }

        table
    }

    /// Serialize a snapshot as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(snapshot: &CatalogSnapshot) -> serde_json::Result<String> {
        serde_json::to_string_pretty(snapshot)
    }

    /// Format a state for display
    fn format_state(state: BookState) -> String {
        match state {
            BookState::Available => "Available".to_string(),
            BookState::BorrowedBy(user) => format!("BorrowedBy({user})"),
        }
    }
}
