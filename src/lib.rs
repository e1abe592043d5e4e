//! In-memory library catalog tracking which users currently hold which books.
//!
//! A [`Catalog`] owns the shelf of available books and a ledger of what
//! each user has borrowed. All mutations go through one lock so a book is
//! always either on the shelf or in exactly one user's ledger entry.

pub mod book;
pub mod book_state;
pub mod catalog;
pub mod config;
pub mod events;
pub mod observers;
pub mod report;
pub mod timestamp;

pub use book::{Book, User, UserId};
pub use book_state::BookState;
pub use catalog::{Catalog, CatalogSnapshot, Transition};
pub use config::{CatalogConfig, ConfigError};
pub use events::{BorrowOutcome, CatalogError, CatalogEvent, ReturnOutcome};
pub use observers::{CatalogObserver, Notice, TracingNotifier};
pub use report::CatalogReport;
pub use timestamp::TimeStamp;
