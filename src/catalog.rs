use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};

use crate::{
    book::{Book, User, UserId},
    book_state::BookState,
    config::CatalogConfig,
    events::{BorrowOutcome, CatalogEvent, ReturnOutcome},
    observers::{CatalogObserver, Notice, TracingNotifier},
    timestamp::TimeStamp,
};

/// A completed move of a book between the shelf and a user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transition {
    /// The book that moved
    pub book: Book,
    /// The user who borrowed or returned it
    pub user: UserId,
    /// Which way it moved
    pub event: CatalogEvent,
    /// When the transition happened
    pub timestamp: TimeStamp,
}

impl Transition {
    /// State of the book before the transition
    #[must_use]
    pub fn state_before(&self) -> BookState {
        match self.event {
            CatalogEvent::Borrow => BookState::Available,
            CatalogEvent::Return => BookState::BorrowedBy(self.user),
        }
    }

    /// State of the book after the transition
    #[must_use]
    pub fn state_after(&self) -> BookState {
        match self.event {
            CatalogEvent::Borrow => BookState::BorrowedBy(self.user),
            CatalogEvent::Return => BookState::Available,
        }
    }
}

/// Both collections of the catalog captured at the same instant
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSnapshot {
    /// Books on the shelf, in shelf order
    pub available: Vec<Book>,
    /// Books held per user; users holding nothing are absent
    pub ledger: BTreeMap<UserId, Vec<Book>>,
}

impl CatalogSnapshot {
    /// Total number of books known to the catalog
    #[must_use]
    pub fn total_books(&self) -> usize {
        self.ledger.values().map(Vec::len).fold(self.available.len(), usize::saturating_add)
    }
}

/// Everything the catalog lock guards
#[derive(Debug, Default)]
struct Inventory {
    /// Books on the shelf
    available: Vec<Book>,
    /// Books held per user; never contains an empty entry
    ledger: HashMap<UserId, Vec<Book>>,
    /// Most recent transitions, oldest first
    history: VecDeque<Transition>,
}

impl Inventory {
    /// Append a transition, dropping the oldest entries beyond `capacity`
    fn record(&mut self, capacity: usize, transition: Transition) {
        if capacity == 0 {
            return;
        }
        while self.history.len() >= capacity {
            self.history.pop_front();
        }
        self.history.push_back(transition);
    }
}

/// Thread-safe library catalog
///
/// A single mutex guards the shelf, the ledger and the history together, so
/// every check-then-act sequence is atomic and no lock ordering exists to
/// get wrong. Share it between threads with `Arc<Catalog>` or scoped
/// borrows.
///
/// # Examples
/// ```
/// use library_catalog::{Book, BorrowOutcome, Catalog, User};
///
/// let catalog = Catalog::default();
/// let book = Book::new("Java", "Yuval Noah Harari", "9780062316097");
/// let user = User::new("padma", 100);
///
/// catalog.add_book(book.clone());
/// assert_eq!(catalog.borrow_book(&user, &book), BorrowOutcome::Success);
/// assert_eq!(catalog.borrowed_books(&user), vec![book]);
/// ```
pub struct Catalog {
    /// Shelf, ledger and history behind one lock
    inventory: Mutex<Inventory>,
    /// Settings fixed at construction
    config: CatalogConfig,
    /// Registered notification observers
    observers: Vec<Box<dyn CatalogObserver>>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("inventory", &self.inventory)
            .field("config", &self.config)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

impl Catalog {
    /// Create an empty catalog
    ///
    /// Registers a [`TracingNotifier`] when `config.notify` is set.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        let mut catalog =
            Self { inventory: Mutex::new(Inventory::default()), config, observers: Vec::new() };
        if catalog.config.notify {
            catalog.register_observer(Box::new(TracingNotifier));
        }
        catalog
    }

    /// Register an observer to be told about every borrow and return attempt
    pub fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.observers.push(observer);
    }

    /// The configuration this catalog was built with
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Take the lock, recovering the state if another thread panicked
    /// while holding it
    ///
    /// No operation panics between mutating the shelf and the ledger, so a
    /// poisoned inventory is still consistent.
    fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inventory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Dispatch a notice to every observer
    fn notify(&self, notice: &Notice) {
        for observer in &self.observers {
            observer.on_notice(notice);
        }
    }

    /// Put a book on the shelf
    ///
    /// Adding an equal book twice yields two copies on the shelf.
    pub fn add_book(&self, book: Book) {
        tracing::debug!(isbn = %book.isbn, title = %book.title, "adding book");
        self.lock().available.push(book);
    }

    /// Move `book` from the shelf to `user`
    ///
    /// Returns [`BorrowOutcome::BookUnavailable`] and changes nothing when
    /// the book is not on the shelf.
    pub fn borrow_book(&self, user: &User, book: &Book) -> BorrowOutcome {
        let now = TimeStamp::now();
        let outcome = {
            let mut inventory = self.lock();
            match inventory.available.iter().position(|b| b == book) {
                Some(pos) => {
                    let taken = inventory.available.remove(pos);
                    inventory.ledger.entry(user.id()).or_default().push(taken);
                    let transition = Transition {
                        book: book.clone(),
                        user: user.id(),
                        event: CatalogEvent::Borrow,
                        timestamp: now,
                    };
                    inventory.record(self.config.history_capacity, transition);
                    BorrowOutcome::Success
                }
                None => BorrowOutcome::BookUnavailable,
            }
        };

        tracing::debug!(user = %user.id(), isbn = %book.isbn, ?outcome, "borrow");
        let notice = match outcome {
            BorrowOutcome::Success => Notice::Borrowed { user: user.clone(), book: book.clone() },
            BorrowOutcome::BookUnavailable => {
                Notice::Unavailable { user: user.clone(), book: book.clone() }
            }
        };
        self.notify(&notice);
        outcome
    }

    /// Move `book` from `user` back to the shelf
    ///
    /// Returns [`ReturnOutcome::NotBorrowedByUser`] and changes nothing when
    /// the user does not currently hold the book.
    pub fn return_book(&self, user: &User, book: &Book) -> ReturnOutcome {
        let now = TimeStamp::now();
        let outcome = {
            let mut inventory = self.lock();
            let returned = match inventory.ledger.get_mut(&user.id()) {
                Some(held) => match held.iter().position(|b| b == book) {
                    Some(pos) => {
                        let returned = held.remove(pos);
                        if held.is_empty() {
                            inventory.ledger.remove(&user.id());
                        }
                        Some(returned)
                    }
                    None => None,
                },
                None => None,
            };

            if let Some(returned) = returned {
                inventory.available.push(returned);
                let transition = Transition {
                    book: book.clone(),
                    user: user.id(),
                    event: CatalogEvent::Return,
                    timestamp: now,
                };
                inventory.record(self.config.history_capacity, transition);
                ReturnOutcome::Success
            } else {
                ReturnOutcome::NotBorrowedByUser
            }
        };

        tracing::debug!(user = %user.id(), isbn = %book.isbn, ?outcome, "return");
        let notice = match outcome {
            ReturnOutcome::Success => Notice::Returned { user: user.clone(), book: book.clone() },
            ReturnOutcome::NotBorrowedByUser => {
                Notice::NotBorrowed { user: user.clone(), book: book.clone() }
            }
        };
        self.notify(&notice);
        outcome
    }

    /// Copy of the books currently on the shelf
    #[must_use]
    pub fn available_books(&self) -> Vec<Book> {
        self.lock().available.clone()
    }

    /// Copy of the books `user` currently holds; empty if none
    #[must_use]
    pub fn borrowed_books(&self, user: &User) -> Vec<Book> {
        self.lock().ledger.get(&user.id()).cloned().unwrap_or_default()
    }

    /// Shelf and ledger captured under a single lock acquisition
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        let inventory = self.lock();
        CatalogSnapshot {
            available: inventory.available.clone(),
            ledger: inventory.ledger.iter().map(|(id, books)| (*id, books.clone())).collect(),
        }
    }

    /// Where `book` currently is, or `None` if the catalog has no copy of it
    ///
    /// A copy on the shelf wins over a borrowed copy when duplicates exist.
    #[must_use]
    pub fn book_state(&self, book: &Book) -> Option<BookState> {
        let inventory = self.lock();
        if inventory.available.contains(book) {
            return Some(BookState::Available);
        }
        inventory
            .ledger
            .iter()
            .filter(|(_, held)| held.contains(book))
            .map(|(id, _)| *id)
            .min()
            .map(BookState::BorrowedBy)
    }

    /// Recent transitions, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<Transition> {
        self.lock().history.iter().cloned().collect()
    }

    /// Number of books on the shelf
    #[must_use]
    pub fn len_available(&self) -> usize {
        self.lock().available.len()
    }

    /// Number of users currently holding at least one book
    #[must_use]
    pub fn borrower_count(&self) -> usize {
        self.lock().ledger.len()
    }
}
