//! Demonstration driver for the library catalog.
//!
//! # Usage
//!
//! ```bash
//! library-catalog --contenders 16 --rounds 3
//! library-catalog --json --log-level debug
//! ```

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use crossbeam_utils::thread;
use library_catalog::{Book, Catalog, CatalogConfig, CatalogReport, User};
use rand::seq::IndexedRandom;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for the catalog demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of threads racing for the same book in each contention round
    #[arg(short, long, default_value_t = 8)]
    contenders: u64,

    /// Number of contention rounds to run
    #[arg(short, long, default_value_t = 1)]
    rounds: usize,

    /// Print the transition history after the run
    #[arg(short, long)]
    verbose: bool,

    /// Print the final catalog state as JSON
    #[arg(long)]
    json: bool,

    /// Path to a JSON catalog config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = match &args.config {
        Some(path) => CatalogConfig::from_path(path)?,
        None => CatalogConfig::default(),
    };
    tracing::info!(?config, "catalog starting");

    println!("{}", "Library Catalog Demonstration".green().bold());
    println!("=====================================\n");

    let catalog = Catalog::new(config);
    let books = [
        Book::new("Python Programming", "F. Scott Fitzgerald", "9780743273565"),
        Book::new("C Programming", "Harper Lee", "9780061120084"),
        Book::new("Java", "Yuval Noah Harari", "9780062316097"),
    ];
    for book in &books {
        catalog.add_book(book.clone());
    }

    let users = [User::new("padma", 100), User::new("Latha", 101), User::new("Raghu", 103)];

    scenario(&catalog, &books, &users)?;
    for round in 1..=args.rounds {
        contention_round(&catalog, &books, args.contenders, round)?;
    }

    if args.verbose {
        println!("\n{}", "Transition history:".yellow().bold());
        println!("{}", CatalogReport::history_table(&catalog.history()));
    }

    if args.json {
        println!("{}", CatalogReport::to_json(&catalog.snapshot())?);
    }

    println!("\n{}", "Demonstration complete!".green().bold());
    Ok(())
}

/// Runs the two-borrow, two-return scenario on parallel threads
fn scenario(catalog: &Catalog, books: &[Book], users: &[User]) -> Result<(), String> {
    println!("{}", "Running borrow/return scenario...".yellow().bold());

    let pairs: Vec<(&User, &Book)> = users.iter().zip(books).take(2).collect();
    for (user, book) in &pairs {
        println!("Checking whether {} borrows {} or not", user.name, book.title);
        println!("Checking whether {} returns {} or not", user.name, book.title);
    }

    let (borrowed, returned) = thread::scope(|s| {
        let borrows: Vec<_> = pairs
            .iter()
            .map(|&(user, book)| s.spawn(move |_| catalog.borrow_book(user, book).is_success()))
            .collect();
        let returns: Vec<_> = pairs
            .iter()
            .map(|&(user, book)| s.spawn(move |_| catalog.return_book(user, book).is_success()))
            .collect();
        let borrowed = borrows.into_iter().filter_map(|h| h.join().ok()).filter(|ok| *ok).count();
        let returned = returns.into_iter().filter_map(|h| h.join().ok()).filter(|ok| *ok).count();
        (borrowed, returned)
    })
    .map_err(|_| "a scenario thread panicked".to_string())?;
    tracing::debug!(borrowed, returned, "scenario threads finished");

    println!("\n{}", "Available books:".cyan().bold());
    println!("{}", CatalogReport::book_table(&catalog.available_books()));

    if let Some(user) = users.get(1) {
        println!("{}", format!("{}'s borrowed books:", user.name).cyan().bold());
        println!("{}", CatalogReport::book_table(&catalog.borrowed_books(user)));
    }
    Ok(())
}

/// Races `contenders` threads for one book and reports the single winner
fn contention_round(
    catalog: &Catalog,
    books: &[Book],
    contenders: u64,
    round: usize,
) -> Result<(), String> {
    let shelf = catalog.available_books();
    let Some(target) = shelf.choose(&mut rand::rng()).or_else(|| books.first()) else {
        return Ok(());
    };
    println!(
        "\n{}",
        format!("Round {round}: {contenders} threads racing for {}", target.title).yellow().bold()
    );

    let racers: Vec<User> = (0..contenders)
        .map(|i| User::new(&format!("racer-{i}"), 1000_u64.saturating_add(i)))
        .collect();

    let winners: Vec<User> = thread::scope(|s| {
        let handles: Vec<_> = racers
            .iter()
            .map(|user| s.spawn(move |_| catalog.borrow_book(user, target).is_success()))
            .collect();
        racers
            .iter()
            .zip(handles)
            .filter_map(|(user, handle)| matches!(handle.join(), Ok(true)).then(|| user.clone()))
            .collect()
    })
    .map_err(|_| "a racer thread panicked".to_string())?;

    for winner in &winners {
        println!("{} won {}", winner.name.green(), target.title);
        if !catalog.return_book(winner, target).is_success() {
            println!("{}", format!("{} could not return {}", winner.name, target.title).red());
        }
    }
    let losers = racers.len().saturating_sub(winners.len());
    println!("{} threads saw the book unavailable", losers.to_string().red());

    if let Some(state) = catalog.book_state(target) {
        let status = state.description();
        if state.is_available() {
            println!("{}", status.green());
        } else {
            println!("{}", status.red());
        }
    }
    Ok(())
}
