use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use crossbeam_utils::thread;
use library_catalog::{Book, Catalog, CatalogConfig, User};
use std::hint::black_box;
use std::time::Duration;

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(1))
        .warm_up_time(Duration::from_secs(1))
}

fn stocked_catalog(count: usize) -> (Catalog, Vec<Book>) {
    let catalog = Catalog::new(CatalogConfig::default().with_notify(false));
    let books: Vec<Book> = (0..count)
        .map(|i| Book::new(&format!("Book {i}"), "Author", &format!("isbn-{i}")))
        .collect();
    for book in &books {
        catalog.add_book(book.clone());
    }
    (catalog, books)
}

fn bench_single_threaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_threaded");

    group.bench_function("borrow_return_round_trip", |b| {
        let (catalog, books) = stocked_catalog(64);
        let user = User::new("bench", 1);
        let book = books.last().cloned().unwrap_or_else(|| Book::new("x", "y", "z"));
        b.iter(|| {
            let _ = black_box(catalog.borrow_book(&user, &book));
            let _ = black_box(catalog.return_book(&user, &book));
        });
    });

    group.bench_function("available_snapshot", |b| {
        let (catalog, _) = stocked_catalog(256);
        b.iter(|| black_box(catalog.available_books()));
    });

    group.bench_function("add_book", |b| {
        b.iter_batched(
            || stocked_catalog(0).0,
            |catalog| catalog.add_book(Book::new("Java", "Yuval Noah Harari", "9780062316097")),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");

    for threads in [2_u64, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("mixed_borrow_return", threads),
            &threads,
            |b, &threads| {
                let (catalog, books) = stocked_catalog(16);
                b.iter(|| {
                    thread::scope(|s| {
                        let handles: Vec<_> = (0..threads)
                            .map(|t| {
                                let (catalog, books) = (&catalog, &books);
                                s.spawn(move |_| {
                                    let user = User::new("bench", t);
                                    for _ in 0..100 {
                                        let book = &books[rand::random_range(0..books.len())];
                                        if rand::random::<bool>() {
                                            let _ = black_box(catalog.borrow_book(&user, book));
                                        } else {
                                            let _ = black_box(catalog.return_book(&user, book));
                                        }
                                    }
                                })
                            })
                            .collect();
                        for handle in handles {
                            handle.join().unwrap();
                        }
                    })
                    .unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = bench_single_threaded, bench_concurrent
}
criterion_main!(benches);
