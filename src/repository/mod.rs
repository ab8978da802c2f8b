//! Repository layer for database operations

pub mod books;
pub mod lending;
pub mod readers;

use sqlx::{Pool, Postgres};

/// Soft-delete predicate for `books b`. Every read path that touches
/// books must interpolate this exact fragment; a set `delete_time`
/// makes a record invisible to all standard reads.
pub(crate) const BOOK_NOT_DELETED: &str = "b.delete_time IS NULL";

/// Soft-delete predicate for `readers r`.
pub(crate) const READER_NOT_DELETED: &str = "r.delete_time IS NULL";

/// Derived holder count for `books b`. Never stored; recomputed on
/// every read that classifies availability.
pub(crate) const HOLDER_COUNT: &str =
    "(SELECT COUNT(*) FROM book_readers br WHERE br.book_id = b.id)";

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub readers: readers::ReadersRepository,
    pub lending: lending::LendingRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            readers: readers::ReadersRepository::new(pool.clone()),
            lending: lending::LendingRepository::new(pool.clone()),
            pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_filter_on_delete_time_only() {
        assert!(BOOK_NOT_DELETED.contains("delete_time IS NULL"));
        assert!(READER_NOT_DELETED.contains("delete_time IS NULL"));
    }

    #[test]
    fn holder_count_is_derived_from_the_join_table() {
        assert!(HOLDER_COUNT.contains("book_readers"));
        assert!(HOLDER_COUNT.starts_with("(SELECT COUNT(*)"));
    }
}
