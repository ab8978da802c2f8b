//! Lending rule engine.
//!
//! Each operation reads a snapshot of the association state, validates
//! the lending rules against it, then writes. The capacity write is
//! conditional at the store layer, so the snapshot race on the last
//! free exemplar cannot over-lend (see `LendingRepository::lend`).

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::reader::ReaderDto,
    repository::{lending::LendSnapshot, Repository},
};

pub(crate) const REASON_ALREADY_LENT: &str = "Reader already has this book";
pub(crate) const REASON_NO_EXEMPLARS: &str =
    "Library dont have available exemplars of this book";
pub(crate) const REASON_NOT_LENT: &str = "Book is not attached to the reader";

/// Validate a lend against the current snapshot.
///
/// Lending an already-held book is rejected, not a no-op; a book with
/// all exemplars out is rejected with a capacity error.
pub(crate) fn check_lend(snapshot: &LendSnapshot, exemplar_count: i32) -> AppResult<()> {
    if snapshot.already_held {
        return Err(AppError::AlreadyLent(REASON_ALREADY_LENT.to_string()));
    }

    if snapshot.holder_count >= exemplar_count as i64 {
        return Err(AppError::CapacityExceeded(REASON_NO_EXEMPLARS.to_string()));
    }

    Ok(())
}

/// Validate a return against the current snapshot.
pub(crate) fn check_return(snapshot: &LendSnapshot) -> AppResult<()> {
    if !snapshot.already_held {
        return Err(AppError::NotLent(REASON_NOT_LENT.to_string()));
    }

    Ok(())
}

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
}

impl LendingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Give a book to a reader; returns the reader's updated holdings
    pub async fn lend(&self, reader_id: Uuid, book_id: Uuid) -> AppResult<ReaderDto> {
        let book = self.repository.books.get_active(book_id).await?;
        let reader = self.repository.readers.get_active(reader_id).await?;

        let snapshot = self.repository.lending.snapshot(book_id, reader_id).await?;
        check_lend(&snapshot, book.exemplar_count)?;

        let inserted = self
            .repository
            .lending
            .lend(book_id, reader_id, book.exemplar_count)
            .await?;

        if !inserted {
            // A concurrent lend landed between snapshot and write;
            // classify the rejection from fresh state.
            let snapshot = self.repository.lending.snapshot(book_id, reader_id).await?;
            return if snapshot.already_held {
                Err(AppError::AlreadyLent(REASON_ALREADY_LENT.to_string()))
            } else {
                Err(AppError::CapacityExceeded(REASON_NO_EXEMPLARS.to_string()))
            };
        }

        tracing::info!(%book_id, %reader_id, "book lent");

        let books = self.repository.readers.held_books(reader_id).await?;
        Ok(ReaderDto::from_parts(reader, books))
    }

    /// Return a book to the library
    pub async fn return_book(&self, reader_id: Uuid, book_id: Uuid) -> AppResult<()> {
        self.repository.books.get_active(book_id).await?;
        self.repository.readers.get_active(reader_id).await?;

        let removed = self.repository.lending.unlend(book_id, reader_id).await?;
        if !removed {
            return Err(AppError::NotLent(REASON_NOT_LENT.to_string()));
        }

        tracing::info!(%book_id, %reader_id, "book returned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn snapshot(already_held: bool, holder_count: i64) -> LendSnapshot {
        LendSnapshot {
            already_held,
            holder_count,
        }
    }

    #[test]
    fn lend_rejects_already_held_book() {
        let err = check_lend(&snapshot(true, 0), 5).unwrap_err();
        assert!(matches!(err, AppError::AlreadyLent(_)));
    }

    #[test]
    fn lend_rejects_when_all_exemplars_are_out() {
        let err = check_lend(&snapshot(false, 2), 2).unwrap_err();
        assert!(matches!(err, AppError::CapacityExceeded(_)));
    }

    #[test]
    fn lend_rejects_zero_exemplar_book() {
        let err = check_lend(&snapshot(false, 0), 0).unwrap_err();
        assert!(matches!(err, AppError::CapacityExceeded(_)));
    }

    #[test]
    fn lend_accepts_below_capacity() {
        assert!(check_lend(&snapshot(false, 1), 2).is_ok());
    }

    #[test]
    fn return_rejects_book_not_held() {
        let err = check_return(&snapshot(false, 3)).unwrap_err();
        assert!(matches!(err, AppError::NotLent(_)));
    }

    #[test]
    fn return_accepts_held_book() {
        assert!(check_return(&snapshot(true, 1)).is_ok());
    }

    /// In-memory model of the association set, driven through the same
    /// rule checks the service uses.
    #[derive(Clone, PartialEq, Eq, Debug)]
    struct Library {
        exemplar_counts: Vec<i32>,
        associations: BTreeSet<(usize, usize)>,
    }

    impl Library {
        fn holder_count(&self, book: usize) -> i64 {
            self.associations.iter().filter(|(b, _)| *b == book).count() as i64
        }

        fn snapshot(&self, book: usize, reader: usize) -> LendSnapshot {
            LendSnapshot {
                already_held: self.associations.contains(&(book, reader)),
                holder_count: self.holder_count(book),
            }
        }

        fn lend(&mut self, book: usize, reader: usize) -> AppResult<()> {
            check_lend(&self.snapshot(book, reader), self.exemplar_counts[book])?;
            self.associations.insert((book, reader));
            Ok(())
        }

        fn return_book(&mut self, book: usize, reader: usize) -> AppResult<()> {
            check_return(&self.snapshot(book, reader))?;
            self.associations.remove(&(book, reader));
            Ok(())
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Lend(usize, usize),
        Return(usize, usize),
    }

    fn op_strategy(books: usize, readers: usize) -> impl Strategy<Value = Op> {
        (any::<bool>(), 0..books, 0..readers).prop_map(|(lend, b, r)| {
            if lend {
                Op::Lend(b, r)
            } else {
                Op::Return(b, r)
            }
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            .. ProptestConfig::default()
        })]

        /// PROPERTY: under any lend/return sequence the holder count
        /// never exceeds the exemplar count, and rejected operations
        /// leave the association set unchanged.
        #[test]
        fn property_holder_count_never_exceeds_exemplar_count(
            exemplar_counts in proptest::collection::vec(0..4i32, 1..=4),
            ops in proptest::collection::vec(op_strategy(4, 4), 0..64),
        ) {
            let books = exemplar_counts.len();
            let mut library = Library {
                exemplar_counts,
                associations: BTreeSet::new(),
            };

            for op in ops {
                let before = library.clone();
                let result = match op {
                    Op::Lend(b, r) if b < books => library.lend(b, r),
                    Op::Return(b, r) if b < books => library.return_book(b, r),
                    _ => Ok(()),
                };

                if result.is_err() {
                    prop_assert_eq!(&library, &before);
                }

                for book in 0..books {
                    prop_assert!(
                        library.holder_count(book) <= library.exemplar_counts[book] as i64
                    );
                }
            }
        }

        /// PROPERTY: a lend immediately repeated by the same reader is
        /// always rejected as already lent.
        #[test]
        fn property_double_lend_is_rejected(
            exemplar_count in 1..4i32,
            reader in 0..4usize,
        ) {
            let mut library = Library {
                exemplar_counts: vec![exemplar_count],
                associations: BTreeSet::new(),
            };

            library.lend(0, reader).unwrap();
            let err = library.lend(0, reader).unwrap_err();
            prop_assert!(matches!(err, AppError::AlreadyLent(_)));
            prop_assert_eq!(library.holder_count(0), 1);
        }
    }
}
