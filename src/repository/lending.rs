//! Book-reader association repository.
//!
//! The association has no attributes of its own; a row in
//! `book_readers` means "currently lent to". Uniqueness is the
//! composite primary key, not in-memory identity.

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::error::AppResult;

/// Snapshot of the lending state relevant to one (book, reader) pair,
/// read in a single statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LendSnapshot {
    /// The reader already holds this book
    pub already_held: bool,
    /// Current number of readers holding the book
    pub holder_count: i64,
}

#[derive(Clone)]
pub struct LendingRepository {
    pool: Pool<Postgres>,
}

impl LendingRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Read the lending snapshot for a (book, reader) pair
    pub async fn snapshot(&self, book_id: Uuid, reader_id: Uuid) -> AppResult<LendSnapshot> {
        let row = sqlx::query(
            r#"
            SELECT
                EXISTS(
                    SELECT 1 FROM book_readers
                    WHERE book_id = $1 AND reader_id = $2
                ) AS already_held,
                (SELECT COUNT(*) FROM book_readers WHERE book_id = $1) AS holder_count
            "#,
        )
        .bind(book_id)
        .bind(reader_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(LendSnapshot {
            already_held: row.get("already_held"),
            holder_count: row.get("holder_count"),
        })
    }

    /// Insert the association only while the holder count is still
    /// below the exemplar count. The guard runs in the same statement
    /// as the insert, so two racing lends for the last free exemplar
    /// cannot both commit. Returns whether a row was inserted.
    pub async fn lend(
        &self,
        book_id: Uuid,
        reader_id: Uuid,
        exemplar_count: i32,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO book_readers (book_id, reader_id)
            SELECT $1, $2
            WHERE (SELECT COUNT(*) FROM book_readers WHERE book_id = $1) < $3
            ON CONFLICT (book_id, reader_id) DO NOTHING
            "#,
        )
        .bind(book_id)
        .bind(reader_id)
        .bind(exemplar_count as i64)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Remove the association. Returns whether a row was removed.
    pub async fn unlend(&self, book_id: Uuid, reader_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM book_readers WHERE book_id = $1 AND reader_id = $2",
        )
        .bind(book_id)
        .bind(reader_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
