//! Readers repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        reader::{NewReader, Reader},
    },
};

use super::{BOOK_NOT_DELETED, READER_NOT_DELETED};

#[derive(Clone)]
pub struct ReadersRepository {
    pool: Pool<Postgres>,
}

impl ReadersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a new reader
    pub async fn create(&self, new_reader: &NewReader) -> AppResult<Reader> {
        let reader = sqlx::query_as::<_, Reader>(
            r#"
            INSERT INTO readers (id, fio, birth_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_reader.fio)
        .bind(new_reader.birth_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(reader)
    }

    /// Get an active reader by ID
    pub async fn get_active(&self, id: Uuid) -> AppResult<Reader> {
        let sql = format!("SELECT r.* FROM readers r WHERE r.id = $1 AND {READER_NOT_DELETED}");

        sqlx::query_as::<_, Reader>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reader with id {} not found", id)))
    }

    /// Books currently held by a reader (eager association load for
    /// views; mutation paths skip this join)
    pub async fn held_books(&self, reader_id: Uuid) -> AppResult<Vec<Book>> {
        let sql = format!(
            r#"
            SELECT b.* FROM books b
            JOIN book_readers br ON br.book_id = b.id
            WHERE br.reader_id = $1 AND {BOOK_NOT_DELETED}
            ORDER BY b.name
            "#
        );

        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(reader_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Persist updated scalar attributes of a reader
    pub async fn update(&self, reader: &Reader) -> AppResult<()> {
        sqlx::query("UPDATE readers SET fio = $2, birth_date = $3 WHERE id = $1")
            .bind(reader.id)
            .bind(&reader.fio)
            .bind(reader.birth_date)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Soft-delete a reader: clear the held set (every book becomes
    /// available again) and set the deletion marker in one transaction.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_readers WHERE reader_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let sql = format!(
            "UPDATE readers r SET delete_time = NOW() WHERE r.id = $1 AND {READER_NOT_DELETED}"
        );
        let updated = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!(
                "Reader with id {} not found",
                id
            )));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Case-insensitive substring search over reader full names, active only
    pub async fn search_by_fio(&self, search_text: &str) -> AppResult<Vec<Reader>> {
        let sql = format!(
            "SELECT r.* FROM readers r WHERE {READER_NOT_DELETED} AND r.fio ILIKE $1 ORDER BY r.fio"
        );

        let readers = sqlx::query_as::<_, Reader>(&sql)
            .bind(format!("%{}%", search_text))
            .fetch_all(&self.pool)
            .await?;
        Ok(readers)
    }
}
