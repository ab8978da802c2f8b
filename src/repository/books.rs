//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
};

use super::{BOOK_NOT_DELETED, HOLDER_COUNT};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a new book
    pub async fn create(&self, new_book: &NewBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, name, author, article, publication_year, exemplar_count)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_book.name)
        .bind(&new_book.author)
        .bind(&new_book.article)
        .bind(&new_book.publication_year)
        .bind(new_book.exemplar_count)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    /// Get an active book by ID
    pub async fn get_active(&self, id: Uuid) -> AppResult<Book> {
        let sql = format!("SELECT b.* FROM books b WHERE b.id = $1 AND {BOOK_NOT_DELETED}");

        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Persist updated scalar attributes of a book
    pub async fn update(&self, book: &Book) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET name = $2, author = $3, article = $4,
                publication_year = $5, exemplar_count = $6
            WHERE id = $1
            "#,
        )
        .bind(book.id)
        .bind(&book.name)
        .bind(&book.author)
        .bind(&book.article)
        .bind(&book.publication_year)
        .bind(book.exemplar_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Soft-delete a book: clear its holder set and set the deletion
    /// marker in one transaction, so no reader can be observed holding
    /// a deleted book.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_readers WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let sql = format!(
            "UPDATE books b SET delete_time = NOW() WHERE b.id = $1 AND {BOOK_NOT_DELETED}"
        );
        let updated = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Active books currently held by at least one reader
    pub async fn given_out(&self) -> AppResult<Vec<Book>> {
        let sql = format!(
            "SELECT b.* FROM books b WHERE {BOOK_NOT_DELETED} AND {HOLDER_COUNT} > 0 ORDER BY b.name"
        );

        let books = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// Active books with at least one free exemplar
    pub async fn available(&self) -> AppResult<Vec<Book>> {
        let sql = format!(
            "SELECT b.* FROM books b WHERE {BOOK_NOT_DELETED} AND {HOLDER_COUNT} < b.exemplar_count ORDER BY b.name"
        );

        let books = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// Case-insensitive substring search over book names, active only
    pub async fn search_by_name(&self, search_text: &str) -> AppResult<Vec<Book>> {
        let sql = format!(
            "SELECT b.* FROM books b WHERE {BOOK_NOT_DELETED} AND b.name ILIKE $1 ORDER BY b.name"
        );

        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(format!("%{}%", search_text))
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }
}
