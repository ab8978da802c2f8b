//! Book catalog service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDto, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Active books currently held by at least one reader
    pub async fn given_out_books(&self) -> AppResult<Vec<BookDto>> {
        let books = self.repository.books.given_out().await?;
        Ok(to_dtos(books))
    }

    /// Active books with at least one free exemplar
    pub async fn available_books(&self) -> AppResult<Vec<BookDto>> {
        let books = self.repository.books.available().await?;
        Ok(to_dtos(books))
    }

    /// Search books by name, case-insensitive substring
    pub async fn search_books(&self, search_text: &str) -> AppResult<Vec<BookDto>> {
        let books = self.repository.books.search_by_name(search_text).await?;
        Ok(to_dtos(books))
    }

    /// Get a single active book
    pub async fn get_book(&self, id: Uuid) -> AppResult<BookDto> {
        let book = self.repository.books.get_active(id).await?;
        Ok(book.into())
    }

    /// Create a new book
    pub async fn create_book(&self, new_book: NewBook) -> AppResult<BookDto> {
        new_book
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let book = self.repository.books.create(&new_book).await?;
        tracing::info!(book_id = %book.id, "book created");
        Ok(book.into())
    }

    /// Apply scalar attribute updates to an existing book
    pub async fn update_book(&self, id: Uuid, update: NewBook) -> AppResult<()> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut book = self.repository.books.get_active(id).await?;
        update.apply_to(&mut book);
        self.repository.books.update(&book).await
    }

    /// Soft-delete a book, clearing every holder's association first
    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.soft_delete(id).await?;
        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }
}

fn to_dtos(books: Vec<Book>) -> Vec<BookDto> {
    books.into_iter().map(BookDto::from).collect()
}
