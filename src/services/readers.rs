//! Reader management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::reader::{NewReader, Reader, ReaderDto},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReadersService {
    repository: Repository,
}

impl ReadersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search readers by full name, case-insensitive substring
    pub async fn search_readers(&self, search_text: &str) -> AppResult<Vec<ReaderDto>> {
        let readers = self.repository.readers.search_by_fio(search_text).await?;

        let mut views = Vec::with_capacity(readers.len());
        for reader in readers {
            views.push(self.to_view(reader).await?);
        }
        Ok(views)
    }

    /// Get a single active reader with their held books
    pub async fn get_reader(&self, id: Uuid) -> AppResult<ReaderDto> {
        let reader = self.repository.readers.get_active(id).await?;
        self.to_view(reader).await
    }

    /// Create a new reader
    pub async fn create_reader(&self, new_reader: NewReader) -> AppResult<ReaderDto> {
        new_reader
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let reader = self.repository.readers.create(&new_reader).await?;
        tracing::info!(reader_id = %reader.id, "reader created");
        Ok(ReaderDto::from_parts(reader, Vec::new()))
    }

    /// Apply scalar attribute updates to an existing reader
    pub async fn update_reader(&self, id: Uuid, update: NewReader) -> AppResult<()> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut reader = self.repository.readers.get_active(id).await?;
        update.apply_to(&mut reader);
        self.repository.readers.update(&reader).await
    }

    /// Soft-delete a reader, clearing their held set first
    pub async fn delete_reader(&self, id: Uuid) -> AppResult<()> {
        self.repository.readers.soft_delete(id).await?;
        tracing::info!(reader_id = %id, "reader deleted");
        Ok(())
    }

    async fn to_view(&self, reader: Reader) -> AppResult<ReaderDto> {
        let books = self.repository.readers.held_books(reader.id).await?;
        Ok(ReaderDto::from_parts(reader, books))
    }
}
