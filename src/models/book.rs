//! Book model and boundary representations.
//!
//! `Book` is the persisted row; `BookDto` is what leaves the server, and
//! `NewBook` is what comes in on create/update. Associations never travel
//! through these types, only through the lend/return endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Persisted book record
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    pub author: String,
    pub article: String,
    pub publication_year: String,
    /// Total physical copies owned; bounds concurrent loans
    pub exemplar_count: i32,
    pub delete_time: Option<DateTime<Utc>>,
}

impl Book {
    pub fn is_active(&self) -> bool {
        self.delete_time.is_none()
    }
}

/// Externally visible book representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    /// Book ID
    pub id: Uuid,
    /// Title
    pub name: String,
    /// Author
    pub author: String,
    /// Article code
    pub article: String,
    /// Publication year (free text)
    pub publication_year: String,
    /// Number of physical exemplars
    pub exemplar_count: i32,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            author: book.author,
            article: book.article,
            publication_year: book.publication_year,
            exemplar_count: book.exemplar_count,
        }
    }
}

/// Scalar book fields accepted on create and update.
/// Carries no identity and no association data.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub article: String,
    #[serde(default)]
    pub publication_year: String,
    #[validate(range(min = 0, message = "exemplarCount must be non-negative"))]
    #[serde(default)]
    pub exemplar_count: i32,
}

impl NewBook {
    /// Apply the scalar attributes onto an existing record, leaving
    /// identity, deletion marker and associations untouched.
    pub fn apply_to(&self, book: &mut Book) {
        book.name = self.name.clone();
        book.author = self.author.clone();
        book.article = self.article.clone();
        book.publication_year = self.publication_year.clone();
        book.exemplar_count = self.exemplar_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            id: Uuid::new_v4(),
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            article: "SF-001".to_string(),
            publication_year: "1965".to_string(),
            exemplar_count: 2,
            delete_time: None,
        }
    }

    #[test]
    fn update_applies_scalars_only() {
        let mut book = sample_book();
        let id = book.id;

        let update = NewBook {
            name: "Dune Messiah".to_string(),
            author: "Frank Herbert".to_string(),
            article: "SF-002".to_string(),
            publication_year: "1969".to_string(),
            exemplar_count: 3,
        };
        update.apply_to(&mut book);

        assert_eq!(book.id, id);
        assert_eq!(book.name, "Dune Messiah");
        assert_eq!(book.exemplar_count, 3);
        assert!(book.delete_time.is_none());
    }

    #[test]
    fn dto_hides_delete_time() {
        let mut book = sample_book();
        assert!(book.is_active());
        book.delete_time = Some(Utc::now());
        assert!(!book.is_active());

        let dto = BookDto::from(book.clone());
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["id"], serde_json::json!(book.id));
        assert_eq!(json["publicationYear"], "1965");
        assert_eq!(json["exemplarCount"], 2);
        assert!(json.get("deleteTime").is_none());
    }

    #[test]
    fn new_book_validation_rejects_empty_name() {
        let invalid = NewBook {
            name: String::new(),
            author: String::new(),
            article: String::new(),
            publication_year: String::new(),
            exemplar_count: 1,
        };
        assert!(invalid.validate().is_err());
    }
}
