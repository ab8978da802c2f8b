//! Reader model and boundary representations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::book::{Book, BookDto};

/// Persisted reader record
#[derive(Debug, Clone, FromRow)]
pub struct Reader {
    pub id: Uuid,
    /// Full name
    pub fio: String,
    pub birth_date: Option<DateTime<Utc>>,
    pub delete_time: Option<DateTime<Utc>>,
}

impl Reader {
    pub fn is_active(&self) -> bool {
        self.delete_time.is_none()
    }
}

/// Externally visible reader representation, including the currently
/// held books rendered as full book representations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReaderDto {
    /// Reader ID
    pub id: Uuid,
    /// Full name
    pub fio: String,
    /// Birth date
    pub birth_date: Option<DateTime<Utc>>,
    /// Books currently lent to this reader
    pub books: Vec<BookDto>,
}

impl ReaderDto {
    pub fn from_parts(reader: Reader, books: Vec<Book>) -> Self {
        Self {
            id: reader.id,
            fio: reader.fio,
            birth_date: reader.birth_date,
            books: books.into_iter().map(BookDto::from).collect(),
        }
    }
}

/// Scalar reader fields accepted on create and update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewReader {
    #[validate(length(min = 1, message = "fio must not be empty"))]
    pub fio: String,
    #[serde(default)]
    pub birth_date: Option<DateTime<Utc>>,
}

impl NewReader {
    /// Apply the scalar attributes onto an existing record; held books
    /// change only through lend/return.
    pub fn apply_to(&self, reader: &mut Reader) {
        reader.fio = self.fio.clone();
        reader.birth_date = self.birth_date;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_view_renders_held_books() {
        let reader = Reader {
            id: Uuid::new_v4(),
            fio: "Ann".to_string(),
            birth_date: None,
            delete_time: None,
        };
        let book = Book {
            id: Uuid::new_v4(),
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            article: String::new(),
            publication_year: "1965".to_string(),
            exemplar_count: 1,
            delete_time: None,
        };

        assert!(reader.is_active());
        let dto = ReaderDto::from_parts(reader.clone(), vec![book.clone()]);

        assert_eq!(dto.id, reader.id);
        assert_eq!(dto.books.len(), 1);
        assert_eq!(dto.books[0].id, book.id);
        assert_eq!(dto.books[0].name, "Dune");
    }

    #[test]
    fn update_does_not_touch_identity() {
        let mut reader = Reader {
            id: Uuid::new_v4(),
            fio: "Ann".to_string(),
            birth_date: None,
            delete_time: None,
        };
        let id = reader.id;

        let update = NewReader {
            fio: "Ann Smith".to_string(),
            birth_date: Some(Utc::now()),
        };
        update.apply_to(&mut reader);

        assert_eq!(reader.id, id);
        assert_eq!(reader.fio, "Ann Smith");
        assert!(reader.birth_date.is_some());
    }
}
