//! Data models for Alexandria

pub mod book;
pub mod reader;

// Re-export commonly used types
pub use book::{Book, BookDto, NewBook};
pub use reader::{NewReader, Reader, ReaderDto};
