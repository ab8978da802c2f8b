//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{BookDto, NewBook},
};

use super::{list_or_no_content, SearchQuery};

/// Get list of given out books
#[utoipa::path(
    get,
    path = "/books/givenOutBooks",
    tag = "books",
    responses(
        (status = 200, description = "List of given out books", body = Vec<BookDto>),
        (status = 204, description = "No books are given out")
    )
)]
pub async fn given_out_books(State(state): State<crate::AppState>) -> AppResult<Response> {
    let books = state.services.catalog.given_out_books().await?;
    Ok(list_or_no_content(books))
}

/// Get list of books available for giving out
#[utoipa::path(
    get,
    path = "/books/availableBooks",
    tag = "books",
    responses(
        (status = 200, description = "List of available books", body = Vec<BookDto>),
        (status = 204, description = "No books are available")
    )
)]
pub async fn available_books(State(state): State<crate::AppState>) -> AppResult<Response> {
    let books = state.services.catalog.available_books().await?;
    Ok(list_or_no_content(books))
}

/// Search books by name
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Books matching the search", body = Vec<BookDto>),
        (status = 204, description = "No books matched")
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let books = state.services.catalog.search_books(&query.search_text).await?;
    Ok(list_or_no_content(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book", body = BookDto),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Update book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = NewBook,
    responses(
        (status = 204, description = "Book updated"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<NewBook>,
) -> AppResult<StatusCode> {
    state.services.catalog.update_book(id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 201, description = "Created book", body = BookDto),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(new_book): Json<NewBook>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<BookDto>)> {
    let book = state.services.catalog.create_book(new_book).await?;
    let location = format!("/books/{}", book.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(book),
    ))
}

/// Delete book by ID
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted, all holders released"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
