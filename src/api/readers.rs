//! Reader endpoints, including lend and return

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::reader::{NewReader, ReaderDto},
};

use super::{list_or_no_content, SearchQuery};

/// Search readers by full name
#[utoipa::path(
    get,
    path = "/readers/search",
    tag = "readers",
    params(SearchQuery),
    responses(
        (status = 200, description = "Readers matching the search", body = Vec<ReaderDto>),
        (status = 204, description = "No readers matched")
    )
)]
pub async fn search_readers(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let readers = state.services.readers.search_readers(&query.search_text).await?;
    Ok(list_or_no_content(readers))
}

/// Get reader by ID
#[utoipa::path(
    get,
    path = "/readers/{id}",
    tag = "readers",
    params(
        ("id" = Uuid, Path, description = "Reader ID")
    ),
    responses(
        (status = 200, description = "Reader with held books", body = ReaderDto),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn get_reader(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReaderDto>> {
    let reader = state.services.readers.get_reader(id).await?;
    Ok(Json(reader))
}

/// Update reader
#[utoipa::path(
    put,
    path = "/readers/{id}",
    tag = "readers",
    params(
        ("id" = Uuid, Path, description = "Reader ID")
    ),
    request_body = NewReader,
    responses(
        (status = 204, description = "Reader updated"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn update_reader(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<NewReader>,
) -> AppResult<StatusCode> {
    state.services.readers.update_reader(id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create new reader
#[utoipa::path(
    post,
    path = "/readers",
    tag = "readers",
    request_body = NewReader,
    responses(
        (status = 201, description = "Created reader", body = ReaderDto),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_reader(
    State(state): State<crate::AppState>,
    Json(new_reader): Json<NewReader>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<ReaderDto>)> {
    let reader = state.services.readers.create_reader(new_reader).await?;
    let location = format!("/readers/{}", reader.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(reader),
    ))
}

/// Delete reader by ID
#[utoipa::path(
    delete,
    path = "/readers/{id}",
    tag = "readers",
    params(
        ("id" = Uuid, Path, description = "Reader ID")
    ),
    responses(
        (status = 204, description = "Reader deleted, all held books released"),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn delete_reader(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.readers.delete_reader(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Give a book to a reader
#[utoipa::path(
    post,
    path = "/readers/{id}/give/{bookId}",
    tag = "readers",
    params(
        ("id" = Uuid, Path, description = "Reader ID"),
        ("bookId" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Reader with the book", body = ReaderDto),
        (status = 400, description = "Already lent or no available exemplars"),
        (status = 404, description = "Reader or book not found")
    )
)]
pub async fn give_book_to_reader(
    State(state): State<crate::AppState>,
    Path((id, book_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ReaderDto>> {
    let reader = state.services.lending.lend(id, book_id).await?;
    Ok(Json(reader))
}

/// Return a book to the library
#[utoipa::path(
    delete,
    path = "/readers/{id}/return/{bookId}",
    tag = "readers",
    params(
        ("id" = Uuid, Path, description = "Reader ID"),
        ("bookId" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book returned"),
        (status = 400, description = "Book is not lent to this reader"),
        (status = 404, description = "Reader or book not found")
    )
)]
pub async fn return_book_to_library(
    State(state): State<crate::AppState>,
    Path((id, book_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state.services.lending.return_book(id, book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
