//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, readers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Alexandria API",
        version = "1.0.0",
        description = "Library lending record keeper REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::given_out_books,
        books::available_books,
        books::search_books,
        books::get_book,
        books::update_book,
        books::create_book,
        books::delete_book,
        // Readers
        readers::search_readers,
        readers::get_reader,
        readers::update_reader,
        readers::create_reader,
        readers::delete_reader,
        readers::give_book_to_reader,
        readers::return_book_to_library,
    ),
    components(
        schemas(
            crate::models::book::BookDto,
            crate::models::book::NewBook,
            crate::models::reader::ReaderDto,
            crate::models::reader::NewReader,
            crate::error::ErrorResponse,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "books", description = "Book catalog operations"),
        (name = "readers", description = "Reader and lending operations"),
        (name = "health", description = "Service health probes")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
