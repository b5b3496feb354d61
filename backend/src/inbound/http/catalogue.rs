//! Catalogue HTTP handlers.
//!
//! ```text
//! GET    /api/books
//! GET    /api/books/categories
//! GET    /api/books/{id}
//! POST   /api/books
//! PUT    /api/books/{id}
//! DELETE /api/books/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{BookFilter, BookPatch, ListBooksRequest};
use crate::domain::{Book, Error, NewBook};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::page_request;

/// Query parameters for the book listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListBooksQuery {
    /// Substring match on the title.
    pub title: Option<String>,
    /// Substring match on the author.
    pub author: Option<String>,
    /// Exact match on the category.
    pub category: Option<String>,
    /// Page number, from 1.
    pub page: Option<u32>,
    /// Page size, at most 100.
    pub page_size: Option<u32>,
}

/// Request payload for cataloguing a book.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookBody {
    /// Unique ISBN.
    pub isbn: String,
    /// Title shown in listings.
    pub title: String,
    /// Primary author.
    pub author: String,
    /// Publishing house.
    #[serde(default)]
    pub publisher: String,
    /// Shelving category.
    #[serde(default)]
    pub category: String,
    /// List price in currency units.
    #[serde(default)]
    pub price: f64,
    /// Copies owned by the library.
    #[serde(default = "default_total")]
    pub total: u32,
    /// Publication date, `YYYY-MM-DD`.
    #[serde(default)]
    pub publish_date: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
}

const fn default_total() -> u32 {
    1
}

impl From<CreateBookBody> for NewBook {
    fn from(body: CreateBookBody) -> Self {
        Self {
            isbn: body.isbn,
            title: body.title,
            author: body.author,
            publisher: body.publisher,
            category: body.category,
            price: body.price,
            total: body.total,
            publish_date: body.publish_date,
            description: body.description,
        }
    }
}

/// Field-level merge payload for a catalogue update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookBody {
    /// New title.
    pub title: Option<String>,
    /// New author.
    pub author: Option<String>,
    /// New publisher.
    pub publisher: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New list price.
    pub price: Option<f64>,
    /// New copy count owned by the library.
    pub total: Option<u32>,
    /// New publication date.
    pub publish_date: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl From<UpdateBookBody> for BookPatch {
    fn from(body: UpdateBookBody) -> Self {
        Self {
            title: body.title,
            author: body.author,
            publisher: body.publisher,
            category: body.category,
            price: body.price,
            total: body.total,
            publish_date: body.publish_date,
            description: body.description,
        }
    }
}

/// List books with filters and paging.
#[utoipa::path(
    get,
    path = "/api/books",
    params(ListBooksQuery),
    responses(
        (status = 200, description = "Page of books"),
        (status = 400, description = "Invalid page selection", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(
    state: web::Data<HttpState>,
    query: web::Query<ListBooksQuery>,
) -> ApiResult<web::Json<Page<Book>>> {
    let query = query.into_inner();
    let page = page_request(query.page, query.page_size)?;
    let books = state
        .catalogue_query
        .list_books(ListBooksRequest {
            filter: BookFilter {
                title: query.title.filter(|title| !title.is_empty()),
                author: query.author.filter(|author| !author.is_empty()),
                category: query.category.filter(|category| !category.is_empty()),
            },
            page,
        })
        .await?;
    Ok(web::Json(books))
}

/// Distinct non-empty categories.
#[utoipa::path(
    get,
    path = "/api/books/categories",
    responses((status = 200, description = "Sorted category names", body = [String])),
    tags = ["catalogue"],
    operation_id = "listCategories"
)]
#[get("/books/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<String>>> {
    let categories = state.catalogue_query.list_categories().await?;
    Ok(web::Json(categories))
}

/// Fetch one book.
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i64, Path, description = "Book identity")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "Book not found", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "getBook"
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Book>> {
    let book = state.catalogue_query.get_book(path.into_inner()).await?;
    Ok(web::Json(book))
}

/// Catalogue a new title.
#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookBody,
    responses(
        (status = 200, description = "Book catalogued", body = Book),
        (status = 400, description = "Duplicate ISBN or invalid payload", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookBody>,
) -> ApiResult<web::Json<Book>> {
    let book = state.catalogue.create_book(payload.into_inner().into()).await?;
    Ok(web::Json(book))
}

/// Merge changes into a catalogue record.
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i64, Path, description = "Book identity")),
    request_body = UpdateBookBody,
    responses(
        (status = 200, description = "Updated book", body = Book),
        (status = 400, description = "Total below outstanding loans", body = Error),
        (status = 404, description = "Book not found", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "updateBook"
)]
#[put("/books/{id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateBookBody>,
) -> ApiResult<web::Json<Book>> {
    let book = state
        .catalogue
        .update_book(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(book))
}

/// Remove a title from the catalogue.
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i64, Path, description = "Book identity")),
    responses(
        (status = 204, description = "Book removed"),
        (status = 404, description = "Book not found", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "deleteBook"
)]
#[delete("/books/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.catalogue.delete_book(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
