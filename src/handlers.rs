use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{Error, HttpResponse};
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{
    AddBookData, AddBookResponse, BookPayload, GetBookData, GetBookResponse, ListBooksData,
    ListBooksQuery, ListBooksResponse, MessageResponse, STATUS_SUCCESS,
};
use crate::books_repository::{BooksRepository, BooksRepositoryError};
use crate::validation;

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn add_book(
    books_repository: Data<Arc<dyn BooksRepository>>,
    payload: web::Json<BookPayload>,
) -> Result<HttpResponse, Error> {
    let details = match validation::validate(payload.into_inner()) {
        Ok(details) => details,
        Err(err) => {
            return Ok(HttpResponse::BadRequest()
                .json(MessageResponse::fail(format!("Failed to add book. {}", err))))
        }
    };

    Ok(match books_repository.add_book(details).await {
        Ok(book_id) => HttpResponse::Created().json(AddBookResponse {
            status: STATUS_SUCCESS.to_string(),
            message: "Book added successfully".to_string(),
            data: AddBookData { book_id },
        }),
        Err(err) => {
            tracing::error!("Add book failed {}", err);
            HttpResponse::InternalServerError()
                .json(MessageResponse::fail(format!("Failed to add book. {}", err)))
        }
    })
}

#[api_v2_operation]
pub async fn get_all_books(
    books_repository: Data<Arc<dyn BooksRepository>>,
    query: web::Query<ListBooksQuery>,
) -> Result<HttpResponse, Error> {
    let filters = match validation::parse_filters(query.into_inner()) {
        Ok(filters) => filters,
        Err(err) => {
            return Ok(HttpResponse::BadRequest().json(MessageResponse::fail(format!(
                "Failed to fetch books. {}",
                err
            ))))
        }
    };

    Ok(match books_repository.list_books(filters).await {
        Ok(books) => HttpResponse::Ok().json(ListBooksResponse {
            status: STATUS_SUCCESS.to_string(),
            data: ListBooksData { books },
        }),
        Err(err) => {
            tracing::error!("Get all books failed {}", err);
            HttpResponse::InternalServerError().json(MessageResponse::fail(format!(
                "Failed to fetch books. {}",
                err
            )))
        }
    })
}

#[api_v2_operation]
pub async fn get_book(
    books_repository: Data<Arc<dyn BooksRepository>>,
    book_id: web::Path<String>,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository.get_book(&book_id.into_inner()).await {
            Ok(book) => HttpResponse::Ok().json(GetBookResponse {
                status: STATUS_SUCCESS.to_string(),
                data: GetBookData { book },
            }),
            Err(BooksRepositoryError::NotFound(_)) => {
                HttpResponse::NotFound().json(MessageResponse::fail("Book not found"))
            }
            Err(err) => {
                tracing::error!("Get book failed {}", err);
                HttpResponse::InternalServerError()
                    .json(MessageResponse::fail(format!("Failed to get book. {}", err)))
            }
        },
    )
}

#[api_v2_operation]
pub async fn update_book(
    books_repository: Data<Arc<dyn BooksRepository>>,
    book_id: web::Path<String>,
    payload: web::Json<BookPayload>,
) -> Result<HttpResponse, Error> {
    let details = match validation::validate(payload.into_inner()) {
        Ok(details) => details,
        Err(err) => {
            return Ok(HttpResponse::BadRequest().json(MessageResponse::fail(format!(
                "Failed to update book. {}",
                err
            ))))
        }
    };

    Ok(
        match books_repository
            .update_book(&book_id.into_inner(), details)
            .await
        {
            Ok(()) => HttpResponse::Ok().json(MessageResponse::success("Book updated successfully")),
            Err(BooksRepositoryError::NotFound(_)) => HttpResponse::NotFound().json(
                MessageResponse::fail("Failed to update book. Id not found"),
            ),
            Err(err) => {
                tracing::error!("Update book failed {}", err);
                HttpResponse::InternalServerError().json(MessageResponse::fail(format!(
                    "Failed to update book. {}",
                    err
                )))
            }
        },
    )
}

#[api_v2_operation]
pub async fn delete_book(
    books_repository: Data<Arc<dyn BooksRepository>>,
    book_id: web::Path<String>,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository.delete_book(&book_id.into_inner()).await {
            Ok(()) => HttpResponse::Ok().json(MessageResponse::success("Book deleted successfully")),
            Err(BooksRepositoryError::NotFound(_)) => HttpResponse::NotFound().json(
                MessageResponse::fail("Failed to delete book. Id not found"),
            ),
            Err(err) => {
                tracing::error!("Delete book failed {}", err);
                HttpResponse::InternalServerError().json(MessageResponse::fail(format!(
                    "Failed to delete book. {}",
                    err
                )))
            }
        },
    )
}
