pub use in_memory_books_repository::InMemoryBooksRepository;
pub use postgres_books_repository::{PostgresBooksRepository, PostgresBooksRepositoryConfig};

use crate::api::{Book, BookDetails, BookFilters, BookId, BookSummary};

mod in_memory_books_repository;
mod postgres_books_repository;

#[derive(thiserror::Error, Debug)]
pub enum BooksRepositoryError {
    #[error("Book {0} not found")]
    NotFound(BookId),

    #[error("Failed to deserialize book: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Database failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait BooksRepository: Send + Sync {
    /// Persists a new book built from validated details, returns the id assigned to it
    async fn add_book(&self, details: BookDetails) -> Result<BookId, BooksRepositoryError>;
    /// Lists summaries of the books matching all given filters, in store order
    async fn list_books(
        &self,
        filters: BookFilters,
    ) -> Result<Vec<BookSummary>, BooksRepositoryError>;
    /// Retrieves the full record for the given id
    async fn get_book(&self, book_id: &BookId) -> Result<Book, BooksRepositoryError>;
    /// Replaces all mutable fields of the book and refreshes updatedAt,
    /// preserving id and insertedAt
    async fn update_book(
        &self,
        book_id: &BookId,
        details: BookDetails,
    ) -> Result<(), BooksRepositoryError>;
    /// Removes the book from the store
    async fn delete_book(&self, book_id: &BookId) -> Result<(), BooksRepositoryError>;
}
