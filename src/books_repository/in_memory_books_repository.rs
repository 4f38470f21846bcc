use chrono::Utc;

use crate::api::{Book, BookDetails, BookFilters, BookId, BookSummary};
use crate::books_repository::{BooksRepository, BooksRepositoryError};

/// Insertion-ordered list behind a lock, so that list_books returns
/// summaries in the order books were created.
#[derive(Default)]
pub struct InMemoryBooksRepository {
    books: parking_lot::RwLock<Vec<Book>>,
}

#[async_trait::async_trait]
impl BooksRepository for InMemoryBooksRepository {
    async fn add_book(&self, details: BookDetails) -> Result<BookId, BooksRepositoryError> {
        let book = Book::new(details);
        let book_id = book.id.clone();
        self.books.write().push(book);
        Ok(book_id)
    }

    async fn list_books(
        &self,
        filters: BookFilters,
    ) -> Result<Vec<BookSummary>, BooksRepositoryError> {
        Ok(self
            .books
            .read()
            .iter()
            .filter(|book| filters.matches(book))
            .map(Book::summary)
            .collect())
    }

    async fn get_book(&self, book_id: &BookId) -> Result<Book, BooksRepositoryError> {
        self.books
            .read()
            .iter()
            .find(|book| &book.id == book_id)
            .cloned()
            .ok_or_else(|| BooksRepositoryError::NotFound(book_id.clone()))
    }

    async fn update_book(
        &self,
        book_id: &BookId,
        details: BookDetails,
    ) -> Result<(), BooksRepositoryError> {
        let mut locked_books = self.books.write();
        let book = locked_books
            .iter_mut()
            .find(|book| &book.id == book_id)
            .ok_or_else(|| BooksRepositoryError::NotFound(book_id.clone()))?;

        book.finished = details.finished();
        book.name = details.name;
        book.year = details.year;
        book.author = details.author;
        book.summary = details.summary;
        book.publisher = details.publisher;
        book.page_count = details.page_count;
        book.read_page = details.read_page;
        book.reading = details.reading;
        book.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_book(&self, book_id: &BookId) -> Result<(), BooksRepositoryError> {
        let mut locked_books = self.books.write();
        let len_before = locked_books.len();
        locked_books.retain(|book| &book.id != book_id);
        if locked_books.len() == len_before {
            Err(BooksRepositoryError::NotFound(book_id.clone()))
        } else {
            Ok(())
        }
    }
}
