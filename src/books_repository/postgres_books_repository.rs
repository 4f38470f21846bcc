use anyhow::Context;
use chrono::Utc;
use serde_json::json;
use tokio_postgres::{Client, NoTls, Statement};

use crate::api::{Book, BookDetails, BookFilters, BookId, BookSummary};
use crate::books_repository::{BooksRepository, BooksRepositoryError};

pub struct PostgresBooksRepository {
    client: Client,
}

pub struct PostgresBooksRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

impl PostgresBooksRepository {
    pub async fn init(config: PostgresBooksRepositoryConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}",
            config.username, config.password, config.hostname
        );
        tracing::info!(
            "Connecting to postgres at {} as {}",
            config.hostname,
            config.username
        );
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("connection error: {}", e);
            }
        });

        // seq keeps list_books in insertion order, matching the in-memory store
        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS books (
            seq             SERIAL,
            id              TEXT PRIMARY KEY,
            params          JSONB
            )
        ",
            )
            .await
            .context("Failed to setup books table")?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl BooksRepository for PostgresBooksRepository {
    async fn add_book(&self, details: BookDetails) -> Result<BookId, BooksRepositoryError> {
        let book = Book::new(details);

        let stmt: Statement = self
            .client
            .prepare("INSERT INTO books (id, params) VALUES ($1, $2) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[&book.id, &json!(book)]).await?;

        let book_id: BookId = rows
            .first()
            .ok_or_else(|| BooksRepositoryError::Other("Id not returned".to_string()))?
            .try_get(0)?;

        Ok(book_id)
    }

    async fn list_books(
        &self,
        filters: BookFilters,
    ) -> Result<Vec<BookSummary>, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(
                "SELECT id, params->>'name', params->>'publisher' FROM books \
                 WHERE ($1::TEXT IS NULL OR strpos(lower(params->>'name'), lower($1)) > 0) \
                 AND ($2::BOOL IS NULL OR (params->>'reading')::BOOL = $2) \
                 AND ($3::BOOL IS NULL OR (params->>'finished')::BOOL = $3) \
                 ORDER BY seq",
            )
            .await?;

        // strpos keeps the name filter a literal substring match; a LIKE
        // pattern would give % and _ wildcard meaning
        let rows = self
            .client
            .query(&stmt, &[&filters.name, &filters.reading, &filters.finished])
            .await?;

        rows.iter()
            .map(|row| {
                Ok(BookSummary {
                    id: row.try_get(0)?,
                    name: row.try_get(1)?,
                    publisher: row.try_get(2)?,
                })
            })
            .collect()
    }

    async fn get_book(&self, book_id: &BookId) -> Result<Book, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("SELECT params FROM books WHERE id = ($1)")
            .await?;

        let rows = self.client.query(&stmt, &[book_id]).await?;

        let params: serde_json::Value = rows
            .first()
            .ok_or_else(|| BooksRepositoryError::NotFound(book_id.clone()))?
            .try_get(0)?;

        Ok(serde_json::from_value(params)?)
    }

    async fn update_book(
        &self,
        book_id: &BookId,
        details: BookDetails,
    ) -> Result<(), BooksRepositoryError> {
        // JSONB merge replaces every mutable field and leaves id and
        // insertedAt untouched, in a single statement
        let patch = json!({
            "name": details.name,
            "year": details.year,
            "author": details.author,
            "summary": details.summary,
            "publisher": details.publisher,
            "pageCount": details.page_count,
            "readPage": details.read_page,
            "finished": details.finished(),
            "reading": details.reading,
            "updatedAt": Utc::now(),
        });

        let stmt: Statement = self
            .client
            .prepare("UPDATE books SET params = params || ($2)::JSONB WHERE id = ($1) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[book_id, &patch]).await?;
        if rows.is_empty() {
            Err(BooksRepositoryError::NotFound(book_id.clone()))
        } else {
            Ok(())
        }
    }

    async fn delete_book(&self, book_id: &BookId) -> Result<(), BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("DELETE FROM books WHERE id = ($1) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[book_id]).await?;
        if rows.is_empty() {
            Err(BooksRepositoryError::NotFound(book_id.clone()))
        } else {
            Ok(())
        }
    }
}
