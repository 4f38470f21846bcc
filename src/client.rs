use anyhow::{bail, Context};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use reqwest_tracing::TracingMiddleware;

use crate::api::{
    AddBookResponse, Book, BookId, BookPayload, BookSummary, GetBookResponse, ListBooksResponse,
    MessageResponse,
};

pub struct BookshelfClient {
    url: String,
    client: ClientWithMiddleware,
}

impl BookshelfClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Calls POST /books
    /// Returns the id assigned to the added book
    pub async fn add_book(&self, payload: BookPayload) -> anyhow::Result<BookId> {
        let response = self
            .client
            .post(format!("{}/books", self.url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            bail!("Failed to add book: {}", Self::failure_message(response).await)
        }

        let body: AddBookResponse = response
            .json()
            .await
            .context("Failed to decode add book response")?;
        Ok(body.data.book_id)
    }

    /// Calls GET /books with the given filters
    pub async fn list_books(
        &self,
        name: Option<&str>,
        reading: Option<bool>,
        finished: Option<bool>,
    ) -> anyhow::Result<Vec<BookSummary>> {
        let mut request = self.client.get(format!("{}/books", self.url));
        if let Some(name) = name {
            request = request.query(&[("name", name)]);
        }
        if let Some(reading) = reading {
            request = request.query(&[("reading", if reading { "1" } else { "0" })]);
        }
        if let Some(finished) = finished {
            request = request.query(&[("finished", if finished { "1" } else { "0" })]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            bail!("Failed to list books: {}", Self::failure_message(response).await)
        }

        let body: ListBooksResponse = response
            .json()
            .await
            .context("Failed to decode list books response")?;
        Ok(body.data.books)
    }

    /// Calls GET /books/{id}
    /// Returns the full record if the book was present,
    /// None if it was not in the repository,
    /// and an error in case of any other failure
    pub async fn get_book(&self, book_id: &str) -> anyhow::Result<Option<Book>> {
        let response = self
            .client
            .get(format!("{}/books/{}", self.url, book_id))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            let body: GetBookResponse = response
                .json()
                .await
                .context("Failed to decode get book response")?;
            Ok(Some(body.data.book))
        } else {
            bail!("Failed to get book: {}", Self::failure_message(response).await)
        }
    }

    /// Calls PUT /books/{id}
    /// Returns true if the book was updated and false if it was not found
    pub async fn update_book(&self, book_id: &str, payload: BookPayload) -> anyhow::Result<bool> {
        let response = self
            .client
            .put(format!("{}/books/{}", self.url, book_id))
            .json(&payload)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            bail!("Failed to update book: {}", Self::failure_message(response).await)
        }
    }

    /// Calls DELETE /books/{id}
    /// Returns true if the book was deleted and false if it was not found
    pub async fn delete_book(&self, book_id: &str) -> anyhow::Result<bool> {
        let response = self
            .client
            .delete(format!("{}/books/{}", self.url, book_id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            bail!("Failed to delete book: {}", Self::failure_message(response).await)
        }
    }

    async fn failure_message(response: reqwest::Response) -> String {
        response
            .json::<MessageResponse>()
            .await
            .map(|envelope| envelope.message)
            .unwrap_or_default()
    }
}
