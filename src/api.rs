use chrono::{DateTime, Utc};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BookId = String;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAIL: &str = "fail";

/// Full book record as stored and as returned by GET /books/{id}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: Option<String>,
    pub publisher: String,
    pub page_count: i32,
    pub read_page: i32,
    /// Derived from read_page == page_count, never taken from the client
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Builds a fresh record from validated details:
    /// new id, derived `finished`, both timestamps set to the same instant
    pub fn new(details: BookDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().simple().to_string(),
            finished: details.finished(),
            name: details.name,
            year: details.year,
            author: details.author,
            summary: details.summary,
            publisher: details.publisher,
            page_count: details.page_count,
            read_page: details.read_page,
            reading: details.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Raw client payload for POST /books and PUT /books/{id}
/// All fields are optional so that presence rules are validation's job
/// rather than deserialization failures
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i32>,
    pub read_page: Option<i32>,
    pub reading: Option<bool>,
}

/// Validated payload, ready to be persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: Option<String>,
    pub publisher: String,
    pub page_count: i32,
    pub read_page: i32,
    pub reading: bool,
}

impl BookDetails {
    pub fn finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// The reduced shape returned by GET /books
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct BookSummary {
    pub id: BookId,
    pub name: String,
    pub publisher: String,
}

/// Raw query parameters of GET /books, before filter parsing
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct ListBooksQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

/// Typed filters handed to the store; all present filters must match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilters {
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilters {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(name) = &self.name {
            if !book.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(reading) = self.reading {
            if book.reading != reading {
                return false;
            }
        }
        if let Some(finished) = self.finished {
            if book.finished != finished {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct AddBookData {
    pub book_id: BookId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct AddBookResponse {
    pub status: String,
    pub message: String,
    pub data: AddBookData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct ListBooksData {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct ListBooksResponse {
    pub status: String,
    pub data: ListBooksData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct GetBookData {
    pub book: Book,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct GetBookResponse {
    pub status: String,
    pub data: GetBookData,
}

/// Envelope for confirmations (PUT/DELETE success) and every failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_FAIL.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod api_tests {
    use super::*;

    fn details() -> BookDetails {
        BookDetails {
            name: "Systems Programming".to_string(),
            year: 2020,
            author: "A".to_string(),
            summary: None,
            publisher: "P".to_string(),
            page_count: 100,
            read_page: 100,
            reading: false,
        }
    }

    #[test]
    fn test_new_book_derives_finished_and_timestamps() {
        let book = Book::new(details());
        assert!(book.finished);
        assert_eq!(book.inserted_at, book.updated_at);
        assert!(!book.id.is_empty());

        let unfinished = Book::new(BookDetails {
            read_page: 10,
            ..details()
        });
        assert!(!unfinished.finished);
        assert_ne!(book.id, unfinished.id);
    }

    #[test]
    fn test_book_serializes_with_camel_case_wire_names() {
        let value = serde_json::to_value(Book::new(details())).unwrap();
        assert!(value.get("pageCount").is_some());
        assert!(value.get("readPage").is_some());
        assert!(value.get("insertedAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("page_count").is_none());
    }

    #[test]
    fn test_filters_match_independently() {
        let book = Book::new(BookDetails {
            reading: true,
            read_page: 5,
            ..details()
        });

        assert!(BookFilters::default().matches(&book));
        assert!(BookFilters {
            name: Some("SYSTEMS".to_string()),
            ..Default::default()
        }
        .matches(&book));
        assert!(!BookFilters {
            name: Some("unknown".to_string()),
            ..Default::default()
        }
        .matches(&book));
        assert!(BookFilters {
            reading: Some(true),
            finished: Some(false),
            ..Default::default()
        }
        .matches(&book));
        assert!(!BookFilters {
            reading: Some(true),
            finished: Some(true),
            ..Default::default()
        }
        .matches(&book));
    }
}
