use crate::api::{BookDetails, BookFilters, BookPayload, ListBooksQuery};

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Please provide a book name")]
    MissingName,

    #[error("year, publisher and author must all be provided")]
    MissingRequiredFields,

    #[error("readPage must not be greater than pageCount")]
    PageOverflow,

    #[error("readPage must not be negative")]
    NegativeReadPage,
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
#[error("The '{parameter}' query parameter must be 1 (true) or 0 (false)")]
pub struct InvalidFilterError {
    pub parameter: &'static str,
}

/// Checks a raw payload against the book rules, in order, first failure wins:
/// 1. name present and non-empty
/// 2. year, publisher and author present
/// 3. readPage <= pageCount
/// 4. readPage >= 0
///
/// Absent pageCount and readPage default to 0, absent reading to false.
pub fn validate(payload: BookPayload) -> Result<BookDetails, ValidationError> {
    let name = match payload.name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ValidationError::MissingName),
    };

    let (Some(year), Some(publisher), Some(author)) =
        (payload.year, payload.publisher, payload.author)
    else {
        return Err(ValidationError::MissingRequiredFields);
    };

    let page_count = payload.page_count.unwrap_or(0);
    let read_page = payload.read_page.unwrap_or(0);

    if read_page > page_count {
        return Err(ValidationError::PageOverflow);
    }
    if read_page < 0 {
        return Err(ValidationError::NegativeReadPage);
    }

    Ok(BookDetails {
        name,
        year,
        author,
        summary: payload.summary,
        publisher,
        page_count,
        read_page,
        reading: payload.reading.unwrap_or(false),
    })
}

/// Parses the raw GET /books query into typed filters.
/// reading and finished must be exactly "0" or "1"; anything else is
/// rejected naming the offending parameter.
pub fn parse_filters(query: ListBooksQuery) -> Result<BookFilters, InvalidFilterError> {
    Ok(BookFilters {
        name: query.name,
        reading: parse_flag("reading", query.reading)?,
        finished: parse_flag("finished", query.finished)?,
    })
}

fn parse_flag(
    parameter: &'static str,
    value: Option<String>,
) -> Result<Option<bool>, InvalidFilterError> {
    match value.as_deref() {
        None => Ok(None),
        Some("0") => Ok(Some(false)),
        Some("1") => Ok(Some(true)),
        Some(_) => Err(InvalidFilterError { parameter }),
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    fn full_payload() -> BookPayload {
        BookPayload {
            name: Some("name".to_string()),
            year: Some(2020),
            author: Some("author".to_string()),
            summary: Some("summary".to_string()),
            publisher: Some("publisher".to_string()),
            page_count: Some(100),
            read_page: Some(25),
            reading: Some(true),
        }
    }

    #[test]
    fn test_valid_payload_passes_through() {
        let details = validate(full_payload()).unwrap();
        assert_eq!(details.name, "name");
        assert_eq!(details.year, 2020);
        assert_eq!(details.page_count, 100);
        assert_eq!(details.read_page, 25);
        assert!(details.reading);
        assert!(!details.finished());
    }

    #[test]
    fn test_missing_or_empty_name_is_rejected_first() {
        let missing = BookPayload {
            name: None,
            ..full_payload()
        };
        assert_eq!(validate(missing), Err(ValidationError::MissingName));

        let empty = BookPayload {
            name: Some("".to_string()),
            ..full_payload()
        };
        assert_eq!(validate(empty), Err(ValidationError::MissingName));

        // name wins over later rules
        let empty_name_and_overflow = BookPayload {
            name: None,
            read_page: Some(500),
            ..full_payload()
        };
        assert_eq!(
            validate(empty_name_and_overflow),
            Err(ValidationError::MissingName)
        );
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        for payload in [
            BookPayload {
                year: None,
                ..full_payload()
            },
            BookPayload {
                publisher: None,
                ..full_payload()
            },
            BookPayload {
                author: None,
                ..full_payload()
            },
        ] {
            assert_eq!(
                validate(payload),
                Err(ValidationError::MissingRequiredFields)
            );
        }
    }

    #[test]
    fn test_read_page_bounds() {
        let overflow = BookPayload {
            read_page: Some(101),
            ..full_payload()
        };
        assert_eq!(validate(overflow), Err(ValidationError::PageOverflow));

        let negative = BookPayload {
            read_page: Some(-1),
            ..full_payload()
        };
        assert_eq!(validate(negative), Err(ValidationError::NegativeReadPage));

        // overflow is checked before negativity
        let negative_count = BookPayload {
            page_count: Some(-5),
            read_page: Some(-1),
            ..full_payload()
        };
        assert_eq!(validate(negative_count), Err(ValidationError::PageOverflow));
    }

    #[test]
    fn test_absent_page_fields_default_to_zero_and_finished() {
        let details = validate(BookPayload {
            page_count: None,
            read_page: None,
            reading: None,
            ..full_payload()
        })
        .unwrap();
        assert_eq!(details.page_count, 0);
        assert_eq!(details.read_page, 0);
        assert!(!details.reading);
        assert!(details.finished());
    }

    #[test]
    fn test_parse_filters() {
        let filters = parse_filters(ListBooksQuery {
            name: Some("rust".to_string()),
            reading: Some("1".to_string()),
            finished: Some("0".to_string()),
        })
        .unwrap();
        assert_eq!(filters.name.as_deref(), Some("rust"));
        assert_eq!(filters.reading, Some(true));
        assert_eq!(filters.finished, Some(false));

        assert_eq!(
            parse_filters(ListBooksQuery::default()).unwrap(),
            BookFilters::default()
        );

        let bad_reading = parse_filters(ListBooksQuery {
            reading: Some("2".to_string()),
            ..Default::default()
        });
        assert_eq!(bad_reading, Err(InvalidFilterError { parameter: "reading" }));

        let bad_finished = parse_filters(ListBooksQuery {
            finished: Some("true".to_string()),
            ..Default::default()
        });
        assert_eq!(
            bad_finished,
            Err(InvalidFilterError {
                parameter: "finished"
            })
        );
    }
}
