//! Expectation checks over API responses.

use crate::api::ApiResponse;
use crate::errors::{ensure, Result, SuiteError};

pub fn status_in(response: &ApiResponse, expected: &[u16]) -> Result<()> {
    let actual = response.status_code();
    if expected.contains(&actual) {
        Ok(())
    } else {
        Err(SuiteError::UnexpectedStatus {
            expected: expected.to_vec(),
            actual,
        })
    }
}

pub fn status(response: &ApiResponse, expected: u16) -> Result<()> {
    status_in(response, &[expected])
}

/// The body is JSON and `docs` holds at least one record.
pub fn docs_not_empty(response: &ApiResponse) -> Result<()> {
    response.json()?;
    ensure(response.docs_len() > 0, || {
        "expected at least one movie in docs, got none".to_string()
    })
}

/// The body is JSON and `docs`, if present, is a list.
pub fn docs_list_if_present(response: &ApiResponse) -> Result<()> {
    response.json()?;
    let docs = response.field("docs");
    ensure(docs.is_none() || response.docs().is_some(), || {
        format!("docs is not a list: {}", docs.map(|v| v.to_string()).unwrap_or_default())
    })
}

/// The body is JSON with a `docs` field of any shape.
pub fn has_docs(response: &ApiResponse) -> Result<()> {
    response.json()?;
    ensure(response.has_field("docs"), || {
        "response has no docs field".to_string()
    })
}

/// Some record's lowercased name contains `needle` (compared lowercased).
pub fn some_name_contains(response: &ApiResponse, needle: &str) -> Result<()> {
    response.json()?;
    let needle = needle.to_lowercase();
    let names = response.movie_names();
    ensure(names.iter().any(|name| name.contains(&needle)), || {
        format!("no movie name contains '{}' among {:?}", needle, names)
    })
}
