use crate::errors::{Result, SuiteError};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fully read HTTP response: status, raw body and the body decoded as JSON when possible.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
    pub json: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: String) -> Self {
        let json = serde_json::from_str(&body).ok();
        Self { status, body, json }
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn json(&self) -> Result<&Value> {
        self.json.as_ref().ok_or_else(|| {
            SuiteError::assertion(format!(
                "response body (status {}) is not JSON: {}",
                self.status_code(),
                truncate(&self.body, 200)
            ))
        })
    }

    /// Top-level field of a JSON object body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json.as_ref().and_then(|v| v.get(name))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The `docs` field, if present and an array.
    pub fn docs(&self) -> Option<&Vec<Value>> {
        self.field("docs").and_then(Value::as_array)
    }

    pub fn docs_len(&self) -> usize {
        self.docs().map_or(0, Vec::len)
    }

    /// Lowercased `name` of every record in `docs`; records without a name yield `""`.
    pub fn movie_names(&self) -> Vec<String> {
        self.docs()
            .map(|docs| {
                docs.iter()
                    .map(|doc| {
                        doc.get("name")
                            .and_then(Value::as_str)
                            .unwrap_or("")
                            .to_lowercase()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn movie_page(&self) -> Result<MoviePage> {
        let value = self.json()?.clone();
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub alternative_name: Option<String>,
    pub year: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    pub docs: Vec<Movie>,
    pub total: Option<u64>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub pages: Option<u64>,
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(StatusCode::from_u16(status).unwrap(), body.to_string())
    }

    #[test]
    fn test_docs_and_names() {
        let resp = response(
            200,
            r#"{"docs":[{"id":1,"name":"Нэчжа побеждает Царя драконов"},{"id":2}],"total":2}"#,
        );
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.docs_len(), 2);
        assert_eq!(
            resp.movie_names(),
            vec!["нэчжа побеждает царя драконов".to_string(), String::new()]
        );
        assert!(resp.has_field("total"));
    }

    #[test]
    fn test_non_json_body() {
        let resp = response(502, "<html>Bad Gateway</html>");
        assert!(resp.json.is_none());
        assert!(resp.docs().is_none());
        assert!(resp.movie_names().is_empty());
        assert!(matches!(resp.json(), Err(SuiteError::Assertion(_))));
    }

    #[test]
    fn test_docs_not_a_list() {
        let resp = response(200, r#"{"docs":"nope"}"#);
        assert!(resp.has_field("docs"));
        assert!(resp.docs().is_none());
    }

    #[test]
    fn test_movie_page() {
        let resp = response(
            200,
            r#"{"docs":[{"id":42,"name":"Одиннадцать друзей Оушена","alternativeName":"Ocean's Eleven","year":2001,"type":"movie"}],"total":1,"limit":10,"page":1,"pages":1}"#,
        );
        let page = resp.movie_page().unwrap();
        assert_eq!(page.docs.len(), 1);
        assert_eq!(page.docs[0].alternative_name.as_deref(), Some("Ocean's Eleven"));
        assert_eq!(page.docs[0].kind.as_deref(), Some("movie"));
        assert_eq!(page.pages, Some(1));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("фэнтези", 3), "фэн...");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
