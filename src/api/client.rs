//! Thin client for the Kinopoisk API v1.4.
//!
//! Every method issues exactly one request and hands back the fully read
//! [`ApiResponse`]; interpreting the status is left to the caller.

use crate::api::response::ApiResponse;
use crate::config::SuiteConfig;
use crate::errors::Result;
use crate::test_data::INVALID_TOKEN;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct KinopoiskApiClient {
    client: Client,
    base_url: String,
    auth_headers: HeaderMap,
    invalid_token_headers: HeaderMap,
}

impl KinopoiskApiClient {
    pub fn new(config: &SuiteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.api_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_headers: config.auth_headers()?,
            invalid_token_headers: config.auth_headers_with_token(INVALID_TOKEN)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}/movie/search", self.base_url)
    }

    /// `GET /movie/search?query=<query>` with the configured key.
    pub async fn search_movie_by_query(&self, query: &str) -> Result<ApiResponse> {
        debug!(query, "GET /movie/search");
        let request = self
            .client
            .get(self.search_url())
            .headers(self.auth_headers.clone())
            .query(&[("query", query)]);
        self.send(request).await
    }

    /// `GET /movie?genres.name=<genre>` with the configured key.
    pub async fn get_movies_by_genre(&self, genre_name: &str) -> Result<ApiResponse> {
        debug!(genre = genre_name, "GET /movie");
        let request = self
            .client
            .get(format!("{}/movie", self.base_url))
            .headers(self.auth_headers.clone())
            .query(&[("genres.name", genre_name)]);
        self.send(request).await
    }

    /// `GET /movie/search?query` with the parameter present but valueless.
    pub async fn search_movie_empty_query(&self) -> Result<ApiResponse> {
        debug!("GET /movie/search with empty query parameter");
        let request = self
            .client
            .get(format!("{}?query", self.search_url()))
            .headers(self.auth_headers.clone());
        self.send(request).await
    }

    /// `POST /movie/search?query=<query>` although the endpoint is GET only.
    pub async fn search_movie_with_wrong_method(&self, query: &str) -> Result<ApiResponse> {
        debug!(query, "POST /movie/search");
        let request = self
            .client
            .post(self.search_url())
            .headers(self.auth_headers.clone())
            .query(&[("query", query)]);
        self.send(request).await
    }

    /// Search without any headers, so no `x-api-key` is sent.
    pub async fn search_movie_without_token(&self, query: &str) -> Result<ApiResponse> {
        debug!(query, "GET /movie/search without token");
        let request = self.client.get(self.search_url()).query(&[("query", query)]);
        self.send(request).await
    }

    /// Search with `x-api-key` set to a known invalid token.
    pub async fn search_movie_with_invalid_token(&self, query: &str) -> Result<ApiResponse> {
        debug!(query, "GET /movie/search with invalid token");
        let request = self
            .client
            .get(self.search_url())
            .headers(self.invalid_token_headers.clone())
            .query(&[("query", query)]);
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Received response");
        Ok(ApiResponse::new(status, body))
    }
}
