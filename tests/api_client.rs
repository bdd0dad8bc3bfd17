//! API client and API cases against a local mock of the Kinopoisk API.

use kinopoisk_suite::config::API_KEY_HEADER;
use kinopoisk_suite::test_data::{CYRILLIC_QUERY, DIGIT_QUERY, EMPTY_QUERY, GENRE_FANTASY, INVALID_TOKEN};
use kinopoisk_suite::{ApiCase, CaseOutcome, KinopoiskApiClient, SuiteConfig, SuiteError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const API_KEY: &str = "test-key";

async fn client_for(server: &MockServer) -> KinopoiskApiClient {
    let config = SuiteConfig::default()
        .with_api_key(API_KEY)
        .with_api_base_url(&format!("{}/v1.4", server.uri()))
        .expect("mock server URI is valid");
    KinopoiskApiClient::new(&config).expect("client builds")
}

fn movies(names: &[&str]) -> serde_json::Value {
    let docs: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": i + 1, "name": name, "year": 2019 }))
        .collect();
    json!({ "docs": docs, "total": names.len(), "limit": 10, "page": 1, "pages": 1 })
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

#[tokio::test]
async fn test_search_sends_query_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.4/movie/search"))
        .and(query_param("query", CYRILLIC_QUERY))
        .and(header(API_KEY_HEADER, API_KEY))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movies(&["Нэчжа"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.search_movie_by_query(CYRILLIC_QUERY).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.movie_names(), vec!["нэчжа".to_string()]);
    let page = response.movie_page().unwrap();
    assert_eq!(page.docs[0].year, Some(2019));
}

#[tokio::test]
async fn test_genre_listing_uses_genres_name_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.4/movie"))
        .and(query_param("genres.name", GENRE_FANTASY))
        .respond_with(ResponseTemplate::new(200).set_body_json(movies(&["Властелин колец"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.get_movies_by_genre(GENRE_FANTASY).await.unwrap();
    assert_eq!(response.docs_len(), 1);
}

#[tokio::test]
async fn test_empty_query_parameter_has_no_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.4/movie/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movies(&[])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.search_movie_empty_query().await.unwrap();

    let request = only_request(&server).await;
    assert_eq!(request.url.query(), Some("query"));
    assert_eq!(request.headers.get(API_KEY_HEADER).unwrap(), API_KEY);
}

#[tokio::test]
async fn test_empty_string_query_keeps_equals_sign() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movies(&[])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.search_movie_by_query(EMPTY_QUERY).await.unwrap();

    let request = only_request(&server).await;
    assert_eq!(request.url.query(), Some("query="));
}

#[tokio::test]
async fn test_wrong_method_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.4/movie/search"))
        .and(query_param("query", DIGIT_QUERY))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.search_movie_with_wrong_method(DIGIT_QUERY).await.unwrap();
    assert_eq!(response.status_code(), 405);
    assert!(response.json.is_none());
}

#[tokio::test]
async fn test_without_token_sends_no_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.search_movie_without_token(DIGIT_QUERY).await.unwrap();
    assert_eq!(response.status_code(), 401);

    let request = only_request(&server).await;
    assert!(request.headers.get(API_KEY_HEADER).is_none());
    assert_eq!(request.url.query(), Some("query=11"));
}

#[tokio::test]
async fn test_invalid_token_replaces_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header(API_KEY_HEADER, INVALID_TOKEN))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.search_movie_with_invalid_token(DIGIT_QUERY).await.unwrap();
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut config = SuiteConfig::default()
        .with_api_base_url(&server.uri())
        .unwrap();
    config.api_timeout_ms = 50;
    let client = KinopoiskApiClient::new(&config).unwrap();

    let err = client.search_movie_by_query(DIGIT_QUERY).await.unwrap_err();
    assert!(matches!(err, SuiteError::Http(ref e) if e.is_timeout()));
}

/// Mounts a catch-all responder and runs `case` against it.
async fn run_case_with(case: ApiCase, response: ResponseTemplate) -> kinopoisk_suite::Result<CaseOutcome> {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(response)
        .mount(&server)
        .await;
    let client = client_for(&server).await;
    case.run(&client).await
}

#[tokio::test]
async fn test_positive_cases_need_200_and_movies() {
    let ok = ResponseTemplate::new(200).set_body_json(movies(&["Нэчжа побеждает Царя драконов"]));
    for case in [ApiCase::SearchByDigits, ApiCase::SearchByCyrillic, ApiCase::MoviesByGenre] {
        assert_eq!(run_case_with(case, ok.clone()).await.unwrap(), CaseOutcome::Passed);
    }

    let empty = ResponseTemplate::new(200).set_body_json(movies(&[]));
    assert!(matches!(
        run_case_with(ApiCase::SearchByDigits, empty).await,
        Err(SuiteError::Assertion(_))
    ));

    let other_title = ResponseTemplate::new(200).set_body_json(movies(&["Одиннадцать друзей Оушена"]));
    assert!(matches!(
        run_case_with(ApiCase::SearchByCyrillic, other_title).await,
        Err(SuiteError::Assertion(_))
    ));

    assert!(matches!(
        run_case_with(ApiCase::MoviesByGenre, ResponseTemplate::new(403)).await,
        Err(SuiteError::UnexpectedStatus { actual: 403, .. })
    ));
}

#[tokio::test]
async fn test_tolerant_cases_accept_documented_statuses() {
    for case in [ApiCase::EmptyQuery, ApiCase::SymbolQuery] {
        assert!(run_case_with(case, ResponseTemplate::new(404)).await.is_ok());
        assert!(run_case_with(case, ResponseTemplate::new(200).set_body_json(json!({ "docs": [] })))
            .await
            .is_ok());
        assert!(run_case_with(case, ResponseTemplate::new(200).set_body_json(json!({ "docs": "x" })))
            .await
            .is_err());
        assert!(matches!(
            run_case_with(case, ResponseTemplate::new(401)).await,
            Err(SuiteError::UnexpectedStatus { actual: 401, .. })
        ));
    }

    for status in [401, 405] {
        assert!(run_case_with(ApiCase::WrongMethod, ResponseTemplate::new(status))
            .await
            .is_ok());
    }
    assert!(run_case_with(ApiCase::WrongMethod, ResponseTemplate::new(200).set_body_json(json!({ "docs": [] })))
        .await
        .is_ok());
    assert!(run_case_with(ApiCase::WrongMethod, ResponseTemplate::new(200).set_body_json(json!({})))
        .await
        .is_err());
    assert!(run_case_with(ApiCase::WrongMethod, ResponseTemplate::new(500))
        .await
        .is_err());
}

#[tokio::test]
async fn test_auth_cases_require_401() {
    for case in [ApiCase::WithoutToken, ApiCase::InvalidToken] {
        assert_eq!(
            run_case_with(case, ResponseTemplate::new(401)).await.unwrap(),
            CaseOutcome::Passed
        );
        assert!(matches!(
            run_case_with(case, ResponseTemplate::new(200).set_body_json(movies(&["x"]))).await,
            Err(SuiteError::UnexpectedStatus { actual: 200, .. })
        ));
    }
}
