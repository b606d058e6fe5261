use std::time::Duration;

use book_catalog::book_repository::HttpBookRepository;
use book_catalog::config::Config;
use book_catalog::domain::{BookRepository, RequestError};
use book_catalog::models::{Category, CreateBookFragment, Isbn};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Helper to point a repository at the mock server
fn repo_for(server: &MockServer) -> HttpBookRepository {
    let config = Config::new(&server.uri(), None).expect("Invalid mock uri");
    HttpBookRepository::new(config).expect("Failed to build client")
}

fn sample_books() -> serde_json::Value {
    serde_json::json!([
        { "id": 9, "title": "SPQR", "author": "Mary Beard", "category": "History", "isbn": "9781631492228" },
        { "id": 1, "title": "Dune", "author": "Frank Herbert", "category": "Fiction", "isbn": 9780441013593u64 },
        { "id": 7, "title": "Ulysses", "author": "James Joyce", "category": 2, "isbn": "9780679722762" }
    ])
}

#[tokio::test]
async fn test_list_returns_books_in_server_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_books()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let books = repo_for(&mock_server).list().await.expect("List failed");

    assert_eq!(books.iter().map(|b| b.id).collect::<Vec<_>>(), vec![9, 1, 7]);
    assert_eq!(books[1].isbn, Isbn::Number(9780441013593u64.into()));
    assert_eq!(books[2].category, Category::Number(2i64.into()));
}

#[tokio::test]
async fn test_non_success_status_is_request_error() {
    let mock_server = MockServer::start().await;

    for status in [404u16, 500] {
        mock_server.reset().await;
        Mock::given(method("GET"))
            .and(path("/books"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(serde_json::json!({"error": "nope"})),
            )
            .mount(&mock_server)
            .await;

        let result = repo_for(&mock_server).list().await;
        assert_eq!(result.unwrap_err(), RequestError, "status {}", status);
    }
}

#[tokio::test]
async fn test_malformed_json_is_request_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    assert_eq!(repo_for(&mock_server).list().await, Err(RequestError));
}

#[tokio::test]
async fn test_create_posts_json_fragment() {
    let mock_server = MockServer::start().await;

    let fragment = CreateBookFragment {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        category: "Fiction".into(),
        isbn: Isbn::Text("9780441013593".to_string()),
    };

    Mock::given(method("POST"))
        .and(path("/books"))
        .and(header("content-type", "application/json; charset=UTF-8"))
        .and(body_json(serde_json::json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "category": "Fiction",
            "isbn": "9780441013593"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "title": "Dune",
            "author": "Frank Herbert",
            "category": "Fiction",
            "isbn": "9780441013593"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let book = repo_for(&mock_server)
        .create_or_update(fragment.clone())
        .await
        .expect("Create failed");

    assert_eq!(book, fragment.with_id(42));
}

#[tokio::test]
async fn test_delete_hits_book_path_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/books/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ack = repo_for(&mock_server).delete(7).await.expect("Delete failed");
    assert_eq!(ack, serde_json::json!({}));

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert!(!requests[0].headers.contains_key("content-type"));
}

#[tokio::test]
async fn test_delete_with_empty_body_is_request_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/books/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    assert_eq!(repo_for(&mock_server).delete(7).await, Err(RequestError));
}

#[tokio::test]
async fn test_configured_timeout_fails_slow_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_books())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = Config::new(&mock_server.uri(), Some(1)).unwrap();
    let repo = HttpBookRepository::new(config).unwrap();

    assert_eq!(repo.list().await, Err(RequestError));
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Nothing listens on the discard port
    let config = Config::new("http://127.0.0.1:9", None).unwrap();
    let repo = HttpBookRepository::new(config).unwrap();

    assert_eq!(repo.list().await, Err(RequestError));
}
