/// HTTP behaviour of the local fixture API
use lapbytes::api::{client::set_silent, fetch_page, products::ProductsEnvelope, ApiClient, FetchError};
use lapbytes::fixture::{self, FixtureState};
use lapbytes::models::Product;
use std::time::Duration;

fn catalog(n: i64) -> Vec<Product> {
    (1..=n)
        .map(|id| Product { id: Some(id), ..Default::default() })
        .collect()
}

async fn spawn(state: FixtureState) -> ApiClient {
    set_silent(true);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(fixture::serve_on(listener, state));
    ApiClient::new(&format!("http://{}", addr)).unwrap()
}

#[tokio::test]
async fn test_pages_are_sliced_in_order() {
    let api = spawn(FixtureState::new(catalog(8))).await;
    let first = fetch_page(&api, 1, 6).await.unwrap();
    let second = fetch_page(&api, 2, 6).await.unwrap();
    let third = fetch_page(&api, 3, 6).await.unwrap();

    assert_eq!(first.iter().map(|p| p.id.unwrap()).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(second.iter().map(|p| p.id.unwrap()).collect::<Vec<_>>(), vec![7, 8]);
    assert!(third.is_empty());
}

#[tokio::test]
async fn test_envelope_carries_message() {
    let api = spawn(FixtureState::new(catalog(1))).await;
    let envelope: ProductsEnvelope = api.get_json("/api/products/6/1").await.unwrap();
    assert_eq!(envelope.message.as_deref(), Some("request successful"));
}

#[tokio::test]
async fn test_invalid_pagination_is_bad_request() {
    let api = spawn(FixtureState::new(catalog(3))).await;
    let zero = fetch_page(&api, 0, 6).await;
    assert!(matches!(zero, Err(FetchError::Status(400))));

    let text: Result<serde_json::Value, _> = api.get_json("/api/products/six/1").await;
    assert!(matches!(text, Err(FetchError::Status(400))));
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let api = spawn(FixtureState::new(catalog(3))).await;
    let found = lapbytes::api::fetch_product(&api, 2).await.unwrap();
    assert_eq!(found.id, Some(2));

    let missing = lapbytes::api::fetch_product(&api, 99).await;
    assert!(matches!(missing, Err(FetchError::Status(404))));
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    set_silent(true);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = axum::Router::new().route(
        "/api/products/:limit/:page",
        axum::routing::get(|| async { "<html>maintenance</html>" }),
    );
    tokio::spawn(async move { axum::serve(listener, app).await });

    let api = ApiClient::new(&format!("http://{}", addr)).unwrap();
    let result = fetch_page(&api, 1, 6).await;
    assert!(matches!(result, Err(FetchError::Parse(_))));
}

#[tokio::test]
async fn test_delay_and_request_count() {
    let state = FixtureState::new(catalog(2)).with_delay(Duration::from_millis(50));
    let api = spawn(state.clone()).await;

    let started = std::time::Instant::now();
    fetch_page(&api, 1, 6).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert_eq!(state.requests_served(), 1);
}

#[tokio::test]
async fn test_load_products_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id": 1, "name": "ThinkPad", "gpu_model": {{"String": "", "Valid": false}}}}, {{"id": 2}}]"#
    )
    .unwrap();

    let products = fixture::load_products_file(file.path()).await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name.as_deref(), Some("ThinkPad"));
    assert_eq!(products[0].gpu_model, None);

    let missing = fixture::load_products_file(std::path::Path::new("/nonexistent/laptops.json")).await;
    assert!(matches!(missing, Err(fixture::FixtureError::Io(_))));
}
