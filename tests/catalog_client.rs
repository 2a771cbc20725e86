//! HTTP catalog client against a local axum server.

mod common;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use dreambook::api::{CatalogClient, CatalogSource};
use dreambook::auth::SessionStore;
use dreambook::models::{Host, Hotel, NewListing};
use dreambook::search::{SearchQuery, SearchViewModel, SortOption, ViewState};
use dreambook::ApiError;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn client(base_url: &str) -> CatalogClient {
    CatalogClient::with_client(reqwest::Client::new(), base_url, Duration::from_secs(5))
}

fn sample_listings() -> Value {
    json!([
        common::listing_json(1, "Grand Hotel Warszawa", "Warszawa, Polska", "150.00"),
        common::listing_json(2, "City View Hotel", "Kraków, Polska", "140.00"),
    ])
}

#[tokio::test]
async fn listings_and_hotels_share_the_endpoint() {
    let app = Router::new().route("/api/listings/", get(|| async { Json(sample_listings()) }));
    let base = common::spawn(app).await;
    let client = client(&base);

    let listings = client.fetch_listings().await;
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[1].owner_username, "jan");

    let hotels = client.fetch_hotels().await;
    assert_eq!(hotels.len(), 2);
    assert_eq!(hotels[0].price(), Some(150.0));
    assert!(hotels[0].image_url.is_empty());
}

#[tokio::test]
async fn hosts_are_fetched() {
    let app = Router::new().route(
        "/api/hosts/",
        get(|| async {
            Json(json!([{
                "id": 1,
                "name": "Jan Kowalski",
                "location": "Warszawa, Polska",
                "rating": 4.8,
                "image": "https://example.com/jan.jpg"
            }]))
        }),
    );
    let base = common::spawn(app).await;

    let hosts = client(&base).fetch_hosts().await;
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].rating, 4.8);
}

#[tokio::test]
async fn server_error_yields_empty_collections() {
    let app = Router::new()
        .route("/api/listings/", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/api/hosts/", get(|| async { StatusCode::BAD_GATEWAY }));
    let base = common::spawn(app).await;
    let client = client(&base);

    assert!(client.fetch_listings().await.is_empty());
    assert!(client.fetch_hotels().await.is_empty());
    assert!(client.fetch_hosts().await.is_empty());

    let err = client.try_fetch_listings().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn malformed_body_yields_empty_collection() {
    let app = Router::new().route("/api/listings/", get(|| async { Json(json!({"oops": true})) }));
    let base = common::spawn(app).await;

    assert!(client(&base).fetch_hotels().await.is_empty());
}

#[tokio::test]
async fn slow_server_times_out_to_empty() {
    let app = Router::new().route(
        "/api/listings/",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(sample_listings())
        }),
    );
    let base = common::spawn(app).await;
    let client =
        CatalogClient::with_client(reqwest::Client::new(), &base, Duration::from_millis(100));

    assert!(client.fetch_listings().await.is_empty());
    let err = client.try_fetch_listings().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_yields_empty_collections() {
    let client = client(&common::dead_url().await);

    assert!(client.fetch_listings().await.is_empty());
    assert!(client.fetch_hosts().await.is_empty());
    let err = client.try_fetch_hosts().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}

#[derive(Clone, Default)]
struct Recorded {
    posts: Arc<AtomicUsize>,
    auth: Arc<Mutex<Option<String>>>,
}

async fn create(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    recorded.posts.fetch_add(1, Ordering::SeqCst);
    *recorded.auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if body["title"] == "Duplicate" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Listing already exists"})),
        );
    }
    let created = common::listing_json(
        10,
        body["title"].as_str().unwrap_or_default(),
        body["location"].as_str().unwrap_or_default(),
        body["price_per_night"].as_str().unwrap_or_default(),
    );
    (StatusCode::CREATED, Json(created))
}

fn new_listing(title: &str) -> NewListing {
    NewListing {
        title: title.to_string(),
        description: "Piękny domek z widokiem na morze.".to_string(),
        price_per_night: "300.00".to_string(),
        location: "Gdańsk, Polska".to_string(),
    }
}

#[tokio::test]
async fn create_listing_returns_the_created_record() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/listings/", get(|| async { Json(sample_listings()) }).post(create))
        .with_state(recorded.clone());
    let base = common::spawn(app).await;

    let session = SessionStore::in_memory();
    session.set_tokens("access-123", "refresh-456");
    let client = client(&base).with_session(session);

    let listing = client.create_listing(&new_listing("Domek nad morzem")).await.unwrap();
    assert_eq!(listing.id, 10);
    assert_eq!(listing.price(), Some(300.0));
    assert_eq!(
        recorded.auth.lock().unwrap().as_deref(),
        Some("Bearer access-123")
    );
}

#[tokio::test]
async fn create_listing_surfaces_server_rejection() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/listings/", get(|| async { Json(sample_listings()) }).post(create))
        .with_state(recorded.clone());
    let base = common::spawn(app).await;

    let err = client(&base)
        .create_listing(&new_listing("Duplicate"))
        .await
        .unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Listing already exists");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    assert!(recorded.auth.lock().unwrap().is_none());
}

#[tokio::test]
async fn create_listing_surfaces_network_failure() {
    let err = client(&common::dead_url().await)
        .create_listing(&new_listing("Domek nad morzem"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn invalid_listing_is_rejected_before_any_request() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/listings/", get(|| async { Json(sample_listings()) }).post(create))
        .with_state(recorded.clone());
    let base = common::spawn(app).await;

    let mut input = new_listing("");
    input.price_per_night = "free".to_string();
    let err = client(&base).create_listing(&input).await.unwrap_err();

    match err {
        ApiError::Validation(fields) => {
            assert!(fields.get("title").is_some());
            assert!(fields.get("price_per_night").is_some());
        }
        other => panic!("expected Validation error, got {other:?}"),
    }
    assert_eq!(recorded.posts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn view_model_reports_fetch_failure_distinctly() {
    let app = Router::new().route("/api/listings/", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let base = common::spawn(app).await;

    let view_model = SearchViewModel::<Hotel>::default();
    view_model.load_hotels(&client(&base)).await;
    assert!(matches!(view_model.view(), ViewState::FetchFailed(_)));
}

#[tokio::test]
async fn view_model_filters_fetched_hotels() {
    let app = Router::new().route("/api/listings/", get(|| async { Json(sample_listings()) }));
    let base = common::spawn(app).await;
    let client = client(&base);
    assert_eq!(client.source_name(), "api");

    let view_model = SearchViewModel::<Hotel>::default();
    view_model.load_hotels(&client).await;
    assert_eq!(
        view_model.locations(),
        vec!["Kraków, Polska".to_string(), "Warszawa, Polska".to_string()]
    );

    view_model
        .search(&SearchQuery::text("KRAK").sorted_by(SortOption::PriceAsc))
        .await;
    let shown = view_model.view();
    assert_eq!(shown.results().len(), 1);
    assert_eq!(shown.results()[0].title, "City View Hotel");
}

#[tokio::test]
async fn view_model_searches_fetched_hosts() {
    let app = Router::new().route(
        "/api/hosts/",
        get(|| async {
            Json(json!([
                {"id": 1, "name": "Jan Kowalski", "location": "Warszawa, Polska", "rating": 4.8, "image": ""},
                {"id": 2, "name": "anna Nowak", "location": "Kraków, Polska", "rating": 4.6, "image": ""},
                {"id": 3, "name": "Piotr Wiśniewski", "location": "Gdańsk, Polska", "rating": 4.9, "image": ""},
                {"id": 4, "name": "Ewa Zielińska", "location": "Kraków, Polska", "rating": 4.6, "image": ""}
            ]))
        }),
    );
    let base = common::spawn(app).await;

    let view_model = SearchViewModel::<Host>::default();
    assert!(view_model.load_hosts(&client(&base)).await);
    let names = |view: ViewState<Host>| -> Vec<String> {
        view.results().iter().map(|h| h.name.clone()).collect()
    };

    // Equal ratings keep their fetched order
    assert_eq!(
        names(view_model.view()),
        vec!["Piotr Wiśniewski", "Jan Kowalski", "anna Nowak", "Ewa Zielińska"]
    );

    view_model
        .search(&SearchQuery::text("kraków").sorted_by(SortOption::NameAsc))
        .await;
    assert_eq!(names(view_model.view()), vec!["anna Nowak", "Ewa Zielińska"]);

    view_model
        .search(&SearchQuery::default().sorted_by(SortOption::PriceDesc))
        .await;
    assert_eq!(
        names(view_model.view()),
        vec!["Jan Kowalski", "anna Nowak", "Piotr Wiśniewski", "Ewa Zielińska"]
    );
}
