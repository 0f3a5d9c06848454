//! End-to-end tests for the dashboard routes.
//!
//! Each test starts the service and a fake inventory backend on ephemeral
//! ports and drives them over HTTP. No external services are required.
//!
//! Run with: `cargo test --test dashboard_flow_test`

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderMap, StatusCode as AxumStatus},
    routing::{get, MethodRouter},
    Json, Router,
};
use proddash::config::AppConfig;
use proddash::services::upstream::UpstreamClient;
use proddash::AppState;
use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Barrier;

const JWT_SECRET: &str = "test-jwt-secret-for-integration-tests-only";

/// Serve `app` on a random local port and return its base URL.
async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

/// Fake backend route: demands a Bearer token and returns canned JSON.
fn feed(body: Value) -> MethodRouter {
    get(move |headers: HeaderMap| async move {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|t| !t.is_empty());
        if authorized {
            (AxumStatus::OK, Json(body))
        } else {
            (AxumStatus::UNAUTHORIZED, Json(json!({"message": "no token"})))
        }
    })
}

fn fake_backend(ingredients: Value, recipes: Value, production: Value) -> Router {
    Router::new()
        .route("/ingredients", feed(ingredients))
        .route("/recipes", feed(recipes))
        .route("/production", feed(production))
}

/// Fake backend route that answers only once all three feeds are waiting.
fn rendezvous_feed(barrier: Arc<Barrier>, body: Value) -> MethodRouter {
    get(move || async move {
        barrier.wait().await;
        Json(body)
    })
}

fn test_config(upstream_url: &str) -> AppConfig {
    AppConfig {
        upstream_api_url: upstream_url.to_string(),
        upstream_timeout_secs: 5,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: JWT_SECRET.to_string(),
        login_path: "/login".to_string(),
        frontend_url: "http://localhost:5173".to_string(),
    }
}

async fn start_service(upstream_url: &str) -> String {
    let config = test_config(upstream_url);
    let upstream = UpstreamClient::from_config(&config).expect("upstream client");
    spawn(proddash::routes::router(AppState { config, upstream })).await
}

fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("client")
}

fn token() -> String {
    proddash::services::auth::issue_token("baker", "u1", "supervisor", JWT_SECRET, 900)
        .expect("token")
}

fn sample_ingredients() -> Value {
    json!([
        {"_id": "i1", "name": "Sugar", "unit": "kg", "stock": 9, "threshold": 10},
        {"_id": "i2", "name": "Cream", "unit": "l", "stock": 2, "threshold": 10},
        {"_id": "i3", "name": "Cocoa", "unit": "kg", "stock": 50, "threshold": 10},
        {"_id": "i4", "name": "Vanilla", "unit": "g", "stock": 5, "threshold": 10},
        {"_id": "i5", "name": "Milk", "unit": "l", "stock": 7, "threshold": 10}
    ])
}

fn sample_recipes() -> Value {
    json!([
        {"_id": "r1", "name": "A", "ingredients": [{"ingredientId": "i1", "quantity": 1}]},
        {"_id": "r2", "name": "B", "ingredients": []}
    ])
}

fn sample_production() -> Value {
    json!([
        {"_id": "p1", "date": "2024-03-01", "recipeId": "r1", "quantity": 5, "supervisor": "u1"},
        {"_id": "p2", "date": "2024-03-02", "recipeId": "r1", "quantity": 3, "supervisor": "u1"},
        {"_id": "p3", "date": "2024-03-02", "recipeId": "r2", "quantity": 0, "supervisor": "u1"}
    ])
}

async fn get_view(base: &str, token: &str) -> Value {
    let response = client()
        .get(format!("{base}/api/v1/dashboard"))
        .bearer_auth(token)
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("json");
    body["data"].clone()
}

#[tokio::test]
async fn page_without_session_redirects_to_login() {
    let backend = spawn(fake_backend(json!([]), json!([]), json!([]))).await;
    let base = start_service(&backend).await;

    let response = client()
        .get(format!("{base}/dashboard"))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
    assert!(response.text().await.expect("body").is_empty());
}

#[tokio::test]
async fn page_with_invalid_token_redirects_to_login() {
    let backend = spawn(fake_backend(json!([]), json!([]), json!([]))).await;
    let base = start_service(&backend).await;

    let response = client()
        .get(format!("{base}/dashboard"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn api_without_session_is_unauthorized() {
    let backend = spawn(fake_backend(json!([]), json!([]), json!([]))).await;
    let base = start_service(&backend).await;

    let response = client()
        .get(format!("{base}/api/v1/dashboard"))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn full_dashboard_view() {
    let backend =
        spawn(fake_backend(sample_ingredients(), sample_recipes(), sample_production())).await;
    let base = start_service(&backend).await;

    let view = get_view(&base, &token()).await;

    let alerts: Vec<&str> = view["low_stock"]["alerts"]
        .as_array()
        .expect("alerts")
        .iter()
        .map(|a| a["name"].as_str().expect("name"))
        .collect();
    assert_eq!(alerts, ["Cream", "Vanilla", "Milk"]);
    assert!(view["low_stock"]["empty_message"].is_null());

    assert_eq!(
        view["production"]["series"],
        json!([{"name": "A", "production": 8.0}])
    );

    assert_eq!(view["summary"]["ingredient_count"], 5);
    assert_eq!(view["summary"]["low_stock_count"], 4);
    assert_eq!(view["summary"]["recipe_count"], 2);
    assert_eq!(view["summary"]["production_log_count"], 3);
    assert_eq!(view["recipes"][0]["ingredient_count"], 1);
    assert_eq!(view["navigation"][2]["route"], "/ordering");
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let backend =
        spawn(fake_backend(sample_ingredients(), sample_recipes(), sample_production())).await;
    let base = start_service(&backend).await;

    let response = client()
        .get(format!("{base}/dashboard"))
        .header("cookie", format!("session={}", token()))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["data"]["summary"]["recipe_count"], 2);
}

#[tokio::test]
async fn malformed_ingredients_feed_degrades_to_empty() {
    let backend = spawn(fake_backend(
        json!({"error": "database unavailable"}),
        sample_recipes(),
        sample_production(),
    ))
    .await;
    let base = start_service(&backend).await;

    let view = get_view(&base, &token()).await;

    assert_eq!(view["low_stock"]["alerts"], json!([]));
    assert_eq!(
        view["low_stock"]["empty_message"],
        "No ingredients below threshold"
    );
    assert_eq!(view["summary"]["ingredient_count"], 0);
    assert_eq!(view["summary"]["recipe_count"], 2);
    assert_eq!(view["production"]["series"][0]["production"], 8.0);
}

#[tokio::test]
async fn failed_recipes_feed_leaves_other_feeds_intact() {
    let backend = Router::new()
        .route("/ingredients", get(|| async { Json(sample_ingredients()) }))
        .route(
            "/recipes",
            get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/production", get(|| async { Json(sample_production()) }));
    let backend = spawn(backend).await;
    let base = start_service(&backend).await;

    let view = get_view(&base, &token()).await;

    assert_eq!(view["summary"]["recipe_count"], 0);
    assert_eq!(view["summary"]["ingredient_count"], 5);
    assert_eq!(view["summary"]["production_log_count"], 3);
    assert_eq!(view["production"]["series"], json!([]));
    assert_eq!(view["production"]["empty_message"], "No production data yet");
}

#[tokio::test]
async fn unreachable_backend_renders_empty_dashboard() {
    let base = start_service("http://127.0.0.1:1").await;

    let view = get_view(&base, &token()).await;

    assert_eq!(view["summary"]["ingredient_count"], 0);
    assert_eq!(view["summary"]["recipe_count"], 0);
    assert_eq!(view["production"]["empty_message"], "No production data yet");
    assert_eq!(
        view["low_stock"]["empty_message"],
        "No ingredients below threshold"
    );
}

#[tokio::test]
async fn liveness_probe() {
    let base = start_service("http://127.0.0.1:1").await;

    let response = client()
        .get(format!("{base}/health/live"))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.expect("body"), "OK");
}

#[tokio::test]
async fn readiness_reports_unreachable_backend() {
    let base = start_service("http://127.0.0.1:1").await;

    let body: Value = client()
        .get(format!("{base}/health/ready"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");

    assert_eq!(body["data"]["status"], "ok");
    assert!(body["data"]["upstream"]
        .as_str()
        .expect("upstream")
        .starts_with("error:"));
}

#[tokio::test]
async fn feeds_are_requested_concurrently() {
    let barrier = Arc::new(Barrier::new(3));
    let backend = Router::new()
        .route(
            "/ingredients",
            rendezvous_feed(barrier.clone(), sample_ingredients()),
        )
        .route("/recipes", rendezvous_feed(barrier.clone(), sample_recipes()))
        .route("/production", rendezvous_feed(barrier, sample_production()));
    let backend = spawn(backend).await;
    let base = start_service(&backend).await;

    // Sequential fetches would park the first feed on the barrier forever.
    let view = tokio::time::timeout(Duration::from_secs(3), get_view(&base, &token()))
        .await
        .expect("feeds were not in flight together");

    assert_eq!(view["summary"]["ingredient_count"], 5);
    assert_eq!(view["summary"]["recipe_count"], 2);
    assert_eq!(view["production"]["series"][0]["production"], 8.0);
}
