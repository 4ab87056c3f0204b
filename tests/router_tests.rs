use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use kakeibo::SqliteLedgerStore;
use kakeibo::db::{Category, CategoryOrder, LedgerStore};
use kakeibo::router::{KakeiboState, kakeibo_router};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    food: i64,
    transport: i64,
}

async fn spawn_app() -> TestApp {
    let store = SqliteLedgerStore::in_memory()
        .await
        .expect("failed to open in-memory store");
    store
        .seed_categories(&["Food".to_string(), "Transport".to_string()])
        .await
        .expect("failed to seed categories");
    let cats: Vec<Category> = store
        .categories(CategoryOrder::Id)
        .await
        .expect("failed to list categories");

    TestApp {
        router: kakeibo_router(KakeiboState::new(store)),
        food: cats[0].id,
        transport: cats[1].id,
    }
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body was not JSON")
    }
}

impl TestApp {
    async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("request failed");
        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().expect("non-ascii location").to_string());
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        TestResponse {
            status,
            location,
            body: String::from_utf8(body.to_vec()).expect("response body was not utf-8"),
        }
    }

    async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    async fn create(&self, date: &str, category: i64, money: i64, memo: &str) {
        let resp = self
            .post_form(
                "/entries/new",
                &format!("date={date}&category={category}&money={money}&memo={memo}"),
            )
            .await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER, "{}", resp.body);
    }

    async fn entries(&self) -> Vec<Value> {
        let resp = self.get("/api/entries").await;
        assert_eq!(resp.status, StatusCode::OK);
        resp.json().as_array().cloned().expect("entries array")
    }
}

#[tokio::test]
async fn create_redirects_and_lists_entry_once() {
    let app = spawn_app().await;

    let resp = app
        .post_form(
            "/entries/new",
            &format!("date=2024-01-05&category={}&money=1000&memo=lunch", app.food),
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/entries/create_done"));

    let done = app.get("/entries/create_done").await;
    assert_eq!(done.status, StatusCode::OK);

    let entries = app.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["date"], "2024-01-05");
    assert_eq!(entries[0]["category_name"], "Food");
    assert_eq!(entries[0]["money"], 1000);
    assert_eq!(entries[0]["memo"], "lunch");

    let page = app.get("/entries").await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body.matches("lunch").count(), 1);
    assert!(page.body.contains("1,000"));
}

#[tokio::test]
async fn invalid_submission_rerenders_with_field_errors() {
    let app = spawn_app().await;

    let resp = app
        .post_form("/entries/new", "date=2024-13-01&category=&money=abc&memo=keep+me")
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Enter a valid date."));
    assert!(resp.body.contains("This field is required."));
    assert!(resp.body.contains("Enter a whole number."));
    assert!(resp.body.contains("keep me"));

    assert!(app.entries().await.is_empty());
}

#[tokio::test]
async fn out_of_range_years_are_rejected() {
    let app = spawn_app().await;

    for date in ["%2B12345-01-05", "-0001-01-05"] {
        let resp = app
            .post_form(
                "/entries/new",
                &format!("date={date}&category={}&money=1", app.food),
            )
            .await;
        assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY, "{date}");
        assert!(resp.body.contains("Enter a valid date."));
    }

    assert!(app.entries().await.is_empty());
    assert_eq!(app.get("/api/reports/trend").await.status, StatusCode::OK);
}

#[tokio::test]
async fn oversized_amounts_are_rejected() {
    let app = spawn_app().await;

    let resp = app
        .post_form(
            "/entries/new",
            &format!("date=2024-01-05&category={}&money=5000000000000000000", app.food),
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Ensure this value is less than or equal to 2147483647."));

    app.create("2024-01-05", app.food, 2147483647, "").await;
    app.create("2024-01-06", app.food, 2147483647, "").await;
    let share = app.get("/api/reports/category-share").await;
    assert_eq!(share.status, StatusCode::OK);
    assert_eq!(share.json()["total"], 4294967294i64);
}

#[tokio::test]
async fn update_replaces_old_values() {
    let app = spawn_app().await;
    app.create("2024-01-05", app.food, 1000, "lunch").await;
    let id = app.entries().await[0]["id"].as_i64().expect("id");

    let edit = app.get(&format!("/entries/{id}/edit")).await;
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.body.contains("2024-01-05"));

    let resp = app
        .post_form(
            &format!("/entries/{id}/edit"),
            &format!("date=2024-02-10&category={}&money=300&memo=bus", app.transport),
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/entries/update_done"));

    let entries = app.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], id);
    assert_eq!(entries[0]["date"], "2024-02-10");
    assert_eq!(entries[0]["category_name"], "Transport");
    assert_eq!(entries[0]["money"], 300);
    assert_eq!(entries[0]["memo"], "bus");

    let bad = app
        .post_form(&format!("/entries/{id}/edit"), "date=&category=1&money=1")
        .await;
    assert_eq!(bad.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.entries().await[0]["money"], 300);
}

#[tokio::test]
async fn deleted_entry_is_not_found() {
    let app = spawn_app().await;
    app.create("2024-01-05", app.food, 1000, "").await;
    let id = app.entries().await[0]["id"].as_i64().expect("id");

    let confirm = app.get(&format!("/entries/{id}/delete")).await;
    assert_eq!(confirm.status, StatusCode::OK);

    let resp = app.post_form(&format!("/entries/{id}/delete"), "").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/entries/delete_done"));
    assert!(app.entries().await.is_empty());

    for resp in [
        app.get(&format!("/entries/{id}/edit")).await,
        app.get(&format!("/entries/{id}/delete")).await,
        app.post_form(&format!("/entries/{id}/delete"), "").await,
        app.post_form(
            &format!("/entries/{id}/edit"),
            &format!("date=2024-01-05&category={}&money=1", app.food),
        )
        .await,
    ] {
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.json()["error"]["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn reports_match_scenario() {
    let app = spawn_app().await;
    app.create("2024-01-05", app.food, 1000, "").await;
    app.create("2024-01-20", app.food, 500, "").await;
    app.create("2024-02-10", app.transport, 300, "").await;

    let share = app.get("/api/reports/category-share").await;
    assert_eq!(share.status, StatusCode::OK);
    assert_eq!(
        share.json(),
        json!({ "total": 1800, "category_dict": { "Food": 83, "Transport": 16 } })
    );

    let trend = app.get("/api/reports/trend").await.json();
    assert_eq!(trend["x_label"], json!(["2024/01", "2024/02"]));
    assert_eq!(trend["category_list"], json!(["Transport", "Food"]));
    assert_eq!(
        trend["matrix_list"],
        json!([
            ["2024/01", "Transport", 0],
            ["2024/01", "Food", 1500],
            ["2024/02", "Transport", 300],
            ["2024/02", "Food", 0],
        ])
    );

    for page in ["/reports/category-share", "/reports/trend"] {
        let resp = app.get(page).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("new Chart("));
    }
}

#[tokio::test]
async fn empty_ledger_shares_are_zero() {
    let app = spawn_app().await;
    let share = app.get("/api/reports/category-share").await.json();
    assert_eq!(share["category_dict"], json!({ "Food": 0, "Transport": 0 }));

    let trend = app.get("/api/reports/trend").await.json();
    assert_eq!(trend["matrix_list"], json!([]));
}

#[tokio::test]
async fn list_filters_by_range_and_category() {
    let app = spawn_app().await;
    app.create("2024-01-05", app.food, 1000, "").await;
    app.create("2024-02-10", app.transport, 300, "").await;

    let resp = app.get("/api/entries?from=2024-02-01&to=2024-02-29").await;
    assert_eq!(resp.json().as_array().map(Vec::len), Some(1));

    let resp = app
        .get(&format!("/api/entries?from=&to=&category={}", app.food))
        .await;
    assert_eq!(resp.json()[0]["category_name"], "Food");

    let bad = app.get("/entries?from=last-week").await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn root_redirects_to_list() {
    let app = spawn_app().await;
    let resp = app.get("/").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/entries"));

    let health = app.get("/health").await;
    assert_eq!(health.json(), json!({ "status": "ok" }));
}
