use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use nambi::NambiError;
use nambi::api::GenerativeModel;
use nambi::config::ChatConfig;
use nambi::content::ContentCache;
use nambi::db::ItineraryStorage;
use nambi::router::{NambiState, nambi_router};
use nambi::service::ChatService;

struct FakeModel {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    fn new(reply: Result<&str, &str>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.map(str::to_string).map_err(str::to_string),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String, NambiError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        self.reply.clone().map_err(NambiError::UpstreamModel)
    }
}

struct TestApp {
    router: Router,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

async fn spawn_app(content: &str, model: Arc<FakeModel>) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "nambi-api-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", db_path.display());
    let storage = ItineraryStorage::connect(&database_url)
        .await
        .expect("failed to open test database");

    let chat = Arc::new(ChatService::new(
        Arc::new(ContentCache::preloaded(content)),
        model,
        None,
        ChatConfig::default(),
    ));
    let router = nambi_router(NambiState::new(chat, storage));
    TestApp { router, db_path }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let resp = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not JSON")
    };
    (status, value)
}

fn kampala_trip() -> Value {
    json!({
        "title": "3 Days in Kampala",
        "days": 3,
        "budget": 500,
        "places": "Kampala, Entebbe",
        "accommodation": "Hotel Africana",
        "transport": "Private car",
        "details": "Day 1: City tour...",
        "package_name": "Silver"
    })
}

#[tokio::test]
async fn chat_hello_returns_welcome_without_model_call() {
    let model = FakeModel::new(Ok("unused"));
    let app = spawn_app("Kampala is the capital.", model.clone()).await;

    let (status, body) = send(&app, "POST", "/api/chat", Some(json!({"question": "hello"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["answer"].as_str().unwrap().contains("Nambi"));
    assert!(!body["suggested_questions"].as_array().unwrap().is_empty());
    assert_eq!(body["show_booking_prompt"], json!(false));
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn chat_booking_intent_prompts_for_booking() {
    let model = FakeModel::new(Ok("unused"));
    let app = spawn_app("Kampala is the capital.", model.clone()).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/chat",
        Some(json!({"question": "I want to book", "session_id": "abc"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["show_booking_prompt"], json!(true));
    assert_eq!(body["booking_buttons"].as_array().unwrap().len(), 1);
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn chat_question_is_grounded_in_cached_content() {
    let model = FakeModel::new(Ok("Kampala is the capital of Uganda."));
    let app = spawn_app("Kampala is the capital.", model.clone()).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/chat",
        Some(json!({"question": "What is the capital of Uganda?", "is_first_message": false})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], json!("Kampala is the capital of Uganda."));
    for field in [
        "suggested_questions",
        "action_buttons",
        "booking_buttons",
        "images",
        "quick_replies",
    ] {
        assert_eq!(body[field], json!([]), "{field}");
    }

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Kampala is the capital."));
    assert!(prompts[0].contains("What is the capital of Uganda?"));
}

#[tokio::test]
async fn chat_without_content_is_503() {
    let model = FakeModel::new(Ok("unused"));
    let app = spawn_app("", model.clone()).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/chat",
        Some(json!({"question": "Where is Jinja?"})),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn chat_model_failure_is_500_with_details() {
    let model = FakeModel::new(Err("429 RESOURCE_EXHAUSTED: quota exceeded"));
    let app = spawn_app("Kampala is the capital.", model).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/chat",
        Some(json!({"question": "Tell me about Entebbe"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Failed to generate response try again later"));
    assert!(body["details"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn chat_without_question_is_400() {
    let app = spawn_app("Kampala is the capital.", FakeModel::new(Ok("unused"))).await;

    let (status, body) = send(&app, "POST", "/api/chat", Some(json!({"session_id": "x"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Question is required"));
}

#[tokio::test]
async fn debug_content_reports_cache() {
    let app = spawn_app("Welcome to Uganda. Kampala is the capital.", FakeModel::new(Ok(""))).await;

    let (status, body) = send(&app, "GET", "/api/debug/content", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cache_loaded"], json!(true));
    assert_eq!(body["content_length"], json!(42));
    assert_eq!(body["keywords"]["Kampala"], json!(true));
    assert_eq!(body["keywords"]["booking"], json!(false));
    assert_eq!(
        body["content_preview"],
        json!("Welcome to Uganda. Kampala is the capital.")
    );
    assert_eq!(body["url_count"], json!(0));
}

#[tokio::test]
async fn create_without_days_is_400() {
    let app = spawn_app("", FakeModel::new(Ok(""))).await;
    let mut trip = kampala_trip();
    trip.as_object_mut().unwrap().remove("days");

    let (status, body) = send(&app, "POST", "/api/admin/itineraries/", Some(trip)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missing_fields"], json!(["days"]));
}

#[tokio::test]
async fn create_with_empty_body_lists_every_required_field() {
    let app = spawn_app("", FakeModel::new(Ok(""))).await;

    let (status, body) = send(&app, "POST", "/api/admin/itineraries/", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["missing_fields"],
        json!([
            "title",
            "days",
            "places",
            "accommodation",
            "transport",
            "details",
            "package_name"
        ])
    );
}

#[tokio::test]
async fn itinerary_crud_lifecycle() {
    let app = spawn_app("", FakeModel::new(Ok(""))).await;

    let (status, created) =
        send(&app, "POST", "/api/admin/itineraries/", Some(kampala_trip())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], json!("Itinerary created successfully"));
    let id = created["id"].as_i64().expect("id missing");
    let uri = format!("/api/admin/itineraries/{id}");

    let (status, before) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["title"], json!("3 Days in Kampala"));
    assert_eq!(before["days"], json!(3));
    assert_eq!(before["budget"], json!("500"));
    assert_eq!(before["package_name"], json!("Silver"));
    assert!(before["created_at"].is_string());

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"title": "New"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = send(&app, "GET", &uri, None).await;
    assert_eq!(after["title"], json!("New"));
    let mut expected = before.clone();
    expected["title"] = json!("New");
    assert_eq!(after, expected);

    let (status, deleted) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], json!("Itinerary deleted successfully"));

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = spawn_app("", FakeModel::new(Ok(""))).await;

    let mut ids = Vec::new();
    for title in ["first", "second", "third"] {
        let mut trip = kampala_trip();
        trip["title"] = json!(title);
        let (_, created) = send(&app, "POST", "/api/admin/itineraries", Some(trip)).await;
        ids.push(created["id"].as_i64().unwrap());
    }

    let (status, list) = send(&app, "GET", "/api/admin/itineraries/", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn unknown_ids_are_404() {
    let app = spawn_app("", FakeModel::new(Ok(""))).await;

    let (get_status, body) = send(&app, "GET", "/api/admin/itineraries/999", None).await;
    let (put_status, _) = send(
        &app,
        "PUT",
        "/api/admin/itineraries/999",
        Some(json!({"title": "x"})),
    )
    .await;
    let (delete_status, _) = send(&app, "DELETE", "/api/admin/itineraries/999", None).await;

    assert_eq!(get_status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Itinerary 999 not found"));
    assert_eq!(put_status, StatusCode::NOT_FOUND);
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_json_404() {
    let app = spawn_app("", FakeModel::new(Ok(""))).await;

    let (get_status, body) = send(&app, "GET", "/api/admin/itineraries/abc", None).await;
    let (delete_status, _) = send(&app, "DELETE", "/api/admin/itineraries/abc", None).await;

    assert_eq!(get_status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Itinerary not found"));
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_chat_body_is_413() {
    let model = FakeModel::new(Ok("unused"));
    let app = spawn_app("Uganda", model.clone()).await;
    let question = "a".repeat(3 * 1024 * 1024);

    let (status, body) = send(&app, "POST", "/api/chat", Some(json!({ "question": question }))).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
    assert!(model.prompts().is_empty());
}
