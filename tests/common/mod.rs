#![allow(dead_code)]

use axum::extract::{Multipart, Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use saxansaxo_lib::api::ApiClient;
use saxansaxo_lib::routes::Route;
use saxansaxo_lib::state::{NavBus, Session};
use saxansaxo_lib::types::TokenPair;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Barrier};

pub const PASSWORD: &str = "correct horse";
pub const FIRST_ACCESS: &str = "access-1";
pub const FRESH_ACCESS: &str = "access-2";
pub const REFRESH: &str = "refresh-1";

/// In-process stand-in for the site API, counting what it was asked.
pub struct Stub {
    pub valid_access: Mutex<String>,
    pub refresh_ok: AtomicBool,
    pub refresh_without_access: AtomicBool,
    pub admin: AtomicBool,
    pub refresh_calls: AtomicUsize,
    pub refresh_auth: Mutex<Vec<Option<String>>>,
    pub jobs_auth: Mutex<Vec<Option<String>>>,
    pub always_401_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    pub company_detail_calls: AtomicUsize,
    pub company_list_calls: AtomicUsize,
    pub profile_creates: AtomicUsize,
    pub team_uploads: Mutex<Vec<Vec<(String, usize)>>>,
    pub status_bodies: Mutex<Vec<Value>>,
    pub users_barrier: Barrier,
}

impl Default for Stub {
    fn default() -> Self {
        Self {
            valid_access: Mutex::new(FIRST_ACCESS.to_string()),
            refresh_ok: AtomicBool::new(true),
            refresh_without_access: AtomicBool::new(false),
            admin: AtomicBool::new(true),
            refresh_calls: AtomicUsize::new(0),
            refresh_auth: Mutex::new(Vec::new()),
            jobs_auth: Mutex::new(Vec::new()),
            always_401_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            company_detail_calls: AtomicUsize::new(0),
            company_list_calls: AtomicUsize::new(0),
            profile_creates: AtomicUsize::new(0),
            team_uploads: Mutex::new(Vec::new()),
            status_bodies: Mutex::new(Vec::new()),
            users_barrier: Barrier::new(2),
        }
    }
}

impl Stub {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

type Shared = State<Arc<Stub>>;

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn authorized(stub: &Stub, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", stub.valid_access.lock().unwrap());
    auth_header(headers).as_deref() == Some(expected.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "detail": "Given token not valid for any token type",
            "code": "token_not_valid"
        })),
    )
        .into_response()
}

fn me_json(stub: &Stub) -> Value {
    json!({
        "id": 1,
        "username": "amina",
        "email": "amina@example.com",
        "first_name": "Amina",
        "last_name": "Yusuf",
        "is_staff": stub.admin.load(Ordering::SeqCst),
    })
}

fn tokens() -> Value {
    json!({ "access": FIRST_ACCESS, "refresh": REFRESH })
}

async fn login(State(stub): Shared, Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "No active account found with the given credentials" })),
        )
            .into_response();
    }
    *stub.valid_access.lock().unwrap() = FIRST_ACCESS.to_string();
    Json(tokens()).into_response()
}

async fn register(State(stub): Shared, Json(body): Json<Value>) -> Response {
    stub.register_calls.fetch_add(1, Ordering::SeqCst);
    if body["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "username": ["A user with that username already exists."] })),
        )
            .into_response();
    }
    *stub.valid_access.lock().unwrap() = FIRST_ACCESS.to_string();
    (StatusCode::CREATED, Json(tokens())).into_response()
}

async fn refresh(State(stub): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.refresh_calls.fetch_add(1, Ordering::SeqCst);
    stub.refresh_auth.lock().unwrap().push(auth_header(&headers));
    if !stub.refresh_ok.load(Ordering::SeqCst) || body["refresh"] != REFRESH {
        return unauthorized();
    }
    if stub.refresh_without_access.load(Ordering::SeqCst) {
        return Json(json!({ "detail": "ok" })).into_response();
    }
    *stub.valid_access.lock().unwrap() = FRESH_ACCESS.to_string();
    Json(json!({ "access": FRESH_ACCESS })).into_response()
}

async fn me(State(stub): Shared, headers: HeaderMap) -> Response {
    if !authorized(&stub, &headers) {
        return unauthorized();
    }
    Json(me_json(&stub)).into_response()
}

async fn jobs(State(stub): Shared, headers: HeaderMap) -> Response {
    stub.jobs_auth.lock().unwrap().push(auth_header(&headers));
    Json(json!([
        { "id": 1, "title": "Backend Engineer", "job_type": "full-time", "location": "Mogadishu" },
        { "id": 2, "title": "Design Intern", "job_type": "internship", "is_active": false }
    ]))
    .into_response()
}

async fn always_401(State(stub): Shared) -> Response {
    stub.always_401_calls.fetch_add(1, Ordering::SeqCst);
    unauthorized()
}

/// Holds unauthorised callers until two have arrived, so both see the 401.
async fn users(State(stub): Shared, headers: HeaderMap) -> Response {
    if !authorized(&stub, &headers) {
        stub.users_barrier.wait().await;
        return unauthorized();
    }
    Json(json!([me_json(&stub)])).into_response()
}

async fn applications(State(stub): Shared, headers: HeaderMap) -> Response {
    if !authorized(&stub, &headers) {
        return unauthorized();
    }
    Json(json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [{
            "id": 7,
            "job": 1,
            "job_title": "Backend Engineer",
            "first_name": "Ayaan",
            "last_name": "Warsame",
            "email": "ayaan@example.com",
            "status": "reviewing"
        }]
    }))
    .into_response()
}

async fn update_status(
    State(stub): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&stub, &headers) {
        return unauthorized();
    }
    stub.status_bodies.lock().unwrap().push(body.clone());
    Json(json!({
        "message": "Application status updated successfully",
        "application": { "id": id, "job": 1, "status": body["status"] }
    }))
    .into_response()
}

async fn team_create(State(stub): Shared, headers: HeaderMap, mut multipart: Multipart) -> Response {
    let mut fields = Vec::new();
    let mut name = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or_default().to_string();
        let data = field.bytes().await.unwrap();
        if field_name == "name" {
            name = String::from_utf8_lossy(&data).into_owned();
        }
        fields.push((field_name, data.len()));
    }
    stub.team_uploads.lock().unwrap().push(fields);

    if !authorized(&stub, &headers) {
        return unauthorized();
    }
    (StatusCode::CREATED, Json(json!({ "id": 5, "name": name, "is_active": true }))).into_response()
}

async fn company_detail(State(stub): Shared) -> Response {
    stub.company_detail_calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response()
}

async fn company_list(State(stub): Shared) -> Response {
    stub.company_list_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!([{ "id": 4, "name": "Saxansaxo Technology", "email": "info@saxansaxo.com" }]))
        .into_response()
}

async fn profiles(State(stub): Shared, headers: HeaderMap) -> Response {
    if !authorized(&stub, &headers) {
        return unauthorized();
    }
    Json(json!([])).into_response()
}

async fn profile_create(State(stub): Shared, headers: HeaderMap) -> Response {
    if !authorized(&stub, &headers) {
        return unauthorized();
    }
    stub.profile_creates.fetch_add(1, Ordering::SeqCst);
    (StatusCode::CREATED, Json(json!({ "id": 9, "phone": "", "bio": "" }))).into_response()
}

async fn health() -> Response {
    Json(json!({ "status": "healthy", "message": "API is running" })).into_response()
}

/// Starts the stub on an ephemeral port and returns it with its `/api` base URL.
pub async fn start() -> (Arc<Stub>, String) {
    let stub = Arc::new(Stub::default());
    let app = Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/auth/register/", post(register))
        .route("/api/auth/refresh/", post(refresh))
        .route("/api/auth/me/", get(me))
        .route("/api/jobs/", get(jobs))
        .route("/api/always-401/", get(always_401))
        .route("/api/users/", get(users))
        .route("/api/applications/", get(applications))
        .route("/api/applications/{id}/update_status/", patch(update_status))
        .route("/api/team/", post(team_create))
        .route("/api/company/1/", get(company_detail))
        .route("/api/company/", get(company_list))
        .route("/api/profiles/", get(profiles).post(profile_create))
        .route("/api/health/", get(health))
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (stub, format!("http://{addr}/api"))
}

pub fn client(base_url: &str) -> (Arc<ApiClient>, mpsc::UnboundedReceiver<Route>) {
    let (nav, rx) = NavBus::channel();
    let client = ApiClient::new(base_url, Session::in_memory(), nav).unwrap();
    (Arc::new(client), rx)
}

/// A client whose stored access token the stub no longer accepts.
pub async fn client_with_stale_access(
    base_url: &str,
) -> (Arc<ApiClient>, mpsc::UnboundedReceiver<Route>) {
    let (client, rx) = client(base_url);
    client
        .session()
        .store_pair(&TokenPair {
            access: "expired".to_string(),
            refresh: REFRESH.to_string(),
        })
        .await
        .unwrap();
    (client, rx)
}

/// Raw HTTP server that answers every request with a 401 but hangs up on the
/// refresh endpoint without responding.
pub async fn start_hanging_up_on_refresh() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if String::from_utf8_lossy(&buf[..n]).starts_with("POST /api/auth/refresh/") {
                    return;
                }
                let body = r#"{"detail":"Given token not valid for any token type"}"#;
                let response = format!(
                    "HTTP/1.1 401 Unauthorized\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });
    format!("http://{addr}/api")
}
