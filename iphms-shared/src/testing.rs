//! In-process stand-in for the vitals API used by unit tests.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{
    client::ApiClient,
    models::{User, UserRole},
    session::SessionStore,
};

pub(crate) const PASSWORD: &str = "secret";

#[derive(Debug)]
pub(crate) struct MockState {
    generation: AtomicUsize,
    access: Mutex<Option<String>>,
    refresh: Mutex<Option<String>>,
    pub refresh_calls: AtomicUsize,
    pub protected_calls: AtomicUsize,
    pub refresh_delay: Mutex<Duration>,
    pub fail_refresh: Mutex<bool>,
    pub users: Mutex<Vec<User>>,
    pub last_query: Mutex<HashMap<String, String>>,
    pub last_body: Mutex<Option<Value>>,
}

impl MockState {
    fn new() -> Self {
        Self {
            generation: AtomicUsize::new(1),
            access: Mutex::new(None),
            refresh: Mutex::new(None),
            refresh_calls: AtomicUsize::new(0),
            protected_calls: AtomicUsize::new(0),
            refresh_delay: Mutex::new(Duration::from_millis(0)),
            fail_refresh: Mutex::new(false),
            users: Mutex::new(vec![
                crate::session::tests::user(1, UserRole::User),
                crate::session::tests::user(2, UserRole::Admin),
            ]),
            last_query: Mutex::new(HashMap::new()),
            last_body: Mutex::new(None),
        }
    }

    /// Issue the current generation's token pair, as a login does.
    fn issue(&self) -> (String, String) {
        let generation = self.generation.load(Ordering::SeqCst);
        let pair = (format!("t{generation}"), format!("r{generation}"));
        *self.access.lock().unwrap() = Some(pair.0.clone());
        *self.refresh.lock().unwrap() = Some(pair.1.clone());
        pair
    }

    fn rotate(&self) -> (String, String) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.issue()
    }

    /// Make the server reject the access token it issued last.
    pub fn expire_access(&self) {
        *self.access.lock().unwrap() = None;
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn protected_count(&self) -> usize {
        self.protected_calls.load(Ordering::SeqCst)
    }

    fn bearer_matches(headers: &HeaderMap, expected: Option<&String>) -> bool {
        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));
        matches!((presented, expected), (Some(p), Some(e)) if p == e)
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        self.protected_calls.fetch_add(1, Ordering::SeqCst);
        let access = self.access.lock().unwrap().clone();
        if Self::bearer_matches(headers, access.as_ref()) {
            Ok(())
        } else {
            Err(failure(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
        }
    }
}

pub(crate) struct MockApi {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockApi {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::new());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn client(&self, session: SessionStore) -> ApiClient {
        ApiClient::new(&self.base_url, session)
    }

    /// A client whose store already holds the issued pair for `user_id`.
    pub fn signed_in_client(&self, user_id: u64) -> ApiClient {
        let (access_token, refresh_token) = self.state.issue();
        let user = self
            .state
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
            .unwrap();
        let session = SessionStore::in_memory();
        session
            .save(&crate::session::Session {
                access_token,
                refresh_token,
                user,
            })
            .unwrap();
        self.client(session)
    }
}

fn envelope(data: Value) -> Response {
    Json(json!({ "status": true, "message": "ok", "data": data })).into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "status": false, "message": message }))).into_response()
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/refresh", post(refresh))
        .route("/users", get(list_users))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/vitals", get(list_vitals).post(create_vitals))
        .route("/vitals/{id}", get(get_vitals))
        .route("/rejected", get(rejected))
        .with_state(state)
}

fn auth_payload(state: &MockState, user: &User) -> Response {
    let (access, refresh) = state.issue();
    envelope(json!({ "accessToken": access, "refreshToken": refresh, "user": user }))
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let user = state
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|user| user.email == email)
        .cloned();
    match user {
        Some(user) if body["password"] == PASSWORD => auth_payload(&state, &user),
        _ => failure(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn register(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if state.users.lock().unwrap().iter().any(|user| user.email == email) {
        return failure(StatusCode::CONFLICT, "Email already registered");
    }
    let mut users = state.users.lock().unwrap();
    let user = User {
        id: users.len() as u64 + 1,
        name: body["name"].as_str().unwrap_or_default().to_string(),
        email,
        date_of_birth: body["dateOfBirth"].as_str().unwrap_or_default().to_string(),
        device_id: body["deviceId"].as_str().unwrap_or_default().to_string(),
        role: UserRole::User,
        created_at: None,
        updated_at: None,
    };
    users.push(user.clone());
    drop(users);
    auth_payload(&state, &user)
}

async fn refresh(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let delay = *state.refresh_delay.lock().unwrap();
    tokio::time::sleep(delay).await;

    let valid = state.refresh.lock().unwrap().clone();
    if *state.fail_refresh.lock().unwrap() || !MockState::bearer_matches(&headers, valid.as_ref()) {
        return failure(StatusCode::UNAUTHORIZED, "Invalid refresh token");
    }
    let (access, refresh) = state.rotate();
    envelope(json!({ "accessToken": access, "refreshToken": refresh }))
}

async fn list_users(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }
    let users = state.users.lock().unwrap().clone();
    envelope(json!(users))
}

async fn get_user(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }
    let users = state.users.lock().unwrap();
    match users.iter().find(|user| user.id == id) {
        Some(user) => envelope(json!(user)),
        None => failure(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn update_user(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }
    *state.last_body.lock().unwrap() = Some(body.clone());
    let mut users = state.users.lock().unwrap();
    let Some(user) = users.iter_mut().find(|user| user.id == id) else {
        return failure(StatusCode::NOT_FOUND, "User not found");
    };
    if let Some(name) = body["name"].as_str() {
        user.name = name.to_string();
    }
    if let Some(email) = body["email"].as_str() {
        user.email = email.to_string();
    }
    if let Some(device_id) = body["deviceId"].as_str() {
        user.device_id = device_id.to_string();
    }
    envelope(json!(user))
}

async fn delete_user(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }
    let mut users = state.users.lock().unwrap();
    let before = users.len();
    users.retain(|user| user.id != id);
    if users.len() == before {
        return failure(StatusCode::NOT_FOUND, "User not found");
    }
    envelope(Value::Null)
}

fn reading(id: u64, user_id: u64) -> Value {
    json!({
        "ID": id,
        "temperature": 36.5 + id as f64 / 10.0,
        "humidity": 40.0 + id as f64,
        "pulseRate": 70.0 + id as f64,
        "lightIntensity": 300.0,
        "userId": user_id,
        "CreatedAt": format!("2024-03-0{}T14:0{}:00Z", id.min(9), id.min(9)),
        "UpdatedAt": format!("2024-03-0{}T14:0{}:00Z", id.min(9), id.min(9)),
    })
}

async fn list_vitals(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }
    let user_id = query
        .get("userId")
        .and_then(|id| id.parse().ok())
        .unwrap_or(1);
    *state.last_query.lock().unwrap() = query;
    envelope(json!([reading(3, user_id), reading(2, user_id), reading(1, user_id)]))
}

async fn get_vitals(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }
    match id {
        13 => failure(StatusCode::FORBIDDEN, "Access denied"),
        1..=3 => envelope(reading(id, 1)),
        _ => failure(StatusCode::NOT_FOUND, "Vitals not found"),
    }
}

async fn create_vitals(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }
    *state.last_body.lock().unwrap() = Some(body.clone());
    let mut created = reading(4, body["userId"].as_u64().unwrap_or(1));
    for key in ["temperature", "humidity", "pulseRate", "lightIntensity"] {
        created[key] = body[key].clone();
    }
    envelope(created)
}

async fn rejected(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }
    Json(json!({ "status": false, "message": "Device offline", "data": null })).into_response()
}
