#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};

pub const TEST_TOKEN: &str = "test-token";
pub const PATIENT_ID: i64 = 7;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
    pub authorization: Option<String>,
}

/// Knobs for the stub backend.
#[derive(Clone)]
pub struct StubOptions {
    pub reject_sign_in: bool,
    pub doctors: Value,
    pub appointments: Value,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            reject_sign_in: false,
            doctors: sample_doctors(),
            appointments: sample_appointments(),
        }
    }
}

#[derive(Clone)]
struct StubState {
    options: StubOptions,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    appointments: Arc<Mutex<Vec<Value>>>,
}

/// An in-process stand-in for the clinic REST API.
pub struct StubBackend {
    pub base_url: String,
    state: StubState,
}

impl StubBackend {
    pub async fn start() -> Self {
        Self::start_with(StubOptions::default()).await
    }

    pub async fn start_with(options: StubOptions) -> Self {
        let appointments = options
            .appointments
            .as_array()
            .cloned()
            .unwrap_or_default();

        let state = StubState {
            options,
            requests: Arc::new(Mutex::new(Vec::new())),
            appointments: Arc::new(Mutex::new(appointments)),
        };

        let app = Router::new()
            .route("/api/auth/signin", post(sign_in))
            .route("/api/auth/signup", post(sign_up))
            .route("/api/auth/health", get(|| async { "OK" }))
            .route("/api/doctor", get(list_doctors))
            .route("/api/patient", get(list_patients))
            .route("/api/appointment", get(list_appointments).post(create_appointment))
            .route("/api/appointment/{id}", put(update_appointment))
            .route("/api/appointment/patient/{id}", get(patient_appointments))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn find(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

/// A base URL on which nothing is listening.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

pub fn sample_doctors() -> Value {
    json!([
        {
            "id": 1,
            "firstName": "Asha",
            "lastName": "Rao",
            "specialization": "Cardiology",
            "yearsOfExperience": 12,
            "consultationFee": 800,
            "department": "Cardiology",
            "qualifications": "MBBS, MD",
            "availableDays": ["MONDAY", "WEDNESDAY"]
        },
        {
            "id": 2,
            "firstName": "Ben",
            "lastName": "Okafor",
            "specialization": null,
            "availableDays": []
        }
    ])
}

pub fn sample_appointments() -> Value {
    json!([
        {
            "id": 42,
            "patient": { "id": PATIENT_ID },
            "doctor": { "id": 1 },
            "appointmentDateTime": "2099-01-01T10:00:00",
            "reason": "Chest pain",
            "status": "SCHEDULED"
        },
        {
            "id": 43,
            "patient": { "id": PATIENT_ID },
            "doctor": { "id": 2, "firstName": "Ben", "lastName": "Okafor" },
            "appointmentDateTime": "2020-05-01T09:30:00",
            "status": "COMPLETED",
            "diagnosis": "Seasonal flu",
            "prescription": "Rest"
        }
    ])
}

async fn record(State(state): State<StubState>, req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        body: String::from_utf8_lossy(&bytes).to_string(),
        authorization: parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn authorized(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {}", TEST_TOKEN)[..])
}

async fn sign_in(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    if state.options.reject_sign_in
        || body["username"] != "patient1"
        || body["password"] != "password123"
    {
        return (StatusCode::UNAUTHORIZED, "Error: Invalid credentials").into_response();
    }

    Json(json!({
        "token": TEST_TOKEN,
        "type": "Bearer",
        "id": PATIENT_ID,
        "username": "patient1",
        "email": "patient1@clinic.test",
        "roles": ["ROLE_PATIENT"]
    }))
    .into_response()
}

async fn sign_up(Json(body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        return (StatusCode::BAD_REQUEST, "Error: Username is already taken!").into_response();
    }
    "User registered successfully!".into_response()
}

async fn list_doctors(State(state): State<StubState>, headers: axum::http::HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(state.options.doctors.clone()).into_response()
}

async fn list_patients(headers: axum::http::HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    // Patients may not list patients.
    (StatusCode::FORBIDDEN, "Forbidden").into_response()
}

async fn list_appointments(State(state): State<StubState>, headers: axum::http::HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(Value::Array(state.appointments.lock().unwrap().clone())).into_response()
}

async fn patient_appointments(
    State(state): State<StubState>,
    Path(patient_id): Path<i64>,
    headers: axum::http::HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let list: Vec<Value> = state
        .appointments
        .lock()
        .unwrap()
        .iter()
        .filter(|a| a["patient"]["id"] == patient_id)
        .cloned()
        .collect();
    Json(Value::Array(list)).into_response()
}

async fn create_appointment(
    State(state): State<StubState>,
    headers: axum::http::HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if body["doctor"]["id"] == 999 {
        return (StatusCode::BAD_REQUEST, "Invalid patient or doctor ID").into_response();
    }
    body["id"] = json!(100);
    state.appointments.lock().unwrap().push(body.clone());
    Json(body).into_response()
}

async fn update_appointment(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut appointments = state.appointments.lock().unwrap();
    match appointments.iter_mut().find(|a| a["id"] == id) {
        Some(appointment) => {
            appointment["status"] = body["status"].clone();
            Json(appointment.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
