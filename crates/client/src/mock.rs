//! In-process stand-in for the remote payments service, shared by the tests
//! of this crate and, through the `mock` feature, by dependent crates.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use parking_lot::Mutex;
use poem::{
    get, handler,
    http::{HeaderMap, StatusCode},
    listener::TcpListener,
    post,
    web::{Data, Json, Path},
    EndpointExt, Response, Route, Server,
};
use serde_json::{json, Value};

const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

/// How the stand-in answers.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// State reported for every created payment.
    pub payment_state: String,
    /// `expires_in` of issued access tokens, in seconds.
    pub expires_in: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            payment_state: "approved".to_string(),
            expires_in: 32400,
        }
    }
}

#[derive(Default)]
struct State {
    config: MockConfig,
    token_requests: AtomicUsize,
    authorizations: Mutex<Vec<String>>,
    request_ids: Mutex<Vec<String>>,
    payments: Mutex<HashMap<String, Value>>,
}

impl State {
    fn record(&self, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        self.authorizations.lock().push(header("authorization"));
        self.request_ids.lock().push(header("paypal-request-id"));
    }
}

pub struct MockService {
    url: String,
    state: Arc<State>,
}

impl MockService {
    pub async fn start() -> Self {
        Self::start_with(MockConfig::default()).await
    }

    pub async fn start_with(config: MockConfig) -> Self {
        let state = Arc::new(State {
            config,
            ..State::default()
        });
        let app = Route::new()
            .at("/v1/oauth2/token", post(token))
            .at("/v1/payments/payment", post(create_payment))
            .at(
                "/v1/payments/payment/:id",
                get(get_payment).patch(patch_payment),
            )
            .data(state.clone());

        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("free loopback port");
        tokio::spawn(Server::new(TcpListener::bind(addr.to_string())).run(app));
        for _ in 0..100 {
            if tokio::net::TcpStream::connect(addr).await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token_requests(&self) -> usize {
        self.state.token_requests.load(Ordering::SeqCst)
    }

    pub fn authorizations(&self) -> Vec<String> {
        self.state.authorizations.lock().clone()
    }

    pub fn request_ids(&self) -> Vec<String> {
        self.state.request_ids.lock().clone()
    }
}

fn json_response(status: StatusCode, value: &Value) -> Response {
    Response::builder()
        .status(status)
        .content_type("application/json")
        .body(value.to_string())
}

fn error_response(status: StatusCode, name: &str, message: &str) -> Response {
    json_response(status, &json!({ "name": name, "message": message }))
}

#[handler]
fn token(state: Data<&Arc<State>>, headers: &HeaderMap, body: String) -> Response {
    state.token_requests.fetch_add(1, Ordering::SeqCst);

    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    if authorization != Some(BASIC_AUTH) {
        return json_response(
            StatusCode::UNAUTHORIZED,
            &json!({
                "error": "invalid_client",
                "error_description": "Client Authentication failed"
            }),
        );
    }
    if body != "grant_type=client_credentials" {
        return json_response(
            StatusCode::BAD_REQUEST,
            &json!({ "error": "unsupported_grant_type" }),
        );
    }

    json_response(
        StatusCode::OK,
        &json!({
            "access_token": "mock-token",
            "token_type": "Bearer",
            "expires_in": state.config.expires_in
        }),
    )
}

#[handler]
fn create_payment(
    state: Data<&Arc<State>>,
    headers: &HeaderMap,
    body: Json<Value>,
) -> Response {
    state.record(headers);

    let mut payment = body.0;
    if payment.get("payer").is_none() {
        return json_response(
            StatusCode::BAD_REQUEST,
            &json!({
                "name": "VALIDATION_ERROR",
                "message": "Invalid request - see details",
                "details": [{
                    "field": "payer",
                    "issue": "This field required when creating a payment"
                }]
            }),
        );
    }

    let mut payments = state.payments.lock();
    let id = format!("PAY-{}", payments.len() + 1);
    payment["id"] = json!(id);
    payment["state"] = json!(state.config.payment_state);
    payment["create_time"] = json!("2014-03-12T05:25:42Z");
    payments.insert(id, payment.clone());
    json_response(StatusCode::CREATED, &payment)
}

#[handler]
fn get_payment(state: Data<&Arc<State>>, headers: &HeaderMap, id: Path<String>) -> Response {
    state.record(headers);

    match state.payments.lock().get(&id.0) {
        Some(payment) => json_response(StatusCode::OK, payment),
        None => error_response(
            StatusCode::NOT_FOUND,
            "INVALID_RESOURCE_ID",
            "Requested resource ID was not found.",
        ),
    }
}

#[handler]
fn patch_payment(
    state: Data<&Arc<State>>,
    headers: &HeaderMap,
    id: Path<String>,
    patches: Json<Vec<Value>>,
) -> Response {
    state.record(headers);

    let mut payments = state.payments.lock();
    let payment = match payments.get_mut(&id.0) {
        Some(payment) => payment,
        None => {
            return error_response(
                StatusCode::NOT_FOUND,
                "INVALID_RESOURCE_ID",
                "Requested resource ID was not found.",
            )
        }
    };

    let mut updated = payment.clone();
    for patch in &patches.0 {
        let op = patch["op"].as_str().unwrap_or_default();
        if op != "replace" {
            return error_response(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                &format!("Unsupported patch operation: {}", op),
            );
        }
        let path = patch["path"].as_str().unwrap_or_default();
        match updated.pointer_mut(path) {
            Some(target) => *target = patch["value"].clone(),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    &format!("Invalid path: {}", path),
                )
            }
        }
    }

    *payment = updated;
    json_response(StatusCode::OK, payment)
}
