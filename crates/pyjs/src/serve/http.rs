//! HTTP server for the translator.
//!
//! Endpoints:
//! - `POST /transpile` - translate `{"python_code": "..."}`
//! - `GET /examples` - built-in examples with their translations
//! - `GET /healthz` - liveness probe

use crate::catalog::{self, RenderedExample};
use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use pyjs_translate::{TranslateOptions, Transpiler};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Shared server state. Holds options only; every request builds its own
/// [`Transpiler`].
#[derive(Debug, Clone, Default)]
struct AppState {
    options: TranslateOptions,
}

impl AppState {
    fn transpiler(&self) -> Transpiler {
        Transpiler::new(self.options)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranspileRequest {
    #[serde(default)]
    pub python_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspileResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranspileResponse {
    fn ok(js_code: String) -> Self {
        Self {
            success: true,
            js_code: Some(js_code),
            error: None,
        }
    }

    fn err(message: &str) -> Self {
        Self {
            success: false,
            js_code: None,
            error: Some(message.to_string()),
        }
    }
}

/// Build the application router.
pub fn build_app(options: TranslateOptions) -> Router {
    Router::new()
        .route("/transpile", post(transpile))
        .route("/examples", get(examples))
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn(log_request))
        .with_state(AppState { options })
}

async fn transpile(
    State(state): State<AppState>,
    Json(request): Json<TranspileRequest>,
) -> (StatusCode, Json<TranspileResponse>) {
    if request.python_code.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(TranspileResponse::err("Python code must not be empty")),
        );
    }

    let js_code = state.transpiler().transpile(&request.python_code);
    (StatusCode::OK, Json(TranspileResponse::ok(js_code)))
}

async fn examples(State(state): State<AppState>) -> Json<Vec<RenderedExample>> {
    Json(catalog::render_all(&state.transpiler()))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "request"
    );
    response
}

/// Bind and serve until the process is stopped.
pub async fn run_http_server(host: &str, port: u16, options: TranslateOptions) -> i32 {
    let addr = format!("{host}:{port}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            return 1;
        }
    };

    match listener.local_addr() {
        Ok(local) => info!("listening on http://{local}"),
        Err(e) => tracing::warn!(error = %e, "could not read local address"),
    }

    if let Err(e) = axum::serve(listener, build_app(options)).await {
        eprintln!("Server error: {e}");
        return 1;
    }
    0
}
