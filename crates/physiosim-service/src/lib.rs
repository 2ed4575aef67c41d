//! HTTP request layer over the physiosim core.
//!
//! Routing is a plain function of method, path and query so it can be tested
//! without a socket; `main.rs` only adapts it to hyper.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Response, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};

use physiosim_core::legacy::{self, LegacyRequest};
use physiosim_core::{explain, AppConfig, Integrator, PhysioError, ScenarioId};

pub type HttpBody = Full<Bytes>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    fn integrator(&self) -> Integrator {
        Integrator::new(self.config.solver.clone())
    }
}

/// Routed response before it becomes an HTTP message.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: StatusCode::OK, body: Some(body) }
    }

    fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: Some(json!({ "error": message.into() })) }
    }

    fn no_content() -> Self {
        Self { status: StatusCode::NO_CONTENT, body: None }
    }

    /// Attach JSON and permissive CORS headers.
    pub fn into_http(self) -> Response<HttpBody> {
        let bytes = match &self.body {
            Some(v) => Bytes::from(v.to_string()),
            None => Bytes::new(),
        };
        let mut builder = Response::builder()
            .status(self.status)
            .header("access-control-allow-origin", "*")
            .header("access-control-allow-methods", "GET, OPTIONS")
            .header("access-control-allow-headers", "*");
        if self.body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        match builder.body(Full::from(bytes)) {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("failed to build response: {e}");
                let mut resp = Response::new(Full::from(Bytes::new()));
                *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                resp
            }
        }
    }
}

fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// `scenario` wins over the `event` alias; absent means baseline.
fn scenario_param(params: &HashMap<String, String>) -> ScenarioId {
    params
        .get("scenario")
        .or_else(|| params.get("event"))
        .map(|s| ScenarioId::from_name(s))
        .unwrap_or_default()
}

fn core_failure(e: PhysioError) -> ApiResponse {
    log::error!("simulation failed: {e}");
    ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub fn route(state: &AppState, method: &Method, path: &str, query: Option<&str>) -> ApiResponse {
    if *method == Method::OPTIONS {
        return ApiResponse::no_content();
    }
    let known = matches!(path, "/simulate" | "/explain" | "/legacy/simulate" | "/health");
    if !known {
        return ApiResponse::error(StatusCode::NOT_FOUND, format!("no route for {path}"));
    }
    if *method != Method::GET {
        return ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, format!("{method} not allowed"));
    }

    let params = parse_query(query);
    match path {
        "/simulate" => handle_simulate(state, scenario_param(&params)),
        "/explain" => handle_explain(state, scenario_param(&params)),
        "/legacy/simulate" => handle_legacy(state, &params),
        _ => ApiResponse::ok(json!({ "status": "ok" })),
    }
}

fn handle_simulate(state: &AppState, scenario: ScenarioId) -> ApiResponse {
    match state.integrator().report(scenario) {
        Ok(report) => json_or_500(&report),
        Err(e) => core_failure(e),
    }
}

fn handle_explain(state: &AppState, scenario: ScenarioId) -> ApiResponse {
    match state
        .integrator()
        .simulate(scenario)
        .and_then(|r| explain(scenario, &r))
    {
        Ok(explanation) => ApiResponse::ok(json!({ "scenario": scenario, "explanation": explanation })),
        Err(e) => core_failure(e),
    }
}

fn handle_legacy(state: &AppState, params: &HashMap<String, String>) -> ApiResponse {
    let samples = match params.get("samples").map(|s| s.parse::<usize>()).transpose() {
        Ok(v) => v,
        Err(e) => return ApiResponse::error(StatusCode::BAD_REQUEST, format!("samples: {e}")),
    };
    let seed = match params.get("seed").map(|s| s.parse::<u64>()).transpose() {
        Ok(v) => v,
        Err(e) => return ApiResponse::error(StatusCode::BAD_REQUEST, format!("seed: {e}")),
    };
    let req = LegacyRequest {
        event: params.get("event").or_else(|| params.get("scenario")).cloned(),
        samples,
        seed,
    };
    match legacy::generate(&req, &state.config.legacy) {
        Ok(series) => json_or_500(&series),
        Err(e) => ApiResponse::error(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

fn json_or_500<T: Serialize>(value: &T) -> ApiResponse {
    match serde_json::to_value(value) {
        Ok(v) => ApiResponse::ok(v),
        Err(e) => ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
