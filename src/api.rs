//! REST API for the finance advisor
//!
//! Exposes simulation analysis, recommendations and the assistant over HTTP.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::advisor::Advisor;
use crate::assistant::{Intent, IntentClassifier};
use crate::error::AdvisorError;
use crate::models::{Metrics, ScenarioInput};

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub metrics: Option<Metrics>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    pub intent: Intent,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsReply {
    pub recommendations: Vec<String>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

type ApiResult = (StatusCode, Json<ApiResponse>);

fn ok<T: Serialize>(data: T) -> ApiResult {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

fn failure(err: AdvisorError) -> ApiResult {
    let status = match &err {
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        AdvisorError::AccessDenied(_) => StatusCode::FORBIDDEN,
        AdvisorError::Auth(_) | AdvisorError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        AdvisorError::Backend { .. } | AdvisorError::HttpError(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(status = %status, "Request failed: {}", err);
    (status, Json(ApiResponse::error(err.to_string())))
}

fn rejected(rejection: JsonRejection) -> ApiResult {
    warn!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(rejection.body_text())),
    )
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub advisor: Arc<dyn Advisor>,
}

/// =============================
/// Handlers
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn simulate(
    State(state): State<ApiState>,
    payload: Result<Json<ScenarioInput>, JsonRejection>,
) -> ApiResult {
    let Json(input) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected(rejection),
    };
    info!(
        months = input.projection_months,
        adjustments = input.category_adjustments.len(),
        "Received simulation request"
    );

    match state.advisor.analyze_simulation(&input).await {
        Ok(analysis) => ok(analysis),
        Err(e) => failure(e),
    }
}

async fn recommendations(
    State(state): State<ApiState>,
    payload: Result<Json<Metrics>, JsonRejection>,
) -> ApiResult {
    let Json(metrics) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected(rejection),
    };

    match state.advisor.recommendations(&metrics).await {
        Ok(recommendations) => ok(RecommendationsReply { recommendations }),
        Err(e) => failure(e),
    }
}

async fn chat(
    State(state): State<ApiState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected(rejection),
    };

    if req.message.trim().is_empty() {
        return failure(AdvisorError::InvalidInput("message must not be empty".to_string()));
    }

    let intent = IntentClassifier::classify(&req.message);
    info!(?intent, "Received chat message");

    match state.advisor.answer(&req.message, req.metrics.as_ref()).await {
        Ok(answer) => ok(ChatReply { answer, intent }),
        Err(e) => failure(e),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(advisor: Arc<dyn Advisor>) -> Router {
    let state = ApiState { advisor };

    Router::new()
        .route("/health", get(health))
        .route("/api/simulate", post(simulate))
        .route("/api/recommendations", post(recommendations))
        .route("/api/chat", post(chat))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    advisor: Arc<dyn Advisor>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(advisor);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::LocalAdvisor;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(Arc::new(LocalAdvisor::default()))
    }

    async fn post_json(path: &str, body: String) -> (StatusCode, Value) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_simulate() {
        let body = json!({
            "monthly_income": 20000.0,
            "current_expenses": 15000.0,
            "category_adjustments": {"food": -20.0},
            "category_breakdown": {"food": 5000.0},
            "projection_months": 6
        });
        let (status, value) = post_json("/api/simulate", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["tier"], "very_positive");
        assert_eq!(value["data"]["result"]["projected_total"], 36000.0);
        assert!(value["data"]["report"].as_str().unwrap().contains("EXCELLENT"));
    }

    #[tokio::test]
    async fn test_simulate_rejects_bad_horizon() {
        let body = json!({
            "monthly_income": 20000.0,
            "current_expenses": 15000.0,
            "projection_months": 0
        });
        let (status, value) = post_json("/api/simulate", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains("horizon"));
    }

    #[tokio::test]
    async fn test_simulate_rejects_zero_income() {
        let body = json!({
            "monthly_income": 0.0,
            "current_expenses": 15000.0,
            "projection_months": 3
        });
        let (status, _) = post_json("/api/simulate", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, value) = post_json("/api/simulate", "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["success"], false);
    }

    #[tokio::test]
    async fn test_recommendations() {
        let body = json!({
            "ingresos_totales": 20000.0,
            "gastos_totales": 15000.0,
            "balance": 5000.0,
            "ahorro_porcentaje": 25.0,
            "gastos_por_categoria": {"renta": 8000.0},
            "tendencia": "positiva"
        });
        let (status, value) = post_json("/api/recommendations", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"]["recommendations"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_chat() {
        let body = json!({"message": "How can I save more?"});
        let (status, value) = post_json("/api/chat", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"]["intent"], "savings");
        assert!(value["data"]["answer"].as_str().unwrap().contains("reload"));
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let (status, _) = post_json("/api/chat", json!({"message": "  "}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
