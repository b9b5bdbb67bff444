//! HTTP clients against an in-process mock of the backend and auth service

use axum::{
    extract::{Json, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use finance_advisor::advisor::{Advisor, RemoteAdvisor};
use finance_advisor::client::{
    AuthClient, BackendClient, InMemorySessionStore, RegisterRequest, Session, SessionStore,
};
use finance_advisor::models::{AccountType, NewTransaction, ScenarioInput, TransactionKind, UserProfile};
use finance_advisor::{AdvisorConfig, AdvisorError, Tier};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio_test::{assert_err, assert_ok};

const GOOD_TOKEN: &str = "good-token";

type Ledger = Arc<Mutex<Vec<Value>>>;

/// Mock finance backend and auth service on one port
struct MockBackend {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    async fn start() -> Self {
        let ledger: Ledger = Arc::new(Mutex::new(vec![
            json!({"fecha": "2024-03-01", "categoria": "food", "monto": 250.0, "tipo": "gasto", "descripcion": "groceries"}),
            json!({"categoria": "broken"}),
        ]));

        let app = Router::new()
            .route("/analyze", get(handle_analyze))
            .route("/recommendations", get(handle_recommendations))
            .route("/chat", post(handle_chat))
            .route("/simulate", post(handle_simulate))
            .route("/api/transacciones", get(handle_list).post(handle_add))
            .route("/register", post(handle_register))
            .route("/login", post(handle_login))
            .route("/verificar-token", get(handle_verify))
            .route("/logout", post(handle_logout))
            .with_state(ledger);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn profile_json(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "nombre_completo": "Ana Pérez",
        "tipo_cuenta": "personal",
        "id_usuario": 7
    })
}

async fn handle_analyze(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let perfil = params.get("perfil").cloned().unwrap_or_default();
    let usuario_id = params.get("usuario_id").cloned().unwrap_or_default();

    if usuario_id == "E403" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "No access to this company"})),
        );
    }

    // The trend echoes the request scope so tests can check it
    let scope = format!("{}:{}:{}", perfil, usuario_id, bearer(&headers).unwrap_or_default());
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "metricas": {
                "ingresos_totales": 20000.0,
                "gastos_totales": 15000.0,
                "balance": 5000.0,
                "ahorro_porcentaje": 25.0,
                "gastos_por_categoria": {"food": 5000.0, "rent": 8000.0},
                "tendencia": scope,
                "promedio_gasto_diario": 500.0
            }
        })),
    )
}

async fn handle_recommendations() -> Json<Value> {
    Json(json!({"status": "success", "recomendaciones": ["a", "b", "c"]}))
}

async fn handle_chat(Json(body): Json<Value>) -> Json<Value> {
    let message = body["mensaje"].as_str().unwrap_or_default();
    Json(json!({"status": "success", "respuesta": format!("echo: {}", message)}))
}

async fn handle_simulate(Json(body): Json<Value>) -> Json<Value> {
    let food = body["ajustes"]["food"].as_f64().unwrap_or(0.0);
    let months = body["meses_proyeccion"].as_u64().unwrap_or(1) as f64;
    let projected = 15000.0 + 5000.0 * food / 100.0;
    let balance = 20000.0 - projected;

    Json(json!({
        "status": "success",
        "simulacion": {
            "ingresos_mensuales": 20000.0,
            "gastos_actuales": 15000.0,
            "gastos_proyectados": projected,
            "balance_mensual_actual": 5000.0,
            "balance_mensual_proyectado": balance,
            "balance_total_proyectado": balance * months,
            "diferencia_vs_actual": balance - 5000.0,
            "meses": months as u64,
            "gastos_por_categoria": {"food": 5000.0}
        }
    }))
}

async fn handle_list(State(ledger): State<Ledger>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if bearer(&headers).as_deref() != Some(GOOD_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "missing token"})));
    }
    let entries = ledger.lock().await.clone();
    (StatusCode::OK, Json(json!({"transacciones": entries})))
}

async fn handle_add(
    State(ledger): State<Ledger>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if bearer(&headers).as_deref() != Some(GOOD_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "missing token"})));
    }
    ledger.lock().await.push(body);
    (StatusCode::OK, Json(json!({"status": "success"})))
}

async fn handle_register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let username = body["username"].as_str().unwrap_or_default();
    if username == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "Username already exists"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"status": "success", "message": "created", "perfil": profile_json(username)})),
    )
}

async fn handle_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": "error", "message": "Wrong password"})),
        );
    }
    let username = body["username"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({"status": "success", "token": GOOD_TOKEN, "perfil": profile_json(username)})),
    )
}

async fn handle_verify(headers: HeaderMap) -> StatusCode {
    if bearer(&headers).as_deref() == Some(GOOD_TOKEN) {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    }
}

async fn handle_logout() -> Json<Value> {
    Json(json!({"status": "success"}))
}

//
// ===== Helpers =====
//

fn session(account_type: AccountType, token: &str, empresa_id: Option<&str>) -> Session {
    Session {
        token: token.to_string(),
        profile: UserProfile {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            full_name: "Ana Pérez".to_string(),
            account_type,
            user_id: Some(7),
            empresa_id: empresa_id.map(str::to_string),
        },
    }
}

fn backend(server: &MockBackend) -> BackendClient {
    BackendClient::with_base_url(&server.url(), Duration::from_secs(5)).unwrap()
}

fn auth(server: &MockBackend, store: Arc<dyn SessionStore>) -> AuthClient {
    AuthClient::with_base_url(&server.url(), Duration::from_secs(5), store).unwrap()
}

//
// ===== Backend =====
//

#[tokio::test]
async fn test_metrics_scoped_to_session() {
    let server = MockBackend::start().await;

    let anonymous = assert_ok!(backend(&server).get_metrics().await);
    assert_eq!(anonymous.trend, "personal:1:");

    let client = backend(&server).with_session(session(AccountType::Personal, GOOD_TOKEN, None));
    let metrics = assert_ok!(client.get_metrics().await);
    assert_eq!(metrics.trend, "personal:7:good-token");
    assert_eq!(metrics.income, 20000.0);
    assert_eq!(metrics.average_daily_spend, Some(500.0));
}

#[tokio::test]
async fn test_forbidden_metrics_are_access_denied() {
    let server = MockBackend::start().await;
    let client = backend(&server).with_session(session(AccountType::Business, GOOD_TOKEN, Some("E403")));

    let err = assert_err!(client.get_metrics().await);
    match err {
        AdvisorError::AccessDenied(message) => assert_eq!(message, "No access to this company"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_recommendations_and_chat() {
    let server = MockBackend::start().await;
    let client = backend(&server);

    assert_eq!(assert_ok!(client.get_recommendations().await), vec!["a", "b", "c"]);
    assert_eq!(assert_ok!(client.chat("hola").await), "echo: hola");
}

#[tokio::test]
async fn test_transactions_round_trip() {
    let server = MockBackend::start().await;
    let client = backend(&server).with_session(session(AccountType::Personal, GOOD_TOKEN, None));

    // The malformed seed entry is skipped
    let before = assert_ok!(client.list_transactions().await);
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].label(), "groceries");

    let entry = NewTransaction::for_account(
        AccountType::Personal,
        NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        "salary",
        18000.0,
        TransactionKind::Income,
        "March salary",
    )
    .unwrap();
    assert_ok!(client.add_transaction(&entry).await);

    let after = assert_ok!(client.list_transactions().await);
    assert_eq!(after.len(), 2);
    assert_eq!(after[1].kind, Some(TransactionKind::Income));
}

#[tokio::test]
async fn test_expired_token_is_not_authenticated() {
    let server = MockBackend::start().await;
    let client = backend(&server).with_session(session(AccountType::Personal, "stale", None));

    let err = assert_err!(client.list_transactions().await);
    assert!(matches!(err, AdvisorError::NotAuthenticated));
}

#[tokio::test]
async fn test_remote_advisor_classifies_backend_simulation() {
    let server = MockBackend::start().await;
    let advisor = RemoteAdvisor::new(backend(&server), &AdvisorConfig::default());

    let input = ScenarioInput {
        monthly_income: 20000.0,
        current_expenses: 15000.0,
        category_adjustments: BTreeMap::from([("food".to_string(), -20.0)]),
        category_breakdown: BTreeMap::from([("food".to_string(), 5000.0)]),
        projection_months: 12,
    };

    let analysis = assert_ok!(advisor.analyze_simulation(&input).await);
    assert_eq!(analysis.tier, Tier::VeryPositive);
    assert_eq!(analysis.result.projected_total, 72000.0);
    assert!(analysis.report.contains("12-MONTH PROJECTION: $72,000.00 MXN"));

    let too_long = ScenarioInput {
        projection_months: 500,
        ..input
    };
    let err = assert_err!(advisor.analyze_simulation(&too_long).await);
    assert!(err.is_client_error());
}

//
// ===== Auth =====
//

#[tokio::test]
async fn test_register() {
    let server = MockBackend::start().await;
    let client = auth(&server, Arc::new(InMemorySessionStore::new()));

    let request = RegisterRequest {
        username: "ana".to_string(),
        password: "secret".to_string(),
        email: "ana@example.com".to_string(),
        full_name: "Ana Pérez".to_string(),
        account_type: AccountType::Personal,
    };
    let profile = assert_ok!(client.register(&request).await);
    assert_eq!(profile.user_id, Some(7));

    let taken = RegisterRequest {
        username: "taken".to_string(),
        ..request
    };
    match assert_err!(client.register(&taken).await) {
        AdvisorError::Auth(message) => assert_eq!(message, "Username already exists"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_login_remember_and_restore() {
    let server = MockBackend::start().await;
    let store = Arc::new(InMemorySessionStore::new());
    let client = auth(&server, store.clone());

    let session = assert_ok!(client.login("ana", "secret", true).await);
    assert_eq!(session.token, GOOD_TOKEN);
    assert_eq!(session.subject_id(), "7");
    assert_eq!(assert_ok!(store.load().await), Some(session.clone()));

    let restored = assert_ok!(client.restore_session().await);
    assert_eq!(restored, Some(session.clone()));

    assert_ok!(client.logout(&session).await);
    assert!(assert_ok!(store.load().await).is_none());
}

#[tokio::test]
async fn test_login_without_remember_is_not_stored() {
    let server = MockBackend::start().await;
    let store = Arc::new(InMemorySessionStore::new());
    let client = auth(&server, store.clone());

    assert_ok!(client.login("ana", "secret", false).await);
    assert!(assert_ok!(store.load().await).is_none());
}

#[tokio::test]
async fn test_wrong_password_surfaces_server_message() {
    let server = MockBackend::start().await;
    let client = auth(&server, Arc::new(InMemorySessionStore::new()));

    match assert_err!(client.login("ana", "nope", true).await) {
        AdvisorError::Auth(message) => assert_eq!(message, "Wrong password"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_restore_discards_invalid_token() {
    let server = MockBackend::start().await;
    let store = Arc::new(InMemorySessionStore::new());
    assert_ok!(store.save(&session(AccountType::Personal, "expired", None)).await);

    let client = auth(&server, store.clone());
    assert!(assert_ok!(client.restore_session().await).is_none());
    assert!(assert_ok!(store.load().await).is_none());
}
