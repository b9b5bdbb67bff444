//! HTTP clients for the finance backend and auth service
//!
//! Clients are built once and passed in explicitly. Each wraps a long-lived
//! reqwest::Client for connection pooling and is cheap to clone.

mod auth;

pub use auth::{
    session_store_from_config, AuthClient, FileSessionStore, InMemorySessionStore,
    RegisterRequest, Session, SessionStore,
};

use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::models::{AccountType, Metrics, NewTransaction, Simulation, Transaction};
use crate::Result;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(8)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Pull a human-readable message out of an error body
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[derive(Deserialize)]
struct MetricsResponse {
    metricas: Metrics,
}

#[derive(Deserialize)]
struct RecommendationsResponse {
    recomendaciones: Vec<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    respuesta: String,
}

#[derive(Deserialize)]
struct SimulationResponse {
    simulacion: Simulation,
}

#[derive(Deserialize)]
struct TransactionsResponse {
    #[serde(default)]
    transacciones: Vec<Value>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    perfil: &'static str,
    usuario_id: &'a str,
    mensaje: &'a str,
}

#[derive(Serialize)]
struct SimulationRequest<'a> {
    perfil: &'static str,
    usuario_id: &'a str,
    ajustes: &'a BTreeMap<String, f64>,
    meses_proyeccion: u32,
}

/// Client for the finance backend
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl BackendClient {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        Self::with_base_url(&config.backend_base_url, config.http_timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// Attach a session; requests then carry its bearer token and subject
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Profile and subject id requests are scoped to
    fn subject(&self) -> (AccountType, String) {
        match &self.session {
            Some(session) => (session.account_type(), session.subject_id()),
            None => (AccountType::Personal, "1".to_string()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => request.bearer_auth(&session.token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        let response = self.execute(request, path).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send a request and map non-success statuses onto errors
    async fn execute(&self, request: RequestBuilder, path: &str) -> Result<reqwest::Response> {
        let response = self.authorize(request).send().await.map_err(|e| {
            error!("Backend request failed for {}: {}", path, e);
            AdvisorError::HttpError(e)
        })?;

        let status = response.status();
        debug!(path = %path, status = %status, "Backend response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or(body);

        match status {
            StatusCode::FORBIDDEN => {
                warn!(path = %path, "Backend denied access");
                Err(AdvisorError::AccessDenied(if message.is_empty() {
                    "access to this data was denied".to_string()
                } else {
                    message
                }))
            }
            StatusCode::UNAUTHORIZED => Err(AdvisorError::NotAuthenticated),
            _ => {
                error!(path = %path, status = %status, "Backend error: {}", message);
                Err(AdvisorError::Backend {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// `GET /analyze`
    pub async fn get_metrics(&self) -> Result<Metrics> {
        let (account, subject) = self.subject();
        let request = self
            .client
            .get(self.url("/analyze"))
            .query(&[("perfil", account.as_str()), ("usuario_id", subject.as_str())]);

        let body: MetricsResponse = self.send(request, "/analyze").await?;
        info!(
            perfil = %account.as_str(),
            usuario_id = %subject,
            income = body.metricas.income,
            "Metrics loaded"
        );
        Ok(body.metricas)
    }

    /// `GET /recommendations`
    pub async fn get_recommendations(&self) -> Result<Vec<String>> {
        let (account, subject) = self.subject();
        let request = self
            .client
            .get(self.url("/recommendations"))
            .query(&[("perfil", account.as_str()), ("usuario_id", subject.as_str())]);

        let body: RecommendationsResponse = self.send(request, "/recommendations").await?;
        info!(count = body.recomendaciones.len(), "Recommendations loaded");
        Ok(body.recomendaciones)
    }

    /// `POST /chat`
    pub async fn chat(&self, message: &str) -> Result<String> {
        let (account, subject) = self.subject();
        let request = self.client.post(self.url("/chat")).json(&ChatRequest {
            perfil: account.as_str(),
            usuario_id: &subject,
            mensaje: message,
        });

        let body: ChatResponse = self.send(request, "/chat").await?;
        Ok(body.respuesta)
    }

    /// `POST /simulate`
    pub async fn run_simulation(
        &self,
        adjustments: &BTreeMap<String, f64>,
        months: u32,
    ) -> Result<Simulation> {
        let (account, subject) = self.subject();
        let request = self.client.post(self.url("/simulate")).json(&SimulationRequest {
            perfil: account.as_str(),
            usuario_id: &subject,
            ajustes: adjustments,
            meses_proyeccion: months,
        });

        let body: SimulationResponse = self.send(request, "/simulate").await?;
        info!(
            months = body.simulacion.months,
            difference = body.simulacion.difference_vs_current,
            "Backend simulation completed"
        );
        Ok(body.simulacion)
    }

    /// `POST /api/transacciones`
    pub async fn add_transaction(&self, transaction: &NewTransaction) -> Result<()> {
        if self.session.is_none() {
            return Err(AdvisorError::NotAuthenticated);
        }
        let request = self.client.post(self.url("/api/transacciones")).json(transaction);
        self.execute(request, "/api/transacciones").await?;
        info!(category = %transaction.category, amount = transaction.amount, "Transaction added");
        Ok(())
    }

    /// `GET /api/transacciones`
    ///
    /// Entries missing a date, category or amount are skipped.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        if self.session.is_none() {
            return Err(AdvisorError::NotAuthenticated);
        }
        let request = self.client.get(self.url("/api/transacciones"));
        let body: TransactionsResponse = self.send(request, "/api/transacciones").await?;

        let total = body.transacciones.len();
        let transactions: Vec<Transaction> = body
            .transacciones
            .into_iter()
            .filter_map(|raw| serde_json::from_value(raw).ok())
            .collect();

        if transactions.len() < total {
            warn!(
                skipped = total - transactions.len(),
                "Skipped malformed transactions"
            );
        }
        Ok(transactions)
    }
}
