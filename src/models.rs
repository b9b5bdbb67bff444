//! Core data models for the finance advisor
//!
//! Backend-facing types keep the field names the backend emits on the wire;
//! scenario types are local and use plain snake_case.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fallback name when a breakdown has no categories at all
pub const GENERAL_EXPENSES: &str = "general expenses";

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AccountType {
    #[default]
    #[serde(rename = "personal")]
    Personal,
    #[serde(rename = "empresa")]
    Business,
}

impl AccountType {
    /// Profile name as the backend expects it in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Personal => "personal",
            AccountType::Business => "empresa",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "ingreso")]
    Income,
    #[serde(rename = "gasto")]
    Expense,
    #[serde(other)]
    Other,
}

//
// ================= Scenario =================
//

/// A proposed simulation: current figures plus per-category percent deltas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub monthly_income: f64,
    pub current_expenses: f64,
    #[serde(default)]
    pub category_adjustments: BTreeMap<String, f64>,
    #[serde(default)]
    pub category_breakdown: BTreeMap<String, f64>,
    pub projection_months: u32,
}

/// One applied adjustment, in currency terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentDetail {
    pub category: String,
    pub percent: f64,
    pub change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub monthly_income: f64,
    pub current_expenses: f64,
    pub new_expenses: f64,
    pub current_balance: f64,
    pub new_balance: f64,
    pub delta: f64,
    /// Change relative to the current balance, in percent
    pub percent_change: f64,
    pub projected_total: f64,
    pub projection_months: u32,
    /// Sorted by absolute change, largest first
    pub adjustments: Vec<AdjustmentDetail>,
}

impl ScenarioResult {
    pub fn current_savings_rate(&self) -> f64 {
        savings_rate(self.current_balance, self.monthly_income)
    }

    pub fn new_savings_rate(&self) -> f64 {
        savings_rate(self.new_balance, self.monthly_income)
    }

    pub fn has_adjustments(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

/// Balance as a percentage of income; 0 when income is not positive
pub fn savings_rate(balance: f64, income: f64) -> f64 {
    if income > 0.0 {
        balance / income * 100.0
    } else {
        0.0
    }
}

//
// ================= Backend: Metrics =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    #[serde(rename = "ingresos_totales")]
    pub income: f64,
    #[serde(rename = "gastos_totales")]
    pub expenses: f64,
    pub balance: f64,
    #[serde(rename = "ahorro_porcentaje")]
    pub savings_percent: f64,
    #[serde(rename = "gastos_por_categoria", default)]
    pub category_breakdown: BTreeMap<String, f64>,
    #[serde(rename = "tendencia", default)]
    pub trend: String,
    #[serde(
        rename = "promedio_gasto_diario",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub average_daily_spend: Option<f64>,
}

impl Metrics {
    /// Largest spending category; ties go to the alphabetically-first name
    pub fn top_category(&self) -> Option<(&str, f64)> {
        self.ranked_categories().into_iter().next()
    }

    /// Name of the largest category, or a generic label for an empty breakdown
    pub fn top_category_name(&self) -> &str {
        self.top_category()
            .map(|(name, _)| name)
            .unwrap_or(GENERAL_EXPENSES)
    }

    /// Categories ordered by amount, largest first
    pub fn ranked_categories(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .category_breakdown
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();

        // BTreeMap iteration is already name-ordered, so a stable sort keeps ties alphabetical
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Share of total spend held by `amount`, in percent
    pub fn share_of_expenses(&self, amount: f64) -> f64 {
        if self.expenses > 0.0 {
            amount / self.expenses * 100.0
        } else {
            0.0
        }
    }
}

//
// ================= Backend: Simulation =================
//

/// Server-side simulation outcome (`POST /simulate`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    #[serde(rename = "ingresos_mensuales")]
    pub monthly_income: f64,
    #[serde(rename = "gastos_actuales")]
    pub current_expenses: f64,
    #[serde(rename = "gastos_proyectados")]
    pub projected_expenses: f64,
    #[serde(rename = "balance_mensual_actual")]
    pub current_monthly_balance: f64,
    #[serde(rename = "balance_mensual_proyectado")]
    pub projected_monthly_balance: f64,
    #[serde(rename = "balance_total_proyectado")]
    pub projected_total_balance: f64,
    #[serde(rename = "diferencia_vs_actual")]
    pub difference_vs_current: f64,
    #[serde(rename = "meses")]
    pub months: u32,
    #[serde(rename = "gastos_por_categoria", default)]
    pub category_breakdown: BTreeMap<String, f64>,
}

//
// ================= Backend: Transactions =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "tipo", default)]
    pub kind: Option<TransactionKind>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// Business accounts describe entries with a concept instead
    #[serde(rename = "concepto", default)]
    pub concept: Option<String>,
}

impl Transaction {
    pub fn label(&self) -> &str {
        self.description
            .as_deref()
            .or(self.concept.as_deref())
            .unwrap_or(&self.category)
    }
}

/// Payload for `POST /api/transacciones`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "concepto", skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
}

impl NewTransaction {
    /// Build an entry, placing the text where the account type expects it
    pub fn for_account(
        account: AccountType,
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        text: impl Into<String>,
    ) -> crate::Result<Self> {
        let text = text.into();
        if !amount.is_finite() || amount <= 0.0 {
            return Err(crate::error::AdvisorError::InvalidInput(format!(
                "transaction amount must be a positive number, got {}",
                amount
            )));
        }
        if text.trim().is_empty() {
            return Err(crate::error::AdvisorError::InvalidInput(
                "transaction description is required".to_string(),
            ));
        }

        let (description, concept) = match account {
            AccountType::Personal => (Some(text), None),
            AccountType::Business => (None, Some(text)),
        };

        Ok(Self {
            date,
            category: category.into(),
            amount,
            kind,
            description,
            concept,
        })
    }
}

//
// ================= Auth =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    #[serde(rename = "tipo_cuenta")]
    pub account_type: AccountType,
    #[serde(rename = "id_usuario", default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub empresa_id: Option<String>,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccountType::Personal => "Personal",
            AccountType::Business => "Business",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(breakdown: &[(&str, f64)]) -> Metrics {
        Metrics {
            income: 20000.0,
            expenses: breakdown.iter().map(|(_, v)| v).sum(),
            balance: 5000.0,
            savings_percent: 25.0,
            category_breakdown: breakdown
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            trend: "positiva".to_string(),
            average_daily_spend: None,
        }
    }

    #[test]
    fn test_top_category_prefers_alphabetical_on_tie() {
        let m = metrics(&[("transport", 300.0), ("food", 300.0), ("fun", 100.0)]);
        assert_eq!(m.top_category(), Some(("food", 300.0)));
    }

    #[test]
    fn test_top_category_name_empty_breakdown() {
        let m = metrics(&[]);
        assert_eq!(m.top_category_name(), GENERAL_EXPENSES);
        assert_eq!(m.share_of_expenses(100.0), 0.0);
    }

    #[test]
    fn test_metrics_wire_names() {
        let json = r#"{
            "ingresos_totales": 20000.0,
            "gastos_totales": 15000.0,
            "balance": 5000.0,
            "ahorro_porcentaje": 25.0,
            "gastos_por_categoria": {"comida": 5000.0},
            "tendencia": "positiva"
        }"#;
        let m: Metrics = serde_json::from_str(json).unwrap();
        assert_eq!(m.income, 20000.0);
        assert_eq!(m.category_breakdown["comida"], 5000.0);
        assert!(m.average_daily_spend.is_none());
    }

    #[test]
    fn test_new_transaction_places_text_by_account() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let personal = NewTransaction::for_account(
            AccountType::Personal, date, "food", 120.0, TransactionKind::Expense, "groceries",
        )
        .unwrap();
        assert_eq!(personal.description.as_deref(), Some("groceries"));
        assert!(personal.concept.is_none());

        let business = NewTransaction::for_account(
            AccountType::Business, date, "payroll", 9000.0, TransactionKind::Expense, "March payroll",
        )
        .unwrap();
        let json = serde_json::to_value(&business).unwrap();
        assert_eq!(json["concepto"], "March payroll");
        assert!(json.get("descripcion").is_none());
        assert_eq!(json["tipo"], "gasto");
    }

    #[test]
    fn test_new_transaction_rejects_bad_amount() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(NewTransaction::for_account(
            AccountType::Personal, date, "food", 0.0, TransactionKind::Expense, "x",
        )
        .is_err());
        assert!(NewTransaction::for_account(
            AccountType::Personal, date, "food", 10.0, TransactionKind::Expense, "  ",
        )
        .is_err());
    }

    #[test]
    fn test_unknown_transaction_kind() {
        let json = r#"{"fecha": "2024-03-02", "categoria": "otros", "monto": 10.0, "tipo": "ajuste"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, Some(TransactionKind::Other));
        assert_eq!(tx.label(), "otros");
    }
}
