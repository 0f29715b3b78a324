// Ledger service - validation, delegation, aggregation
//
// The only component with domain logic. Transports hand it raw add payloads
// and ids; it validates everything before touching the store, and computes
// the running totals from a single snapshot on every listing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LedgerError;
use crate::ledger::{
    CategoryPolicy, LedgerSummary, Transaction, TransactionType, CATEGORIES,
};
use crate::store::LedgerStore;

// ============================================================================
// ADD PAYLOAD
// ============================================================================

/// Raw add request, before validation.
///
/// Every field is optional on purpose: a missing `tipo` must surface as a
/// ledger-level MissingField rejection, not a transport deserialization
/// failure. `monto` stays a raw JSON value because the original API accepted
/// both numbers and numeric strings (`float(data['monto'])`).
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "tipo")]
    pub kind: Option<String>,

    #[serde(rename = "categoria")]
    pub category: Option<String>,

    #[serde(rename = "monto")]
    pub amount: Option<Value>,

    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

// ============================================================================
// LEDGER VIEW
// ============================================================================

/// Listing response: one snapshot of the ledger plus its aggregates and the
/// published category set. The aggregates are computed from the same
/// snapshot as `transactions`, so they are always internally consistent.
#[derive(Debug, Serialize)]
pub struct LedgerView {
    #[serde(rename = "transacciones")]
    pub transactions: Vec<Transaction>,

    #[serde(rename = "saldo")]
    pub balance: f64,

    #[serde(rename = "total_ingresos")]
    pub total_income: f64,

    #[serde(rename = "total_gastos")]
    pub total_expense: f64,

    #[serde(rename = "categorias")]
    pub categories: Vec<&'static str>,
}

// ============================================================================
// LEDGER SERVICE
// ============================================================================

pub struct LedgerService {
    store: LedgerStore,
    policy: CategoryPolicy,
}

impl LedgerService {
    /// Service over an injected store, with the default permissive category
    /// policy (any non-empty category string is accepted).
    pub fn new(store: LedgerStore) -> Self {
        Self::with_policy(store, CategoryPolicy::default())
    }

    pub fn with_policy(store: LedgerStore, policy: CategoryPolicy) -> Self {
        LedgerService { store, policy }
    }

    /// Validate an add payload and persist it.
    ///
    /// All validation happens before the store is touched; a rejected
    /// payload never causes a partial write.
    pub fn add(&self, input: NewTransaction) -> Result<Transaction, LedgerError> {
        let kind_raw = input.kind.ok_or(LedgerError::MissingField("tipo"))?;
        let kind =
            TransactionType::parse(&kind_raw).ok_or(LedgerError::InvalidType(kind_raw))?;

        let category = input
            .category
            .ok_or(LedgerError::MissingField("categoria"))?;
        if category.trim().is_empty() {
            return Err(LedgerError::MissingField("categoria"));
        }
        if !self.policy.allows(&category) {
            return Err(LedgerError::UnknownCategory(category));
        }

        let amount = coerce_amount(&input.amount.ok_or(LedgerError::MissingField("monto"))?)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let description = input.description.unwrap_or_default();

        self.store.insert(kind, &category, amount, &description)
    }

    /// One snapshot of the ledger with its aggregates and the category set.
    pub fn list_with_summary(&self) -> Result<LedgerView, LedgerError> {
        let transactions = self.store.list_all()?;
        let summary = LedgerSummary::compute(&transactions);

        Ok(LedgerView {
            transactions,
            balance: summary.balance,
            total_income: summary.total_income,
            total_expense: summary.total_expense,
            categories: CATEGORIES.to_vec(),
        })
    }

    /// Remove a record by id. `Ok(false)` means the id was not present,
    /// which is an expected outcome, not an error; transports map it to
    /// their own not-found response.
    pub fn remove(&self, id: i64) -> Result<bool, LedgerError> {
        self.store.delete_by_id(id)
    }

    pub fn count(&self) -> Result<i64, LedgerError> {
        self.store.count()
    }
}

/// Interpret `monto` the way the original API did: a JSON number, or a
/// string that parses as one. Everything else is a type conversion error.
fn coerce_amount(raw: &Value) -> Result<f64, LedgerError> {
    match raw {
        Value::Number(n) => n.as_f64().ok_or(LedgerError::TypeConversion),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| LedgerError::TypeConversion),
        _ => Err(LedgerError::TypeConversion),
    }
}

// ============================================================================
// TESTS
// ============================================================================
