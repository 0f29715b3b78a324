// Transaction entity, category set, and aggregation
//
// This is the ledger core: everything else (SQLite store, HTTP server, CLI)
// is plumbing around the types and sums defined here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CATEGORY SET
// ============================================================================

/// Fixed, ordered category set published to clients with every listing.
///
/// Clients use it for input assistance; whether the server enforces
/// membership on writes is controlled by [`CategoryPolicy`].
pub const CATEGORIES: [&str; 10] = [
    "Alimentación",
    "Transporte",
    "Entretenimiento",
    "Salud",
    "Educación",
    "Vivienda",
    "Inversiones",
    "Ahorro",
    "Deudas",
    "Otros",
];

/// Check membership in the published category set.
pub fn is_known_category(name: &str) -> bool {
    CATEGORIES.contains(&name)
}

/// How strictly `categoria` is checked on add.
///
/// The original backend published the category set but accepted any string;
/// `Permissive` preserves that documented behavior and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryPolicy {
    /// Any non-empty category string is accepted (original behavior).
    #[default]
    Permissive,

    /// The category must be one of [`CATEGORIES`].
    Strict,
}

impl CategoryPolicy {
    pub fn allows(&self, category: &str) -> bool {
        match self {
            CategoryPolicy::Permissive => true,
            CategoryPolicy::Strict => is_known_category(category),
        }
    }
}

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

/// Direction of a transaction. Serialized as `"ingreso"` / `"gasto"` on the
/// wire and in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money coming in
    #[serde(rename = "ingreso")]
    Income,

    /// Money going out
    #[serde(rename = "gasto")]
    Expense,
}

impl TransactionType {
    /// Parse the wire spelling. Anything other than the two known values is
    /// rejected; the original backend accepted arbitrary strings here, which
    /// silently corrupted the totals.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ingreso" => Some(TransactionType::Income),
            "gasto" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "ingreso",
            TransactionType::Expense => "gasto",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TRANSACTION ENTITY
// ============================================================================

/// A single ledger entry.
///
/// `id` is assigned by the store on insert and never changes; there is no
/// update operation in this system, records are only created and deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,

    #[serde(rename = "tipo")]
    pub kind: TransactionType,

    #[serde(rename = "categoria")]
    pub category: String,

    /// Non-negative magnitude; the sign of its contribution to the balance
    /// comes from `kind`, never from the stored value.
    #[serde(rename = "monto")]
    pub amount: f64,

    #[serde(rename = "descripcion", default)]
    pub description: String,

    /// Set by the store at insert time.
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Running totals over a snapshot of the ledger.
///
/// Always recomputed from scratch over the full record set, never cached
/// incrementally. Each record contributes to exactly one of the two totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LedgerSummary {
    #[serde(rename = "total_ingresos")]
    pub total_income: f64,

    #[serde(rename = "total_gastos")]
    pub total_expense: f64,

    #[serde(rename = "saldo")]
    pub balance: f64,
}

impl LedgerSummary {
    /// Sum a snapshot. An empty snapshot yields exactly 0.0 everywhere.
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut total_income = 0.0;
        let mut total_expense = 0.0;

        for tx in transactions {
            match tx.kind {
                TransactionType::Income => total_income += tx.amount,
                TransactionType::Expense => total_expense += tx.amount,
            }
        }

        LedgerSummary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: 0,
            kind,
            category: "Otros".to_string(),
            amount,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_set_is_fixed_and_ordered() {
        assert_eq!(CATEGORIES.len(), 10);
        assert_eq!(CATEGORIES[0], "Alimentación");
        assert_eq!(CATEGORIES[9], "Otros");
        assert!(is_known_category("Transporte"));
        assert!(!is_known_category("Criptomonedas"));
    }

    #[test]
    fn test_category_policy() {
        assert!(CategoryPolicy::Permissive.allows("whatever"));
        assert!(CategoryPolicy::Strict.allows("Salud"));
        assert!(!CategoryPolicy::Strict.allows("whatever"));
        assert_eq!(CategoryPolicy::default(), CategoryPolicy::Permissive);
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!(TransactionType::parse("ingreso"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse("gasto"), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("INGRESO"), None);
        assert_eq!(TransactionType::parse("transfer"), None);
        assert_eq!(TransactionType::parse(""), None);
    }

    #[test]
    fn test_transaction_type_roundtrip() {
        for kind in [TransactionType::Income, TransactionType::Expense] {
            assert_eq!(TransactionType::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_transaction_wire_field_names() {
        let entry = tx(TransactionType::Income, 1000.0);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["tipo"], "ingreso");
        assert_eq!(json["categoria"], "Otros");
        assert_eq!(json["monto"], 1000.0);
        assert_eq!(json["descripcion"], "");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_summary_empty_ledger_is_exactly_zero() {
        let summary = LedgerSummary::compute(&[]);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.balance, 0.0);
    }

    #[test]
    fn test_summary_splits_by_type() {
        let entries = vec![
            tx(TransactionType::Income, 1000.0),
            tx(TransactionType::Expense, 200.0),
            tx(TransactionType::Expense, 50.5),
            tx(TransactionType::Income, 10.0),
        ];

        let summary = LedgerSummary::compute(&entries);
        assert_eq!(summary.total_income, 1010.0);
        assert_eq!(summary.total_expense, 250.5);
        assert_eq!(summary.balance, 1010.0 - 250.5);
    }

    #[test]
    fn test_summary_negative_balance() {
        let entries = vec![tx(TransactionType::Expense, 200.0)];

        let summary = LedgerSummary::compute(&entries);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 200.0);
        assert_eq!(summary.balance, -200.0);
    }

    #[test]
    fn test_summary_wire_field_names() {
        let json = serde_json::to_value(LedgerSummary::compute(&[])).unwrap();
        assert!(json.get("saldo").is_some());
        assert!(json.get("total_ingresos").is_some());
        assert!(json.get("total_gastos").is_some());
    }
}
