// SQLite-backed ledger store
//
// Durable keyed collection of transactions, keyed by an auto-assigned
// integer id. One store instance is constructed at process start and
// injected into the service; nothing else touches the connection.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::LedgerError;
use crate::ledger::{Transaction, TransactionType};

pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    /// Open (or create) the database file and run schema setup.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let conn = Connection::open(path)?;
        setup_schema(&conn)?;
        Ok(LedgerStore { conn })
    }

    /// In-memory store, used by tests and throwaway runs.
    pub fn open_in_memory() -> Result<Self, LedgerError> {
        let conn = Connection::open_in_memory()?;
        setup_schema(&conn)?;
        Ok(LedgerStore { conn })
    }

    /// Persist a new record and return it with its freshly assigned id.
    ///
    /// Fails only on an underlying storage fault; all input validation
    /// happens in the service before this is called.
    pub fn insert(
        &self,
        kind: TransactionType,
        category: &str,
        amount: f64,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        let created_at = Utc::now();

        self.conn.execute(
            "INSERT INTO transacciones (tipo, categoria, monto, descripcion, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                kind.as_str(),
                category,
                amount,
                description,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(Transaction {
            id: self.conn.last_insert_rowid(),
            kind,
            category: category.to_string(),
            amount,
            description: description.to_string(),
            created_at,
        })
    }

    /// Every record, in ascending-id (insertion) order.
    pub fn list_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, tipo, categoria, monto, descripcion, created_at
             FROM transacciones
             ORDER BY id ASC",
        )?;

        let transactions = stmt
            .query_map([], |row| {
                let tipo: String = row.get(1)?;
                let created_at: String = row.get(5)?;

                Ok(Transaction {
                    id: row.get(0)?,
                    kind: TransactionType::parse(&tipo).ok_or_else(|| {
                        rusqlite::Error::FromSqlConversionFailure(
                            1,
                            rusqlite::types::Type::Text,
                            format!("invalid tipo {tipo:?}").into(),
                        )
                    })?,
                    category: row.get(2)?,
                    amount: row.get(3)?,
                    description: row.get(4)?,
                    created_at: DateTime::parse_from_rfc3339(&created_at)
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                5,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?
                        .with_timezone(&Utc),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Remove the record with the given id. Returns whether a record was
    /// found and removed; absent ids are not an error and have no effect.
    pub fn delete_by_id(&self, id: i64) -> Result<bool, LedgerError> {
        let deleted = self
            .conn
            .execute("DELETE FROM transacciones WHERE id = ?1", params![id])?;

        Ok(deleted > 0)
    }

    pub fn count(&self) -> Result<i64, LedgerError> {
        let count =
            self.conn
                .query_row("SELECT COUNT(*) FROM transacciones", [], |row| row.get(0))?;

        Ok(count)
    }
}

fn setup_schema(conn: &Connection) -> Result<(), LedgerError> {
    // WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS transacciones (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tipo TEXT NOT NULL,
            categoria TEXT NOT NULL,
            monto REAL NOT NULL,
            descripcion TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let store = LedgerStore::open_in_memory().unwrap();

        let first = store
            .insert(TransactionType::Income, "Otros", 1000.0, "salary")
            .unwrap();
        let second = store
            .insert(TransactionType::Expense, "Transporte", 200.0, "")
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_insert_returns_the_persisted_record() {
        let store = LedgerStore::open_in_memory().unwrap();

        let tx = store
            .insert(TransactionType::Expense, "Salud", 49.9, "dentista")
            .unwrap();

        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.category, "Salud");
        assert_eq!(tx.amount, 49.9);
        assert_eq!(tx.description, "dentista");
    }

    #[test]
    fn test_list_all_in_insertion_order() {
        let store = LedgerStore::open_in_memory().unwrap();

        store
            .insert(TransactionType::Income, "Otros", 1.0, "a")
            .unwrap();
        store
            .insert(TransactionType::Income, "Otros", 2.0, "b")
            .unwrap();
        store
            .insert(TransactionType::Expense, "Otros", 3.0, "c")
            .unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(
            all.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(all[2].description, "c");
    }

    #[test]
    fn test_list_all_roundtrips_fields() {
        let store = LedgerStore::open_in_memory().unwrap();
        let inserted = store
            .insert(TransactionType::Income, "Ahorro", 123.45, "nota")
            .unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, inserted.id);
        assert_eq!(all[0].kind, TransactionType::Income);
        assert_eq!(all[0].category, "Ahorro");
        assert_eq!(all[0].amount, 123.45);
        assert_eq!(all[0].description, "nota");
        assert_eq!(all[0].created_at, inserted.created_at);
    }

    #[test]
    fn test_delete_existing_id() {
        let store = LedgerStore::open_in_memory().unwrap();
        let tx = store
            .insert(TransactionType::Income, "Otros", 10.0, "")
            .unwrap();

        assert!(store.delete_by_id(tx.id).unwrap());
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_id_is_a_noop() {
        let store = LedgerStore::open_in_memory().unwrap();
        store
            .insert(TransactionType::Income, "Otros", 10.0, "")
            .unwrap();

        assert!(!store.delete_by_id(999).unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_count_tracks_inserts_and_deletes() {
        let store = LedgerStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);

        let a = store
            .insert(TransactionType::Expense, "Deudas", 5.0, "")
            .unwrap();
        store
            .insert(TransactionType::Income, "Otros", 5.0, "")
            .unwrap();
        assert_eq!(store.count().unwrap(), 2);

        store.delete_by_id(a.id).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
