// Finanzas Ledger - Web Server
// REST API with Axum, wire-compatible with the React client

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::env;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use finanzas_ledger::{LedgerError, LedgerService, LedgerStore, NewTransaction, Transaction};

const DEFAULT_DB: &str = "finanzas.db";
const DEFAULT_ADDR: &str = "0.0.0.0:5000";

/// Shared application state
#[derive(Clone)]
struct AppState {
    ledger: Arc<Mutex<LedgerService>>,
}

/// Add response: confirmation message plus the created record
#[derive(Serialize)]
struct AddResponse {
    message: String,
    #[serde(rename = "transaccion")]
    transaction: Transaction,
}

/// Plain confirmation / not-found message
#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /transacciones - full listing with totals and the category set
async fn list_transactions(State(state): State<AppState>) -> Response {
    let ledger = state.ledger.lock().unwrap();

    match ledger.list_with_summary() {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /transacciones - validate and persist a new transaction
async fn add_transaction(
    State(state): State<AppState>,
    Json(payload): Json<NewTransaction>,
) -> Response {
    let ledger = state.ledger.lock().unwrap();

    match ledger.add(payload) {
        Ok(tx) => (
            StatusCode::CREATED,
            Json(AddResponse {
                message: "Transacción agregada".to_string(),
                transaction: tx,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /transacciones/:id - remove by id; absent ids get a 404
async fn delete_transaction(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let ledger = state.ledger.lock().unwrap();

    match ledger.remove(id) {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Transacción eliminada".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: "Transacción no encontrada".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Map ledger errors onto HTTP: input rejections are 400s, storage faults
/// are 500s. Storage faults are also logged server-side.
fn error_response(err: LedgerError) -> Response {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        eprintln!("storage error: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("💰 Finanzas Ledger - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let db_path = env::var("FINANZAS_DB").unwrap_or_else(|_| DEFAULT_DB.to_string());
    let addr = env::var("FINANZAS_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    // Open (or create) the database once; everything downstream gets the
    // service injected through shared state.
    let store = match LedgerStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to open database at {db_path}: {e}");
            std::process::exit(1);
        }
    };
    println!("✓ Database opened: {db_path}");

    let state = AppState {
        ledger: Arc::new(Mutex::new(LedgerService::new(store))),
    };

    // CORS stays permissive so the React dev server can reach the API
    let app = Router::new()
        .route(
            "/transacciones",
            get(list_transactions).post(add_transaction),
        )
        .route("/transacciones/:id", axum::routing::delete(delete_transaction))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("❌ Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    println!("\n🚀 Server running on http://{addr}");
    println!("   API: http://{addr}/transacciones");
    println!("\n   Press Ctrl+C to stop\n");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ Server error: {e}");
        std::process::exit(1);
    }
}
