// Finanzas Ledger - CLI
//
// Small command-line transport over the same LedgerService the HTTP server
// uses. The store is opened once here and injected; no global state.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::env;

use finanzas_ledger::{LedgerService, LedgerStore, NewTransaction, VERSION};

const DEFAULT_DB: &str = "finanzas.db";

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    // Optional --db PATH before the subcommand
    let db_path = if args.first().map(String::as_str) == Some("--db") {
        if args.len() < 2 {
            bail!("--db requires a path");
        }
        args.remove(0);
        args.remove(0)
    } else {
        env::var("FINANZAS_DB").unwrap_or_else(|_| DEFAULT_DB.to_string())
    };

    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    let store = LedgerStore::open(&db_path)
        .with_context(|| format!("failed to open database at {db_path}"))?;
    let ledger = LedgerService::new(store);

    match command.as_str() {
        "init" => run_init(&ledger, &db_path),
        "list" => run_list(&ledger),
        "add" => run_add(&ledger, &args[1..]),
        "delete" => run_delete(&ledger, &args[1..]),
        other => {
            eprintln!("unknown command: {other}\n");
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("💰 finanzas v{VERSION} - personal transaction ledger");
    println!();
    println!("Usage: finanzas [--db PATH] <command>");
    println!();
    println!("Commands:");
    println!("  init                                      create the database");
    println!("  list                                      list transactions and totals");
    println!("  add <tipo> <categoria> <monto> [desc]     add a transaction (tipo: ingreso|gasto)");
    println!("  delete <id>                               delete a transaction by id");
    println!();
    println!("Database: --db PATH, $FINANZAS_DB, or ./{DEFAULT_DB}");
}

fn run_init(ledger: &LedgerService, db_path: &str) -> Result<()> {
    let count = ledger.count()?;
    println!("✓ Database ready at {db_path} ({count} transacciones)");
    Ok(())
}

fn run_list(ledger: &LedgerService) -> Result<()> {
    let view = ledger.list_with_summary()?;

    if view.transactions.is_empty() {
        println!("📒 Ledger is empty");
    } else {
        println!("📒 {} transacciones", view.transactions.len());
        for tx in &view.transactions {
            println!(
                "  #{:<5} {:<8} {:<16} {:>12.2}  {}",
                tx.id,
                tx.kind.as_str(),
                tx.category,
                tx.amount,
                tx.description
            );
        }
    }

    println!();
    println!("  Total ingresos: {:>12.2}", view.total_income);
    println!("  Total gastos:   {:>12.2}", view.total_expense);
    println!("  Saldo:          {:>12.2}", view.balance);

    Ok(())
}

fn run_add(ledger: &LedgerService, args: &[String]) -> Result<()> {
    if args.len() < 3 {
        bail!("usage: finanzas add <tipo> <categoria> <monto> [descripcion]");
    }

    let input = NewTransaction {
        kind: Some(args[0].clone()),
        category: Some(args[1].clone()),
        amount: Some(Value::String(args[2].clone())),
        description: args.get(3).cloned(),
    };

    let tx = ledger.add(input).context("transaction rejected")?;
    println!(
        "✓ Transacción agregada: #{} {} {} {:.2}",
        tx.id,
        tx.kind.as_str(),
        tx.category,
        tx.amount
    );

    Ok(())
}

fn run_delete(ledger: &LedgerService, args: &[String]) -> Result<()> {
    let Some(raw_id) = args.first() else {
        bail!("usage: finanzas delete <id>");
    };
    let id: i64 = raw_id
        .parse()
        .with_context(|| format!("invalid id: {raw_id}"))?;

    if ledger.remove(id)? {
        println!("✓ Transacción eliminada: #{id}");
    } else {
        println!("✗ Transacción no encontrada: #{id}");
    }

    Ok(())
}
