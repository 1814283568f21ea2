//! Basic example of using the `SettlementEngine`.
//!
//! Run with: `cargo run --example basic`

use chrono::Utc;
use settlement_engine::SettlementEngine;

fn main() {
    // Initialize logger (optional, but shows what's happening)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut engine = SettlementEngine::new();
    for (name, types) in [
        ("goldman", vec!["wire", "swift"]),
        ("hsbc", vec!["wire", "card"]),
        ("ubs", vec!["swift"]),
        ("nomura", vec!["wire"]),
    ] {
        engine.register_bank(name, types).expect("Failed to register bank");
    }

    for (from, to, amount) in [
        ("goldman", "hsbc", 300),
        ("hsbc", "ubs", 200),
        ("ubs", "nomura", 500),
        ("nomura", "goldman", 100),
        ("goldman", "ubs", 150),
    ] {
        engine
            .record_transaction(from, to, amount, Utc::now())
            .expect("Failed to record transaction");
    }

    println!("\n=== Net Positions ===");
    for bank in engine.banks() {
        println!("{:<10} {:>6}", bank.name(), bank.net_amount());
    }

    let plan = engine.minimize_cash_flow().expect("Failed to settle");
    println!("\n=== Settlement Plan ({} transfers) ===", plan.len());
    for settlement in &plan {
        println!("{settlement}");
    }
}
