use anyhow::Result;

use esop_exchange::configure::load_config;
use esop_exchange::logger::setup_logger;
use esop_exchange::matching_engine::{Exchange, OrderRequest};
use esop_exchange::order::{EsopKind, Side};

fn main() -> Result<()> {
    let config = load_config()?;
    if let Err(e) = setup_logger(&config) {
        eprintln!("Logger setup failed: {}", e);
    }

    let mut exchange = Exchange::new(config.limits);

    println!("=== ESOP exchange demo ===");
    exchange.register_user("jake")?;
    exchange.register_user("amy")?;
    exchange.deposit_money("jake", 10_000)?;
    exchange.credit_esops("amy", 100, EsopKind::NonPerformance)?;
    exchange.credit_esops("amy", 100, EsopKind::Performance)?;
    println!("Registered jake (10000 in wallet) and amy (100 + 100 ESOPs)");

    println!("\n>>> jake buys 10 @ 20");
    let ack = exchange.submit(
        "jake",
        OrderRequest { side: Side::Buy, quantity: 10, price: 20 },
    )?;
    println!("Accepted as order {}", ack.order_id);

    println!(">>> amy sells 5 performance @ 15 (matched FIFO, at her price)");
    exchange.submit(
        "amy",
        OrderRequest { side: Side::Sell(EsopKind::Performance), quantity: 5, price: 15 },
    )?;

    println!(">>> amy sells 10 non-performance @ 18");
    exchange.submit(
        "amy",
        OrderRequest { side: Side::Sell(EsopKind::NonPerformance), quantity: 10, price: 18 },
    )?;

    println!("\n>>> amy tries to sell 1000 non-performance @ 10 (rejected)");
    match exchange.submit(
        "amy",
        OrderRequest { side: Side::Sell(EsopKind::NonPerformance), quantity: 1000, price: 10 },
    ) {
        Ok(ack) => println!("Unexpectedly accepted as order {}", ack.order_id),
        Err(err) => {
            for message in err.messages() {
                println!("Rejected: {}", message);
            }
        }
    }

    println!("\n--- Order history: jake ---");
    println!("{}", serde_json::to_string_pretty(&exchange.order_history("jake")?)?);
    println!("--- Order history: amy ---");
    println!("{}", serde_json::to_string_pretty(&exchange.order_history("amy")?)?);

    println!("\n--- Balances ---");
    for (username, account) in exchange.accounts() {
        println!(
            "{}: wallet {}/{} (free/locked), non-performance {}/{}, performance {}/{}",
            username,
            account.wallet.free,
            account.wallet.locked,
            account.non_performance.free,
            account.non_performance.locked,
            account.performance.free,
            account.performance.locked
        );
    }

    let book = exchange.book();
    println!(
        "\nResting orders: {} buys, {} non-performance sells, {} performance sells",
        book.buy_order_count(),
        book.sell_order_count(),
        book.performance_sell_count()
    );
    println!("Total commission collected: {}", exchange.total_fee_collected());

    Ok(())
}
