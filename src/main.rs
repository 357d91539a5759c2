//! Transactive Order Book - Binary Entry Point
//!
//! Loads settings, runs a short demonstration session and prints the
//! resulting book.

use rust_decimal::Decimal;
use tracing::{error, info};

use transactive_orderbook::{logging, OrderBook, Settings, Side};

fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("ERROR: failed to load settings: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&settings.log);

    if let Err(e) = run(&settings) {
        error!(error = %e, "demonstration session failed");
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> transactive_orderbook::Result<()> {
    let mut book = OrderBook::from_settings(&settings.market);
    info!(price_unit = book.price_unit(), policy = ?book.policy(), "market open");

    println!("===========================================");
    println!("  Transactive Order Book");
    println!("===========================================");
    println!();

    // Standing supply and demand
    book.ask(Decimal::from(10), Decimal::ONE, Some(Decimal::from(20)))?;
    book.ask(Decimal::from(5), Decimal::ONE, Some(Decimal::from(35)))?;
    book.bid(Decimal::from(4), Decimal::ONE, Some(Decimal::from(30)))?;
    book.bid(Decimal::from(8), Decimal::ONE, Some(Decimal::from(15)))?;

    // Immediate demand
    let market = book.bid(Decimal::from(3), Decimal::ONE, None)?;

    println!("Pending bids:");
    for order in book.pending_bids() {
        println!("  {}", order.display(Some(book.units())));
    }
    println!("Pending asks:");
    for order in book.pending_asks() {
        println!("  {}", order.display(Some(book.units())));
    }
    println!("Settled:");
    for order in book.settled() {
        println!("  {}", order.display(Some(book.units())));
    }
    if let Some(view) = book.describe(market) {
        println!("Market order: {view}");
    }
    println!();

    println!("Supply curve:");
    for point in book.curve(Side::Sell) {
        println!("  {} {} @ {} {}", point.quantity, book.quantity_unit(), point.price, book.price_unit());
    }
    println!();

    let snapshot = book.snapshot();
    println!("Snapshot: {}", snapshot.to_json()?);
    println!("Digest:   {}", snapshot.digest_hex()?);
    Ok(())
}
