//! Randomized stress tests for the transactive order book.
//!
//! These tests verify:
//! 1. Queue ordering, settlement and fill conservation hold after every call
//! 2. The clearing loop always stops at a fixed point
//! 3. Determinism is preserved across runs
//! 4. The book stays usable under sustained load
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test invariants_single_counterparty -- --nocapture
//! ```

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use rust_decimal::Decimal;
use transactive_orderbook::{IndivisiblePolicy, Order, OrderBook, OrderType, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Orders per invariant run (every submission is followed by a full check)
const INVARIANT_ORDER_COUNT: usize = 2_000;

/// Orders per load run
const LOAD_ORDER_COUNT: usize = 20_000;

/// Share of market orders in generated flow
const MARKET_RATE: f64 = 0.1;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate deterministic orders. Same seed = same orders.
///
/// Prices 40.00 to 60.00, quantities 0.1 to 5.0, buy divisibility random.
fn generate_deterministic_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    for _ in 0..count {
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let quantity = Decimal::new(rng.gen_range(1..=50), 1);
        let duration = Decimal::from(rng.gen_range(1..=4i64));

        let order = if rng.gen_bool(MARKET_RATE) {
            Order::new(OrderType::market(side), quantity, duration)
        } else {
            let price = Decimal::new(rng.gen_range(4_000..=6_000), 2);
            Order::new(OrderType::limit(side), quantity, duration).with_price(price)
        };

        let order = match side {
            Side::Buy => order.with_divisible(rng.gen_bool(0.5)),
            Side::Sell => order.with_divisible(rng.gen_bool(0.9)),
        };
        orders.push(order);
    }

    orders
}

/// Run a deterministic order sequence and return the final snapshot digest.
fn run_deterministic_sequence(seed: u64, count: usize, policy: IndivisiblePolicy) -> [u8; 32] {
    let mut book = OrderBook::default().with_policy(policy);
    for order in generate_deterministic_orders(count, seed) {
        book.submit(order).unwrap();
    }
    book.snapshot().digest().unwrap()
}

/// Queues sorted by price with ties in submission order, members pending.
fn check_queues(book: &OrderBook) {
    let bids: Vec<_> = book.pending_bids().collect();
    for pair in bids.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(a.price >= b.price, "bids out of order: {a} before {b}");
        if a.price == b.price {
            assert!(a.id < b.id, "bid time priority broken: {a} before {b}");
        }
    }

    let asks: Vec<_> = book.pending_asks().collect();
    for pair in asks.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(a.price <= b.price, "asks out of order: {a} before {b}");
        if a.price == b.price {
            assert!(a.id < b.id, "ask time priority broken: {a} before {b}");
        }
    }

    for order in bids.iter().chain(asks.iter()) {
        assert!(order.is_limit(), "non-limit order queued: {order}");
        assert!(order.quantity > Decimal::ZERO, "empty order queued: {order}");
    }
}

/// Settled orders are empty, unique and absent from both queues.
fn check_settled(book: &OrderBook) {
    let queued: HashSet<u64> = book
        .pending_bids()
        .chain(book.pending_asks())
        .map(|o| o.id)
        .collect();

    let mut seen = HashSet::new();
    for order in book.settled() {
        assert!(order.is_filled(), "settled with quantity left: {order}");
        assert!(seen.insert(order.id), "settled twice: {order}");
        assert!(!queued.contains(&order.id), "settled but still queued: {order}");
    }
}

/// Remaining plus filled quantity equals the submitted quantity, and the
/// fill log accounts for every filled unit.
fn check_conservation(book: &OrderBook, submitted: &HashMap<u64, Decimal>) {
    let mut filled: HashMap<u64, Decimal> = HashMap::new();
    for fill in book.fills() {
        assert!(fill.quantity > Decimal::ZERO);
        *filled.entry(fill.bid_order_id).or_default() += fill.quantity;
        *filled.entry(fill.ask_order_id).or_default() += fill.quantity;
    }

    for (id, quantity) in submitted {
        let order = book.order(*id).unwrap();
        assert!(order.quantity >= Decimal::ZERO, "negative quantity: {order}");
        assert_eq!(order.quantity + order.amount, *quantity, "quantity not conserved: {order}");
        assert_eq!(
            filled.get(id).copied().unwrap_or_default(),
            order.amount,
            "fill log disagrees with amount: {order}"
        );
    }
}

/// No crossing bid is left that the clearing loop could still fill.
fn check_cleared(book: &OrderBook, policy: IndivisiblePolicy) {
    let Some(ask) = book.pending_asks().next() else {
        return;
    };
    let ask_price = ask.price.unwrap();

    for bid in book.pending_bids().take_while(|b| b.price.unwrap() >= ask_price) {
        assert!(!bid.divisible, "divisible bid {bid} left crossing {ask}");
        assert!(bid.quantity > ask.quantity, "bid {bid} fits into {ask}");

        if policy == IndivisiblePolicy::Aggregate {
            let depth: Decimal = book
                .pending_asks()
                .take_while(|a| a.price <= bid.price)
                .map(|a| a.quantity)
                .sum();
            assert!(depth < bid.quantity, "bid {bid} covered by crossing depth {depth}");
        }
    }
}

/// Submit a random flow, checking every invariant after each submission.
fn run_with_invariants(seed: u64, policy: IndivisiblePolicy) -> usize {
    let mut book = OrderBook::default().with_policy(policy);
    let mut submitted = HashMap::new();

    for order in generate_deterministic_orders(INVARIANT_ORDER_COUNT, seed) {
        let quantity = order.quantity;
        let is_limit = order.is_limit();
        let id = book.submit(order).unwrap();
        submitted.insert(id, quantity);

        check_queues(&book);
        check_settled(&book);
        check_conservation(&book, &submitted);
        // Market orders do not re-run the clearing loop
        if is_limit {
            check_cleared(&book, policy);
        }
    }

    book.fills().len()
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Invariants under the default policy.
#[test]
fn invariants_single_counterparty() {
    for seed in [1, 7, 42] {
        let fills = run_with_invariants(seed, IndivisiblePolicy::SingleCounterparty);
        assert!(fills > 0, "Expected some fills for seed {seed}");
    }
}

/// Invariants when indivisible bids may fill across several asks.
#[test]
fn invariants_aggregate() {
    for seed in [1, 7, 42] {
        let fills = run_with_invariants(seed, IndivisiblePolicy::Aggregate);
        assert!(fills > 0, "Expected some fills for seed {seed}");
    }
}

/// Verify determinism: Same sequence produces identical snapshot digest.
#[test]
fn verify_determinism() {
    println!("\n=== DETERMINISM TEST ===\n");

    const TEST_COUNT: usize = 5_000;
    const SEED: u64 = 12345;

    for policy in [IndivisiblePolicy::SingleCounterparty, IndivisiblePolicy::Aggregate] {
        let root1 = run_deterministic_sequence(SEED, TEST_COUNT, policy);
        let root2 = run_deterministic_sequence(SEED, TEST_COUNT, policy);

        println!("  {policy:?} run 1: {}", hex::encode(root1));
        println!("  {policy:?} run 2: {}", hex::encode(root2));
        assert_eq!(root1, root2, "Digests must match for determinism");

        let root3 = run_deterministic_sequence(SEED + 1, TEST_COUNT, policy);
        assert_ne!(root1, root3, "Different seeds should produce different digests");
    }

    println!("\n=== DETERMINISM VERIFIED ===\n");
}

/// Sustained flow with cancellations of resting orders.
#[test]
fn stress_cancellations() {
    println!("\n=== CANCELLATION STRESS TEST ===\n");

    const CANCEL_RATE: f64 = 0.3;

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut book = OrderBook::default();
    let mut resting: Vec<u64> = Vec::new();
    let mut cancelled = 0;

    let start = Instant::now();
    for order in generate_deterministic_orders(LOAD_ORDER_COUNT, 99) {
        if !resting.is_empty() && rng.gen_bool(CANCEL_RATE) {
            let idx = rng.gen_range(0..resting.len());
            let id = resting.swap_remove(idx);
            if let Some(order) = book.cancel(id) {
                assert!(order.is_cancel());
                cancelled += 1;
            }
        }

        let is_limit = order.is_limit();
        let id = book.submit(order).unwrap();
        if is_limit && !book.order(id).unwrap().is_filled() {
            resting.push(id);
        }
    }
    let elapsed = start.elapsed();

    println!("  Orders placed:     {:>12}", LOAD_ORDER_COUNT);
    println!("  Orders cancelled:  {:>12}", cancelled);
    println!("  Fills:             {:>12}", book.fills().len());
    println!("  Pending bids:      {:>12}", book.pending_bids().len());
    println!("  Pending asks:      {:>12}", book.pending_asks().len());
    println!("  Elapsed time:      {:>12.2?}", elapsed);

    assert!(cancelled > 0);
    check_queues(&book);
    check_settled(&book);
    assert!(book.pending_bids().chain(book.pending_asks()).all(|o| !o.is_cancel()));

    println!("\n=== CANCELLATION TEST PASSED ===\n");
}

/// Test varying load sizes and report throughput.
#[test]
fn stress_scaling() {
    println!("\n=== SCALING TEST ===\n");

    println!("{:>12} {:>12} {:>12} {:>12}", "Orders", "Time", "Throughput", "Settled");
    println!("{:-<12} {:-<12} {:-<12} {:-<12}", "", "", "", "");

    for size in [1_000, 5_000, LOAD_ORDER_COUNT] {
        let orders = generate_deterministic_orders(size, 42);
        let mut book = OrderBook::default();

        let start = Instant::now();
        for order in orders {
            book.submit(order).unwrap();
        }
        let elapsed = start.elapsed();
        let throughput = size as f64 / elapsed.as_secs_f64();

        println!("{:>12} {:>12.2?} {:>12.0} {:>12}", size, elapsed, throughput, book.settled().len());
        assert_eq!(book.order_count(), size);
    }

    println!("\n=== SCALING TEST COMPLETE ===\n");
}

/// Reset returns the book to an empty session that keeps working.
#[test]
fn stress_reset_between_sessions() {
    let mut book = OrderBook::default();
    let mut last_id = 0;

    for seed in 0..5 {
        for order in generate_deterministic_orders(1_000, seed) {
            let id = book.submit(order).unwrap();
            assert!(id > last_id, "ids must keep increasing across sessions");
            last_id = id;
        }
        assert!(!book.snapshot().is_empty());

        book.reset();
        assert!(book.snapshot().is_empty());
        assert!(book.fills().is_empty());
        assert_eq!(book.order_count(), 0);
    }
}
