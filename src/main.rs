//! lob-core demo driver
//!
//! Replays a short add/cancel/amend sequence against one book and prints
//! the top of book after every step.
//!
//! ```bash
//! RUST_LOG=lob_core=debug cargo run -- --depth 3
//! ```

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lob_core::{BookError, OrderBook, Side};

#[derive(Debug, Parser)]
#[command(name = "lob-core", about = "Limit order book demo")]
struct Args {
    /// Levels per side to print
    #[arg(short, long, default_value_t = 5)]
    depth: usize,

    /// Pre-allocated order slots
    #[arg(long, default_value_t = 1_024)]
    capacity: usize,
}

fn run(args: &Args) -> Result<(), BookError> {
    let mut book = OrderBook::with_capacity(args.capacity);

    book.add_order(1, Side::Buy, 100.0, 500, 0)?;
    book.add_order(2, Side::Buy, 101.0, 200, 1)?;
    book.add_order(3, Side::Sell, 102.0, 300, 2)?;
    book.add_order(4, Side::Sell, 103.0, 400, 3)?;
    // Same level as order 2, queued behind it
    book.add_order(5, Side::Buy, 101.0, 100, 4)?;
    println!("Initial book:\n{}\n", book.snapshot(args.depth));

    book.cancel_order(2)?;
    println!("Cancel order 2:\n{}\n", book.snapshot(args.depth));

    book.amend_order(5, 101.0, 50)?;
    println!("Amend order 5 (quantity -> 50):\n{}\n", book.snapshot(args.depth));

    book.amend_order(1, 102.0, 500)?;
    println!("Amend order 1 (price -> 102.0):\n{}\n", book.snapshot(args.depth));

    let queue: Vec<u64> = book.level_orders(Side::Sell, 102.0).map(|o| o.id).collect();
    println!("Ask queue at 102.00: {:?}", queue);
    println!("State root: {}", book.state_root_hex()?);

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    info!(depth = args.depth, capacity = args.capacity, "starting demo");

    if let Err(err) = run(&args) {
        error!(%err, "demo failed");
        std::process::exit(1);
    }
}
