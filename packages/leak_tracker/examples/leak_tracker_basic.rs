//! Demonstrates tracking allocations and reading the leak report.
//!
//! Two values are tracked, one is released and one is intentionally leaked. The report is
//! written to `MemoryTracker.txt` in the current directory and also printed to the console.
//!
//! Run with: `cargo run --example leak_tracker_basic`
//! Add `RUST_LOG=trace` to see the diagnostic events for every record and release.

use leak_tracker::{track_delete, track_new};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Connection {
    peer: String,
    buffer: Vec<u8>,
}

fn open_connection(peer: &str) -> Box<Connection> {
    track_new!(Connection {
        peer: peer.to_owned(),
        buffer: Vec::with_capacity(1024),
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let first = open_connection("10.0.0.1:443");
    let second = open_connection("10.0.0.2:443");

    println!(
        "Opened connections to {} and {} ({} bytes buffered)",
        first.peer,
        second.peer,
        first.buffer.capacity()
    );

    track_delete!(first);

    // Forgetting to release the second connection.
    let _leaked = Box::leak(second);

    if let Some(report) = leak_tracker::shutdown_global() {
        println!("\nLeak report:");
        report.print_to_stdout();
    }
}
