//! The shutdown guard writes the report of the process-wide registry when dropped.

#![cfg(feature = "tracking")]

use std::fs;

use leak_tracker::{Registry, configure_global, shutdown_guard, track_delete, track_new};

#[test]
fn guard_writes_report_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MemoryTracker.txt");

    assert!(configure_global(Registry::builder().report_path(&path)));

    {
        let _guard = shutdown_guard();

        for i in 0..10_u64 {
            let value = track_new!(i);
            track_delete!(value);
        }
    }

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Initialize MemoryTracker\nNo memory leaks\nShutdown MemoryTracker\n"
    );
}
