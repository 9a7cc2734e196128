//! With the `tracking` feature disabled, the entry points are plain allocation and
//! deallocation.

#![cfg(not(feature = "tracking"))]

use leak_tracker::{
    Address, AllocationRecord, CallSite, Registry, configure_global, record, release,
    shutdown_global, track_delete, track_new,
};

#[test]
fn entry_points_do_not_touch_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MemoryTracker.txt");

    assert!(configure_global(Registry::builder().report_path(&path)));

    let tracked = track_new!(vec![1_u8, 2, 3]);
    let plain = Box::new(vec![1_u8, 2, 3]);
    assert_eq!(tracked, plain);
    track_delete!(tracked);

    let _leaked = Box::leak(track_new!(7_u64));

    let address = Address::from_raw(0x10);
    assert_eq!(
        record(
            address,
            AllocationRecord::new("Foo", 8, CallSite::new("a.rs", 1, "f"))
        ),
        address
    );
    release(address);

    // The registry was never created, so there is nothing to report and no file.
    assert!(shutdown_global().is_none());
    assert!(!path.exists());
}
