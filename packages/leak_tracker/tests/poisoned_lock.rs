//! A panic inside a `with_global` closure must not break later tracking calls or turn the
//! shutdown guard into a second panic during unwinding.

#![cfg(feature = "tracking")]

use std::fs;
use std::panic;
use std::thread;

use leak_tracker::{
    Registry, configure_global, shutdown_global, shutdown_guard, track_delete, track_new,
    with_global,
};

#[test]
fn tracking_survives_panic_inside_global_closure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MemoryTracker.txt");

    assert!(configure_global(Registry::builder().report_path(&path)));

    let result = panic::catch_unwind(|| {
        with_global::<()>(|_| panic!("closure failed while holding the registry"));
    });
    assert!(result.is_err());

    let value = track_new!(5_u32);
    assert_eq!(with_global(|registry| registry.len()), Some(1));
    track_delete!(value);
    assert_eq!(with_global(|registry| registry.len()), Some(0));

    let worker = thread::spawn(|| {
        let _guard = shutdown_guard();
        let _leaked = Box::leak(track_new!(7_u64));

        with_global::<()>(|_| panic!("closure failed while the guard is alive"));
    });

    // The guard shuts the registry down while unwinding instead of aborting the process.
    assert!(worker.join().is_err());
    assert!(shutdown_global().is_none());

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("Initialize MemoryTracker\n1 memory leak occurence detected\n"));
    assert!(contents.ends_with("Shutdown MemoryTracker\n"));
}
