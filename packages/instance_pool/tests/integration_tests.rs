//! Integration tests for the `instance_pool` package.
//!
//! These tests verify the identity guarantees of `InstancePool` through its public API,
//! including under concurrent access from many threads.

use std::collections::HashSet;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use instance_pool::{InstancePool, Placement, PoolKey, Pooled, Vehicle, VehicleKind};
use testing::{run_on_threads, with_watchdog};

#[test]
fn mixed_sequence_pools_three_instances() {
    let pool = InstancePool::<VehicleKind, Vehicle>::new();

    let sequence = [
        VehicleKind::Subcompact,
        VehicleKind::Subcompact,
        VehicleKind::Compact,
        VehicleKind::Subcompact,
        VehicleKind::Suv,
    ];

    let handles: Vec<_> = sequence
        .iter()
        .map(|kind| pool.acquire(*kind).unwrap())
        .collect();

    assert_eq!(pool.len(), 3);

    let subcompacts: Vec<_> = handles
        .iter()
        .filter(|handle| handle.key() == VehicleKind::Subcompact)
        .collect();
    assert_eq!(subcompacts.len(), 3);

    for a in &subcompacts {
        for b in &subcompacts {
            assert!(Pooled::ptr_eq(a, b));
        }
    }
}

#[test]
fn len_counts_distinct_keys_regardless_of_call_count() {
    let pool = InstancePool::<VehicleKind, Vehicle>::new();

    for round in 0..50 {
        let kind = if round % 2 == 0 {
            VehicleKind::Compact
        } else {
            VehicleKind::Suv
        };

        pool.acquire(kind).unwrap();
    }

    assert_eq!(pool.len(), 2);
}

#[test]
fn render_varies_output_but_not_instance() {
    let pool = InstancePool::<VehicleKind, Vehicle>::new();
    let car = pool.acquire(VehicleKind::Suv).unwrap();
    let snapshot = car.state().clone();

    let outputs: Vec<_> = [
        Placement::new("white", 0, 0),
        Placement::new("silver", 50, 12),
        Placement::new("green", 100, 100),
    ]
    .iter()
    .map(|placement| car.render(placement))
    .collect();

    assert_eq!(outputs.len(), 3);
    assert_ne!(outputs[0], outputs[1]);
    assert_ne!(outputs[1], outputs[2]);
    assert_eq!(*car, snapshot);
    assert!(Pooled::ptr_eq(&car, &pool.acquire(VehicleKind::Suv).unwrap()));
}

#[test]
fn len_never_exceeds_distinct_keys_requested() {
    let pool = InstancePool::<VehicleKind, Vehicle>::new();
    let mut requested = HashSet::new();

    assert_eq!(pool.len(), 0);

    for name in ["suv", "suv", "tank", "compact", "suv", "boat", "compact"] {
        if let Ok(handle) = pool.acquire_named(name) {
            requested.insert(handle.key());
        }

        assert_eq!(pool.len(), requested.len());
    }

    assert_eq!(pool.keys(), [VehicleKind::Compact, VehicleKind::Suv]);
    assert!(!pool.contains(VehicleKind::Subcompact));
}

#[cfg_attr(miri, ignore)]
#[test]
fn concurrent_acquire_yields_single_instance_per_key() {
    with_watchdog(|| {
        let created = Arc::new(AtomicUsize::new(0));
        let pool = InstancePool::with_factory({
            let created = Arc::clone(&created);
            move |kind: VehicleKind| {
                created.fetch_add(1, Ordering::Relaxed);
                Vehicle::from(kind)
            }
        });

        let handles = run_on_threads(8, {
            let pool = pool.clone();
            move |_| {
                VehicleKind::variants()
                    .iter()
                    .map(|kind| pool.acquire(*kind).unwrap())
                    .collect::<Vec<_>>()
            }
        });

        assert_eq!(created.load(Ordering::Relaxed), 3);
        assert_eq!(pool.len(), 3);

        let reference = pool.acquire(VehicleKind::Compact).unwrap();
        for per_thread in &handles {
            let compact = per_thread
                .iter()
                .find(|handle| handle.key() == VehicleKind::Compact)
                .unwrap();
            assert!(Pooled::ptr_eq(compact, &reference));
        }
    });
}

/// Output stream that checks, on every write, whether another thread can use the pool.
#[derive(Clone)]
struct PoolAvailabilityWriter {
    pool: InstancePool<VehicleKind, Vehicle>,
    pool_was_available: Arc<Mutex<Vec<bool>>>,
}

impl io::Write for PoolAvailabilityWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let (sender, receiver) = mpsc::channel();
        let pool = self.pool.clone();

        thread::spawn(move || {
            // The receiver may have given up already, which is fine.
            drop(sender.send(pool.len()));
        });

        let available = receiver.recv_timeout(Duration::from_secs(2)).is_ok();
        self.pool_was_available.lock().unwrap().push(available);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg_attr(miri, ignore)]
#[test]
fn log_events_are_written_without_holding_pool_lock() {
    with_watchdog(|| {
        let pool = InstancePool::<VehicleKind, Vehicle>::new();
        let writer = PoolAvailabilityWriter {
            pool: pool.clone(),
            pool_was_available: Arc::new(Mutex::new(Vec::new())),
        };
        let pool_was_available = Arc::clone(&writer.pool_was_available);

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            // The first call creates the instance, the second reuses it.
            pool.acquire(VehicleKind::Suv).unwrap();
            pool.acquire(VehicleKind::Suv).unwrap();
        });

        let observed = pool_was_available.lock().unwrap();
        assert!(!observed.is_empty());
        assert!(observed.iter().all(|available| *available));
    });
}
