use tably::{Conventions, Entity, EntityDef, Registry, TableMapping};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

struct User;

impl Entity for User {
    fn name() -> &'static str {
        "User"
    }

    fn properties() -> &'static [&'static str] {
        &["id", "first_name", "email"]
    }
}

struct Order;

impl Entity for Order {
    fn name() -> &'static str {
        "Order"
    }

    fn properties() -> &'static [&'static str] {
        &["id", "total"]
    }
}

/// Counts convention invocations to prove resolution runs once per
/// descriptor no matter how many threads race the first access.
struct CountingConventions {
    resolutions: AtomicUsize,
}

impl Conventions for CountingConventions {
    fn resolve_default_mapping(&self, entity: &EntityDef) -> TableMapping {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        TableMapping::new(*entity)
    }
}

#[test]
fn concurrent_first_access_yields_one_descriptor() {
    const THREADS: usize = 16;

    let registry = Arc::new(Registry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                registry.default_mapping::<User>()
            })
        })
        .collect();

    let mappings: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // All threads must observe the same winning mapping instance, which
    // implies they all resolved the same descriptor.
    for mapping in &mappings[1..] {
        assert!(Arc::ptr_eq(&mappings[0], mapping));
    }
    assert_eq!(registry.entity_count(), 1);
}

#[test]
fn conventions_run_once_per_descriptor() {
    let conventions = Arc::new(CountingConventions {
        resolutions: AtomicUsize::new(0),
    });

    let registry = Arc::new(Registry::new());
    registry.set_conventions(conventions.clone());

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                registry.default_mapping::<User>();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(conventions.resolutions.load(Ordering::SeqCst), 1);
}

#[test]
fn distinct_entity_types_get_distinct_descriptors() {
    let registry = Registry::new();

    let user = registry.default_mapping::<User>();
    let order = registry.default_mapping::<Order>();

    assert!(!Arc::ptr_eq(&user, &order));
    assert_eq!(user.entity().name, "User");
    assert_eq!(order.entity().name, "Order");
    assert_eq!(registry.entity_count(), 2);
}

#[test]
fn clear_racing_get_or_create_resolves_to_a_whole_generation() {
    let registry = Arc::new(Registry::new());

    for _ in 0..50 {
        registry.register_entity::<User>();

        let getter = {
            let registry = registry.clone();
            thread::spawn(move || registry.default_mapping::<User>())
        };
        let clearer = {
            let registry = registry.clone();
            thread::spawn(move || registry.clear())
        };

        // The getter lands either before or after the clear; both sides see
        // a complete mapping either way.
        let mapping = getter.join().unwrap();
        clearer.join().unwrap();
        assert_eq!(mapping.entity().name, "User");
        assert!(!mapping.snapshot().columns.is_empty());
    }
}

#[test]
fn repeated_access_returns_the_installed_instance() {
    let registry = Registry::new();

    let first = registry.default_mapping::<User>();
    let second = registry.default_mapping::<User>();
    assert!(Arc::ptr_eq(&first, &second));
}
