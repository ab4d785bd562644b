use tably::{Entity, Registry, TableMapping};

use pretty_assertions::assert_eq;
use std::sync::Arc;

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

#[test]
fn register_entity_installs_a_fresh_identity_mapping() {
    let registry = Registry::new();

    let mapping = registry.register_entity::<User>();
    assert!(!mapping.is_frozen());
    assert_eq!(mapping.table_name(), "User");
    assert!(Arc::ptr_eq(&mapping, &registry.default_mapping::<User>()));
}

#[test]
fn register_entity_overwrites_a_prior_default() {
    let registry = Registry::new();

    let first = registry.register_entity::<User>();
    let second = registry.register_entity::<User>();

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&second, &registry.default_mapping::<User>()));
}

#[test]
fn set_default_mapping_accepts_a_fresh_mutable_mapping() {
    let registry = Registry::new();

    let mapping = Arc::new(TableMapping::new(User::def()));
    mapping.set_table("app_users").unwrap();
    registry.set_default_mapping::<User>(mapping.clone()).unwrap();

    let current = registry.default_mapping::<User>();
    assert!(Arc::ptr_eq(&mapping, &current));
    assert_eq!(current.table_name(), "app_users");
}

#[test]
fn set_default_mapping_rejects_a_frozen_mapping() {
    let registry = Registry::new();

    let mapping = Arc::new(TableMapping::new(User::def()));
    mapping.freeze();

    let err = registry.set_default_mapping::<User>(mapping).unwrap_err();
    assert!(err.is_already_frozen());
}

#[test]
fn forking_a_frozen_mapping_makes_it_installable_again() {
    let registry = Registry::new();

    let frozen = Arc::new(TableMapping::new(User::def()));
    frozen.freeze();
    assert!(registry
        .set_default_mapping::<User>(frozen.clone())
        .is_err());

    let fork = Arc::new(frozen.fork());
    registry.set_default_mapping::<User>(fork.clone()).unwrap();
    assert!(Arc::ptr_eq(&fork, &registry.default_mapping::<User>()));
}

#[test]
fn set_default_mapping_rejects_a_mismatched_entity() {
    let registry = Registry::new();

    let order_mapping = Arc::new(TableMapping::new(Order::def()));
    let err = registry
        .set_default_mapping::<User>(order_mapping)
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("Order"));

    // The rejected call left nothing behind: first access still resolves
    // through conventions.
    assert_eq!(registry.default_mapping::<User>().table_name(), "users");
}

#[test]
fn rejection_does_not_replace_an_existing_default() {
    let registry = Registry::new();

    let installed = registry.register_entity::<User>();

    let frozen = Arc::new(TableMapping::new(User::def()));
    frozen.freeze();
    assert!(registry.set_default_mapping::<User>(frozen).is_err());

    assert!(Arc::ptr_eq(&installed, &registry.default_mapping::<User>()));
}

#[test]
fn clear_discards_every_registration() {
    let registry = Registry::new();

    let before = registry.register_entity::<User>();
    registry.register_entity::<Order>();
    assert_eq!(registry.entity_count(), 2);

    registry.clear();
    assert_eq!(registry.entity_count(), 0);

    // Next access starts from a fresh convention-resolved default.
    let after = registry.default_mapping::<User>();
    assert!(!Arc::ptr_eq(&before, &after));
    assert!(!after.is_frozen());
    assert_eq!(after.table_name(), "users");
}
