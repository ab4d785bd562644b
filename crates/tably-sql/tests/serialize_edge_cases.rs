use tably_core::{Dialect, EntityDef, SqlGenerator, StatementOptions, TableMapping};
use tably_sql::Serializer;

const NOTE: EntityDef = EntityDef {
    name: "Note",
    properties: &["body", "author"],
};

#[test]
fn mapping_without_columns_is_rejected() {
    let mapping = TableMapping::new(NOTE);
    mapping.unmap_column("body").unwrap();
    mapping.unmap_column("author").unwrap();
    mapping.freeze();

    let err = Serializer::new()
        .build_artifact(&mapping, Dialect::Postgresql, &StatementOptions::default())
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("Note"));
}

#[test]
fn no_primary_key_means_no_keyed_statements() {
    // NOTE has no `id` property, so the identity mapping carries no key.
    let mapping = TableMapping::new(NOTE);
    mapping.freeze();

    let artifact = Serializer::new()
        .build_artifact(&mapping, Dialect::Postgresql, &StatementOptions::default())
        .unwrap();

    assert!(artifact.insert.is_some());
    assert_eq!(artifact.update_by_key, None);
    assert_eq!(artifact.delete_by_key, None);
}

#[test]
fn all_key_columns_means_no_update() {
    let mapping = TableMapping::new(NOTE);
    mapping.mark_primary_key("body").unwrap();
    mapping.mark_primary_key("author").unwrap();
    mapping.freeze();

    let artifact = Serializer::new()
        .build_artifact(&mapping, Dialect::Postgresql, &StatementOptions::default())
        .unwrap();

    // Nothing left to assign once every column is part of the key.
    assert_eq!(artifact.update_by_key, None);
    assert!(artifact.delete_by_key.is_some());
}
