use std::sync::Arc;
use std::sync::atomic::AtomicI64;

use sea_orm::Value;
use shardkit_seaorm::error::Error;
use shardkit_seaorm::model::{ColumnKind, ModelDef};
use shardkit_seaorm::record::Record;

mod common;
use common::{MockStore, attrs};

fn widgets() -> Arc<ModelDef> {
    Arc::new(
        ModelDef::new("widgets")
            .column("id", ColumnKind::BigInt)
            .column("company_id", ColumnKind::BigInt)
            .column("created_at", ColumnKind::Text)
            .column("name", ColumnKind::Text)
            .partitioned_by(["company_id"]),
    )
}

fn companies() -> Arc<ModelDef> {
    Arc::new(
        ModelDef::new("companies")
            .column("id", ColumnKind::BigInt)
            .column("name", ColumnKind::Text)
            .has_many(widgets(), "company_id"),
    )
}

#[tokio::test]
async fn insert_routes_to_partition_and_assigns_id() {
    let store = MockStore { insert_id: Some(42), ..MockStore::new() };
    let mut record = Record::new(widgets());
    record.set("company_id", 7i64).unwrap();
    record.set("created_at", "2024-01-01").unwrap();
    record.set("name", "Acme").unwrap();

    record.insert(&store).await.unwrap();

    let statements = store.statements();
    assert_eq!(statements.len(), 1, "{statements:?}");
    assert!(statements[0].contains(r#"INSERT INTO "widgets_p7""#), "{}", statements[0]);
    assert!(!statements[0].contains(r#""widgets""#), "{}", statements[0]);

    assert_eq!(record.primary_key(), Some(&Value::from(42i64)));
    assert!(record.persisted());
}

#[tokio::test]
async fn prefetched_id_participates_in_routing() {
    let model = Arc::new(
        ModelDef::new("measurements")
            .column("id", ColumnKind::BigInt)
            .column("payload", ColumnKind::Text)
            .partitioned_by(["id"])
            .prefetched_primary_key(),
    );
    let store = MockStore { sequence: AtomicI64::new(9), ..MockStore::new() };
    let mut record = Record::new(model);
    record.set("payload", "sample").unwrap();

    record.insert(&store).await.unwrap();

    let statements = store.statements();
    assert_eq!(statements.len(), 2, "{statements:?}");
    // 序列预取先于分区解析, 预取出的主键参与路由
    assert_eq!(statements[0], "SELECT nextval('measurements_id_seq')");
    assert!(statements[1].contains(r#"INSERT INTO "measurements_p9""#), "{}", statements[1]);

    assert_eq!(record.primary_key(), Some(&Value::from(9i64)));
}

#[tokio::test]
async fn missing_partition_key_issues_no_statements() {
    let store = MockStore::new();
    let mut record = Record::new(widgets());
    record.set("company_id", Value::BigInt(None)).unwrap();
    record.set("name", "Acme").unwrap();

    let err = record.insert(&store).await.unwrap_err();
    assert!(matches!(err, Error::MissingPartitionKey { .. }), "{err}");
    assert!(store.statements().is_empty());
    assert!(!record.persisted());
}

#[tokio::test]
async fn failed_insert_leaves_record_unpersisted() {
    let store = MockStore { fail_inserts: true, ..MockStore::new() };
    let mut record = Record::new(widgets());
    record.set("company_id", 7i64).unwrap();

    let err = record.insert(&store).await.unwrap_err();
    assert!(matches!(err, Error::Db { .. }), "{err}");
    assert!(!record.persisted());
    assert!(!record.destroyed());
}

#[tokio::test]
async fn empty_update_is_a_noop() {
    let store = MockStore::new();
    let mut record = Record::from_loaded(
        widgets(),
        attrs(vec![("id", 5i64.into()), ("company_id", 7i64.into()), ("name", "Acme".into())]),
    );

    let affected = record.update(&store, &[]).await.unwrap();

    assert_eq!(affected, 0);
    assert!(store.statements().is_empty());
}

#[tokio::test]
async fn update_locates_row_in_loaded_partition() {
    let store = MockStore { affected: 1, ..MockStore::new() };
    let mut record = Record::from_loaded(
        widgets(),
        attrs(vec![("id", 5i64.into()), ("company_id", 7i64.into()), ("name", "Acme".into())]),
    );

    // 分区键在加载后被改掉, 行定位仍用加载时的键值与主键
    record.set("company_id", 9i64).unwrap();
    record.set("name", "Acme 2").unwrap();

    let affected = record.update(&store, &["company_id", "name"]).await.unwrap();
    assert_eq!(affected, 1);

    let statements = store.statements();
    assert_eq!(statements.len(), 1, "{statements:?}");
    assert!(statements[0].contains(r#"UPDATE "widgets_p7" SET"#), "{}", statements[0]);
    assert!(statements[0].contains(r#""company_id" = 9"#), "{}", statements[0]);
    assert!(statements[0].contains(r#"WHERE "id" = 5"#), "{}", statements[0]);
}

#[tokio::test]
async fn delete_twice_is_safe() {
    let store = MockStore { affected: 1, ..MockStore::new() };
    let mut record = Record::from_loaded(
        widgets(),
        attrs(vec![("id", 5i64.into()), ("company_id", 7i64.into()), ("name", "Acme".into())]),
    );

    let first = record.delete(&store).await.unwrap();
    assert_eq!(first, 1);
    assert!(record.destroyed());

    let second = record.delete(&store).await.unwrap();
    assert_eq!(second, 0);
    assert!(record.destroyed());

    let statements = store.statements();
    assert_eq!(statements.len(), 1, "{statements:?}");
    assert!(statements[0].starts_with(r#"DELETE FROM "widgets_p7""#), "{}", statements[0]);
}

#[tokio::test]
async fn destroyed_record_rejects_mutation() {
    let store = MockStore::new();
    let mut record = Record::from_loaded(
        widgets(),
        attrs(vec![("id", 5i64.into()), ("company_id", 7i64.into())]),
    );
    record.delete(&store).await.unwrap();

    assert!(matches!(record.insert(&store).await.unwrap_err(), Error::AlreadyDestroyed { .. }));
    assert!(matches!(record.update(&store, &["name"]).await.unwrap_err(), Error::AlreadyDestroyed { .. }));
    assert!(matches!(record.set("name", "x").unwrap_err(), Error::AlreadyDestroyed { .. }));
}

#[tokio::test]
async fn plain_model_writes_to_base_table() {
    let store = MockStore { insert_id: Some(1), ..MockStore::new() };
    let mut record = Record::new(companies());
    record.set("name", "Fluent Mobile, inc.").unwrap();

    record.insert(&store).await.unwrap();

    let statements = store.statements();
    assert!(statements[0].contains(r#"INSERT INTO "companies""#), "{}", statements[0]);
}

#[tokio::test]
async fn destroy_removes_children_before_parent() {
    let store = MockStore { affected: 1, ..MockStore::new() };
    store.rows.lock().unwrap().extend([
        attrs(vec![("id", 1i64.into()), ("company_id", 7i64.into()), ("name", "a".into())]),
        attrs(vec![("id", 2i64.into()), ("company_id", 7i64.into()), ("name", "b".into())]),
    ]);

    let mut company = Record::from_loaded(
        companies(),
        attrs(vec![("id", 7i64.into()), ("name", "Fluent Mobile, inc.".into())]),
    );
    company.destroy(&store).await.unwrap();

    let statements = store.statements();
    assert_eq!(statements.len(), 4, "{statements:?}");
    assert!(statements[0].starts_with(r#"SELECT "widgets".* FROM "widgets""#), "{}", statements[0]);
    assert!(statements[1].starts_with(r#"DELETE FROM "widgets_p7""#), "{}", statements[1]);
    assert!(statements[2].starts_with(r#"DELETE FROM "widgets_p7""#), "{}", statements[2]);
    assert!(statements[3].starts_with(r#"DELETE FROM "companies""#), "{}", statements[3]);
    assert!(company.destroyed());
}
