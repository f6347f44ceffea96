use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use stowage_core::db::migrations::latest_version;
use stowage_core::db::{open_db, open_db_in_memory, DbError};
use stowage_core::{
    seed, AppConfig, AppServices, CrudService, Item, ItemPatch, ItemStatus, LatencyConfig,
    NewItem, OperationLatency, Repository, RepoError, ServiceError, SqliteRepository,
    StorageBackend,
};

fn shared(conn: Connection) -> Arc<Mutex<Connection>> {
    Arc::new(Mutex::new(conn))
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'records');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn create_fails_cleanly_when_max_id_is_taken() {
    let repo = SqliteRepository::<Item>::new(shared(open_db_in_memory().unwrap()));
    let mut last = seed::items().unwrap().remove(0);
    last.id = i64::MAX;
    repo.seed_if_empty(vec![last]).unwrap();

    let today = chrono::NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    let err = repo.create(NewItem::named("one too many"), today).unwrap_err();

    assert!(matches!(err, RepoError::IdSpaceExhausted("items")));
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn repository_keeps_insertion_order_and_max_plus_one_ids() {
    let repo = SqliteRepository::<Item>::new(shared(open_db_in_memory().unwrap()));
    let today = chrono::NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();

    let first = repo.create(NewItem::named("first"), today).unwrap();
    assert_eq!(first.id, 1);
    let second = repo.create(NewItem::named("second"), today).unwrap();
    let third = repo.create(NewItem::named("third"), today).unwrap();
    assert_eq!((second.id, third.id), (2, 3));

    repo.delete(2).unwrap();
    let fourth = repo.create(NewItem::named("fourth"), today).unwrap();
    assert_eq!(fourth.id, 4);

    let names: Vec<_> = repo.list().unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["first", "third", "fourth"]);
}

#[test]
fn repository_update_and_delete_report_missing_records() {
    let repo = SqliteRepository::<Item>::new(shared(open_db_in_memory().unwrap()));

    assert!(repo.get(1).unwrap().is_none());
    assert!(matches!(
        repo.update(1, &ItemPatch::default()),
        Err(RepoError::NotFound {
            collection: "items",
            id: 1
        })
    ));
    assert!(matches!(repo.delete(1), Err(RepoError::NotFound { .. })));
}

#[test]
fn seed_if_empty_only_loads_once() {
    let repo = SqliteRepository::<Item>::new(shared(open_db_in_memory().unwrap()));
    let items = seed::items().unwrap();

    assert_eq!(repo.seed_if_empty(items.clone()).unwrap(), items.len());
    assert_eq!(repo.seed_if_empty(items.clone()).unwrap(), 0);
    assert_eq!(repo.list().unwrap(), items);
}

#[tokio::test]
async fn sqlite_services_share_one_connection_across_collections() {
    let conn = shared(open_db_in_memory().unwrap());
    let services = AppServices::sqlite(Arc::clone(&conn), &LatencyConfig::none()).unwrap();

    let items = services.items.get_all().await.unwrap();
    let pickups = services.pickups.get_all().await.unwrap();
    let plans = services.storage_plans.get_all().await.unwrap();
    assert_eq!(items.len(), seed::items().unwrap().len());
    assert_eq!(pickups.len(), seed::pickups().unwrap().len());
    assert_eq!(plans.len(), 3);

    let rows: i64 = conn
        .lock()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM records;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows as usize, items.len() + pickups.len() + plans.len());
}

#[tokio::test]
async fn file_backed_store_keeps_changes_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        latency: LatencyConfig::none(),
        storage: StorageBackend::Sqlite {
            path: Some(dir.path().join("stowage.db")),
        },
        ..AppConfig::default()
    };

    let created_id = {
        let services = AppServices::from_config(&config).unwrap();
        let created = services.items.create(NewItem::named("Piano")).await.unwrap();
        services.items.delete(1).await.unwrap();
        created.id
    };

    let services = AppServices::from_config(&config).unwrap();
    let reloaded = services.items.get_by_id(created_id).await.unwrap();
    assert_eq!(reloaded.name, "Piano");
    assert_eq!(reloaded.status, ItemStatus::Scheduled);
    assert!(matches!(
        services.items.get_by_id(1).await,
        Err(ServiceError::NotFound { id: 1, .. })
    ));
}

#[tokio::test]
async fn sqlite_service_update_is_shallow() {
    let repo = SqliteRepository::<Item>::new(shared(open_db_in_memory().unwrap()));
    repo.seed_if_empty(seed::items().unwrap()).unwrap();
    let service = CrudService::new(repo, OperationLatency::none());

    let before = service.get_by_id(1).await.unwrap();
    let after = service
        .update(
            1,
            ItemPatch {
                notes: Some("moved to climate unit".to_string()),
                ..ItemPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(after.notes.as_deref(), Some("moved to climate unit"));
    assert_eq!(after.photos, before.photos);
    assert_eq!(after.dimensions, before.dimensions);
}
