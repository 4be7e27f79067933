//! Durable store tests against an in-memory SQLite database.

use common::DatabaseConfig;
use domain::{Address, Company, Geo, User};
use sea_orm::ConnectionTrait;
use tokio_test::assert_ok;

use user_service_lib::infra::Database;
use user_service_lib::repository::{DurableStore, UserStore};

async fn memory_db() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    Database::connect(&config).await.unwrap()
}

async fn memory_store() -> UserStore {
    UserStore::new(memory_db().await.get_connection())
}

fn full_user(id: i64) -> User {
    User {
        id,
        name: "Leanne Graham".to_string(),
        username: "Bret".to_string(),
        email: "Sincere@april.biz".to_string(),
        address: Some(Address {
            street: Some("Kulas Light".to_string()),
            suite: None,
            city: Some("Gwenborough".to_string()),
            zipcode: Some("92998-3874".to_string()),
            geo: Some(Geo {
                lat: Some("-37.3159".to_string()),
                lng: Some("81.1496000".to_string()),
            }),
        }),
        phone: Some("1-770-736-8031 x56442".to_string()),
        website: None,
        company: Some(Company { name: None }),
    }
}

#[tokio::test]
async fn test_empty_store_reads_empty() {
    let store = memory_store().await;
    let users = assert_ok!(store.read_users().await);
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_round_trip_preserves_every_field() {
    let store = memory_store().await;
    let written = vec![full_user(1), User::new(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv")];

    assert_ok!(store.write_users(&written).await);
    let read = assert_ok!(store.read_users().await);

    assert_eq!(read, written);
}

#[tokio::test]
async fn test_write_replaces_previous_contents() {
    let store = memory_store().await;

    assert_ok!(store.write_users(&[full_user(1), full_user(2)]).await);
    assert_ok!(store.write_users(&[User::new(3, "C", "c", "c@x.com")]).await);

    let read = assert_ok!(store.read_users().await);
    assert_eq!(read, vec![User::new(3, "C", "c", "c@x.com")]);
}

#[tokio::test]
async fn test_write_empty_clears_store() {
    let store = memory_store().await;

    assert_ok!(store.write_users(&[full_user(1)]).await);
    assert_ok!(store.write_users(&[]).await);

    assert!(assert_ok!(store.read_users().await).is_empty());
}

#[tokio::test]
async fn test_failed_write_keeps_previous_contents() {
    let db = memory_db().await;
    let conn = db.get_connection();
    assert_ok!(
        conn.execute_unprepared(
            "CREATE TRIGGER reject_user BEFORE INSERT ON users \
             WHEN NEW.name = 'rejected' BEGIN SELECT RAISE(ABORT, 'rejected'); END;"
        )
        .await
    );
    let store = UserStore::new(conn);
    assert_ok!(store.write_users(&[full_user(1)]).await);

    // The insert aborts after the delete ran inside the same transaction.
    let replacement = vec![User::new(5, "A", "a", "a@x.com"), User::new(6, "rejected", "r", "r@x.com")];
    assert!(store.write_users(&replacement).await.is_err());

    let read = assert_ok!(store.read_users().await);
    assert_eq!(read, vec![full_user(1)]);
}

#[tokio::test]
async fn test_read_preserves_written_order() {
    let store = memory_store().await;
    let written = vec![
        User::new(9, "I", "i", "i@x.com"),
        User::new(3, "C", "c", "c@x.com"),
        User::new(5, "E", "e", "e@x.com"),
    ];

    assert_ok!(store.write_users(&written).await);
    let ids: Vec<i64> = assert_ok!(store.read_users().await).iter().map(|u| u.id).collect();

    assert_eq!(ids, vec![9, 3, 5]);
}

#[tokio::test]
async fn test_duplicate_ids_are_stored_as_written() {
    let store = memory_store().await;
    assert_ok!(store.write_users(&[full_user(1)]).await);

    let duplicated = vec![User::new(7, "A", "a", "a@x.com"), User::new(7, "B", "b", "b@x.com")];
    assert_ok!(store.write_users(&duplicated).await);

    assert_eq!(assert_ok!(store.read_users().await), duplicated);
}

#[tokio::test]
async fn test_migration_status_lists_applied_migration() {
    let db = memory_db().await;

    let status = assert_ok!(db.migration_status().await);

    assert_eq!(status.len(), 1);
    assert!(status[0].0.contains("create_users_table"));
    assert!(status[0].1);
}
