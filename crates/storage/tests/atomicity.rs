#![forbid(unsafe_code)]

mod common;

use common::*;
use dv_storage::{SqliteStore, StoreError};
use rusqlite::Connection;

/// Makes every insert past version 1 lose a numbering race: the trigger claims
/// the same number first, so the real insert trips `uk_document_version`. The
/// failed statement rolls the claimed row back with it.
fn force_version_collisions(store: &SqliteStore) {
    let conn = Connection::open(store.config().db_path()).expect("side connection");
    conn.execute_batch(
        r#"
        CREATE TRIGGER force_version_collision
        BEFORE INSERT ON document_versions
        WHEN NEW.version_number > 1
        BEGIN
          INSERT INTO document_versions(
            document_id, version_number, title, content, description,
            change_summary, author_id, created_at_ms
          ) VALUES (
            NEW.document_id, NEW.version_number, NEW.title, 'claimed elsewhere',
            NEW.description, NULL, NEW.author_id, NEW.created_at_ms
          );
        END;
        "#,
    )
    .expect("install trigger");
}

#[test]
fn exhausted_retries_leave_no_partial_state() {
    let (_dir, mut store) = open_store();
    let t1 = tag(&mut store, "before");
    let t2 = tag(&mut store, "after");
    let doc = create_doc(&mut store, "v1", &[t1]);
    force_version_collisions(&store);

    let mut request = edit_content(doc.id, "v2");
    request.tag_ids = Some(tag_ids(&[t2]));
    let err = store.update_document(request).expect_err("conflict");
    assert_eq!(err.code(), "VERSION_CONFLICT");
    match err {
        StoreError::VersionConflict {
            document_id,
            attempts,
        } => {
            assert_eq!(document_id, doc.id);
            assert_eq!(attempts, 3);
        }
        other => panic!("expected VersionConflict, got {other:?}"),
    }

    let current = store.get_document(doc.id, AUTHOR).expect("get");
    assert_eq!(current.content, "v1");
    assert_eq!(current.version_count, 1);
    assert_eq!(current.tag_ids(), vec![t1]);
    assert_eq!(use_count(&store, t1), 1);
    assert_eq!(use_count(&store, t2), 0);
    assert_eq!(store.list_events(doc.id, 10).expect("events").len(), 1);
}

#[test]
fn retry_budget_follows_config() {
    let (_dir, mut store) = open_store_with(|config| config.max_version_attempts = 5);
    let doc = create_doc(&mut store, "v1", &[]);
    force_version_collisions(&store);

    let err = store
        .update_document(edit_content(doc.id, "v2"))
        .expect_err("conflict");
    assert!(matches!(err, StoreError::VersionConflict { attempts: 5, .. }));
}

#[test]
fn tag_only_updates_are_unaffected_by_version_collisions() {
    let (_dir, mut store) = open_store();
    let t1 = tag(&mut store, "only");
    let doc = create_doc(&mut store, "v1", &[]);
    force_version_collisions(&store);

    let mut request = edit_content(doc.id, "v1");
    request.tag_ids = Some(tag_ids(&[t1]));
    let updated = store.update_document(request).expect("tag-only update");
    assert!(updated.version.is_none());
    assert_eq!(updated.document.tag_ids(), vec![t1]);
}


#[test]
fn held_write_lock_surfaces_as_storage_unavailable_without_retry() {
    let (_dir, mut store) = open_store_with(|config| config.busy_timeout_ms = 50);
    let doc = create_doc(&mut store, "v1", &[]);

    let holder = Connection::open(store.config().db_path()).expect("side connection");
    holder.execute_batch("BEGIN IMMEDIATE;").expect("take write lock");

    let err = store
        .update_document(edit_content(doc.id, "v2"))
        .expect_err("busy");
    assert_eq!(err.code(), "STORAGE_UNAVAILABLE");
    assert!(matches!(err, StoreError::StorageUnavailable(_)));

    holder.execute_batch("COMMIT;").expect("release write lock");
    drop(holder);

    let current = store.get_document(doc.id, AUTHOR).expect("get");
    assert_eq!(current.content, "v1");
    assert_eq!(current.version_count, 1);
    assert_eq!(store.list_events(doc.id, 10).expect("events").len(), 1);

    store
        .update_document(edit_content(doc.id, "v2"))
        .expect("update once the lock is gone");
}
