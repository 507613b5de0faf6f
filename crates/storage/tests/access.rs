#![forbid(unsafe_code)]

mod common;

use common::*;
use dv_core::ids::{DocumentId, UserId};
use dv_core::model::Permission;
use dv_storage::{
    DiffVersionsRequest, GrantAccessRequest, ListVersionsRequest, RollbackRequest, SqliteStore,
    StoreError,
};

const READER: UserId = UserId::new(3);

fn grant(document_id: DocumentId, user_id: UserId, permission: Permission) -> GrantAccessRequest {
    GrantAccessRequest {
        document_id,
        actor_id: AUTHOR,
        user_id,
        permission,
    }
}

#[test]
fn strangers_cannot_edit_or_roll_back() {
    let (_dir, mut store) = open_store();
    let doc = create_doc(&mut store, "v1", &[]);

    let mut request = edit_content(doc.id, "v2");
    request.actor_id = OTHER_USER;
    assert!(matches!(
        store.update_document(request),
        Err(StoreError::PermissionDenied)
    ));
    assert!(matches!(
        store.rollback(RollbackRequest {
            document_id: doc.id,
            target_version: 1,
            actor_id: OTHER_USER,
        }),
        Err(StoreError::PermissionDenied)
    ));
    assert_eq!(store.get_document(doc.id, AUTHOR).expect("get").version_count, 1);
}

#[test]
fn write_grant_allows_updates_attributed_to_the_editor() {
    let (_dir, mut store) = open_store();
    let doc = create_doc(&mut store, "v1", &[]);
    store
        .grant_access(grant(doc.id, OTHER_USER, Permission::Write))
        .expect("grant write");
    store
        .grant_access(grant(doc.id, READER, Permission::Read))
        .expect("grant read");

    let mut request = edit_content(doc.id, "v2");
    request.actor_id = OTHER_USER;
    let version = store
        .update_document(request)
        .expect("editor update")
        .version
        .expect("version");
    assert_eq!(version.author_id, OTHER_USER);

    let mut request = edit_content(doc.id, "v3");
    request.actor_id = READER;
    assert!(matches!(
        store.update_document(request),
        Err(StoreError::PermissionDenied)
    ));

    let mut editor_grant = grant(doc.id, READER, Permission::Read);
    editor_grant.actor_id = OTHER_USER;
    assert!(matches!(
        store.grant_access(editor_grant),
        Err(StoreError::PermissionDenied)
    ));
    assert!(matches!(
        store.delete_document(doc.id, OTHER_USER),
        Err(StoreError::PermissionDenied)
    ));
}

#[test]
fn grants_upsert_and_revoke() {
    let (_dir, mut store) = open_store();
    let doc = create_doc(&mut store, "v1", &[]);

    store
        .grant_access(grant(doc.id, OTHER_USER, Permission::Read))
        .expect("grant read");
    let upgraded = store
        .grant_access(grant(doc.id, OTHER_USER, Permission::Admin))
        .expect("upgrade");
    assert_eq!(upgraded.permission, Permission::Admin);

    let collaborators = store.list_collaborators(doc.id, AUTHOR).expect("list");
    assert_eq!(collaborators.len(), 1);
    assert_eq!(collaborators[0].invited_by, AUTHOR);

    let mut admin_grant = grant(doc.id, READER, Permission::Read);
    admin_grant.actor_id = OTHER_USER;
    store.grant_access(admin_grant).expect("admin may share");

    store
        .revoke_access(doc.id, AUTHOR, OTHER_USER)
        .expect("revoke");
    assert!(matches!(
        store.revoke_access(doc.id, AUTHOR, OTHER_USER),
        Err(StoreError::NotFound("collaborator"))
    ));
    assert!(matches!(
        store.grant_access(grant(doc.id, AUTHOR, Permission::Write)),
        Err(StoreError::InvalidInput(_))
    ));

    let actions: Vec<String> = store
        .list_events(doc.id, 10)
        .expect("events")
        .into_iter()
        .map(|event| event.action)
        .collect();
    assert_eq!(actions, vec!["unshare", "share", "share", "share", "create"]);
}

fn assert_every_read_denied(store: &SqliteStore, document_id: DocumentId, actor_id: UserId) {
    assert!(matches!(
        store.get_document(document_id, actor_id),
        Err(StoreError::PermissionDenied)
    ));
    assert!(matches!(
        store.get_version(document_id, 1, actor_id),
        Err(StoreError::PermissionDenied)
    ));
    assert!(matches!(
        store.get_version_history(ListVersionsRequest {
            document_id,
            actor_id,
            page: 1,
            page_size: None,
        }),
        Err(StoreError::PermissionDenied)
    ));
    assert!(matches!(
        store.diff_versions(DiffVersionsRequest {
            document_id,
            actor_id,
            from_version: 1,
            to_version: 2,
        }),
        Err(StoreError::PermissionDenied)
    ));
    assert!(matches!(
        store.list_collaborators(document_id, actor_id),
        Err(StoreError::PermissionDenied)
    ));
}

#[test]
fn reads_require_at_least_a_read_grant() {
    let (_dir, mut store) = open_store();
    let doc = create_doc(&mut store, "line one", &[]);
    store
        .update_document(edit_content(doc.id, "line one\nline two"))
        .expect("v2");

    assert_every_read_denied(&store, doc.id, OTHER_USER);

    store
        .grant_access(grant(doc.id, READER, Permission::Read))
        .expect("grant read");
    let seen = store.get_document(doc.id, READER).expect("reader get");
    assert_eq!(seen.content, "line one\nline two");
    assert_eq!(
        store
            .get_version(doc.id, 1, READER)
            .expect("reader version")
            .content,
        "line one"
    );
    let history = store
        .get_version_history(ListVersionsRequest {
            document_id: doc.id,
            actor_id: READER,
            page: 1,
            page_size: None,
        })
        .expect("reader history");
    assert_eq!(history.total, 2);
    let diff = store
        .diff_versions(DiffVersionsRequest {
            document_id: doc.id,
            actor_id: READER,
            from_version: 1,
            to_version: 2,
        })
        .expect("reader diff");
    assert_eq!(diff.added_lines.len(), 1);
    assert_eq!(
        store
            .list_collaborators(doc.id, READER)
            .expect("reader collaborators")
            .len(),
        1
    );

    store
        .revoke_access(doc.id, AUTHOR, READER)
        .expect("revoke");
    assert_every_read_denied(&store, doc.id, READER);
}
