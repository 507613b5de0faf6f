#![forbid(unsafe_code)]

use super::super::super::StoreError;
use super::rows::{DocumentRow, load_live_document_tx};
use dv_core::ids::{DocumentId, UserId};
use dv_core::model::Permission;
use rusqlite::{Connection, OptionalExtension, params};

pub(in crate::store) fn collaborator_permission_tx(
    conn: &Connection,
    document_id: DocumentId,
    user_id: UserId,
) -> Result<Option<Permission>, StoreError> {
    let raw = conn
        .query_row(
            "SELECT permission FROM collaborators WHERE document_id=?1 AND user_id=?2",
            params![document_id.get(), user_id.get()],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(raw.as_deref().and_then(Permission::parse))
}

/// The author holds every permission; everyone else needs a collaborator grant
/// at or above `required`.
pub(in crate::store) fn ensure_permission_tx(
    conn: &Connection,
    document: &DocumentRow,
    actor_id: UserId,
    required: Permission,
) -> Result<(), StoreError> {
    if document.author_id == actor_id {
        return Ok(());
    }
    match collaborator_permission_tx(conn, document.id, actor_id)? {
        Some(granted) if granted.allows(required) => Ok(()),
        _ => Err(StoreError::PermissionDenied),
    }
}

/// Live document the actor may at least read.
pub(in crate::store) fn load_readable_document_tx(
    conn: &Connection,
    document_id: DocumentId,
    actor_id: UserId,
) -> Result<DocumentRow, StoreError> {
    let row = load_live_document_tx(conn, document_id)?;
    ensure_permission_tx(conn, &row, actor_id, Permission::Read)?;
    Ok(row)
}

pub(in crate::store) fn ensure_author(
    document: &DocumentRow,
    actor_id: UserId,
) -> Result<(), StoreError> {
    if document.author_id == actor_id {
        Ok(())
    } else {
        Err(StoreError::PermissionDenied)
    }
}
