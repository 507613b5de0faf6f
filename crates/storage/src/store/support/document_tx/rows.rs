#![forbid(unsafe_code)]

use super::super::super::{Document, StoreError, Tag};
use super::super::tag_tx::document_tags_tx;
use dv_core::DocumentFields;
use dv_core::ids::{DocumentId, UserId};
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};

pub(in crate::store) const DOCUMENT_COLUMNS: &str =
    "id, title, content, description, author_id, version_count, created_at_ms, updated_at_ms";

/// The mutable document row as read inside a write transaction.
#[derive(Clone, Debug)]
pub(in crate::store) struct DocumentRow {
    pub id: DocumentId,
    pub fields: DocumentFields,
    pub author_id: UserId,
    pub version_count: i64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// Loads a live (not soft-deleted) document. Callers hold an immediate
/// transaction, so the row stays ours until commit.
pub(in crate::store) fn load_live_document_tx(
    conn: &Connection,
    document_id: DocumentId,
) -> Result<DocumentRow, StoreError> {
    conn.query_row(
        &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id=?1 AND is_deleted=0"),
        params![document_id.get()],
        document_row_from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound("document"))
}

/// Loads a document whether or not it is soft-deleted.
pub(in crate::store) fn load_any_document_tx(
    conn: &Connection,
    document_id: DocumentId,
) -> Result<DocumentRow, StoreError> {
    conn.query_row(
        &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id=?1"),
        params![document_id.get()],
        document_row_from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound("document"))
}

pub(in crate::store) fn read_document_tx(
    conn: &Connection,
    document_id: DocumentId,
) -> Result<Document, StoreError> {
    let row = load_live_document_tx(conn, document_id)?;
    let tags = document_tags_tx(conn, document_id)?;
    Ok(into_document(row, tags))
}

pub(in crate::store) fn into_document(row: DocumentRow, tags: Vec<Tag>) -> Document {
    let DocumentRow {
        id,
        fields,
        author_id,
        version_count,
        created_at_ms,
        updated_at_ms,
    } = row;
    Document {
        id,
        title: fields.title,
        content: fields.content,
        description: fields.description,
        author_id,
        version_count,
        tags,
        created_at_ms,
        updated_at_ms,
    }
}

pub(in crate::store) fn insert_document_tx(
    tx: &Transaction<'_>,
    fields: &DocumentFields,
    author_id: UserId,
    now_ms: i64,
) -> Result<DocumentId, StoreError> {
    tx.execute(
        r#"
        INSERT INTO documents(title, content, description, author_id, version_count, is_deleted, created_at_ms, updated_at_ms)
        VALUES (?1, ?2, ?3, ?4, 0, 0, ?5, ?5)
        "#,
        params![
            &fields.title,
            &fields.content,
            fields.description.as_deref(),
            author_id.get(),
            now_ms
        ],
    )?;
    Ok(DocumentId::new(tx.last_insert_rowid()))
}

/// Writes the new current fields together with the version number just appended.
pub(in crate::store) fn update_document_fields_tx(
    tx: &Transaction<'_>,
    document_id: DocumentId,
    fields: &DocumentFields,
    version_count: i64,
    now_ms: i64,
) -> Result<(), StoreError> {
    let updated = tx.execute(
        r#"
        UPDATE documents
        SET title=?2, content=?3, description=?4, version_count=?5, updated_at_ms=?6
        WHERE id=?1 AND is_deleted=0
        "#,
        params![
            document_id.get(),
            &fields.title,
            &fields.content,
            fields.description.as_deref(),
            version_count,
            now_ms
        ],
    )?;
    if updated == 0 {
        return Err(StoreError::NotFound("document"));
    }
    Ok(())
}

pub(in crate::store) fn touch_document_tx(
    tx: &Transaction<'_>,
    document_id: DocumentId,
    now_ms: i64,
) -> Result<(), StoreError> {
    tx.execute(
        "UPDATE documents SET updated_at_ms=MAX(updated_at_ms, ?2) WHERE id=?1",
        params![document_id.get(), now_ms],
    )?;
    Ok(())
}

pub(in crate::store) fn document_row_from_row(row: &Row<'_>) -> rusqlite::Result<DocumentRow> {
    Ok(DocumentRow {
        id: DocumentId::new(row.get(0)?),
        fields: DocumentFields {
            title: row.get(1)?,
            content: row.get(2)?,
            description: row.get(3)?,
        },
        author_id: UserId::new(row.get(4)?),
        version_count: row.get(5)?,
        created_at_ms: row.get(6)?,
        updated_at_ms: row.get(7)?,
    })
}
