#![forbid(unsafe_code)]

use super::super::super::error::is_unique_violation;
use super::super::super::{StoreError, Version};
use dv_core::DocumentFields;
use dv_core::ids::{DocumentId, UserId};
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};

const VERSION_COLUMNS: &str = "id, document_id, version_number, title, content, description, change_summary, author_id, created_at_ms";

pub(in crate::store) struct VersionInsertTxArgs<'a> {
    pub document_id: DocumentId,
    pub version_number: i64,
    pub fields: &'a DocumentFields,
    pub change_summary: Option<&'a str>,
    pub author_id: UserId,
    pub now_ms: i64,
}

pub(in crate::store) fn append_version_tx(
    tx: &Transaction<'_>,
    args: VersionInsertTxArgs<'_>,
) -> Result<Version, StoreError> {
    let VersionInsertTxArgs {
        document_id,
        version_number,
        fields,
        change_summary,
        author_id,
        now_ms,
    } = args;

    let insert = tx.execute(
        r#"
        INSERT INTO document_versions(
          document_id, version_number, title, content, description, change_summary, author_id, created_at_ms
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            document_id.get(),
            version_number,
            &fields.title,
            &fields.content,
            fields.description.as_deref(),
            change_summary,
            author_id.get(),
            now_ms
        ],
    );

    match insert {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err) => {
            return Err(StoreError::DuplicateVersion {
                document_id,
                version_number,
            });
        }
        Err(err) => return Err(err.into()),
    }

    Ok(Version {
        id: tx.last_insert_rowid(),
        document_id,
        version_number,
        title: fields.title.clone(),
        content: fields.content.clone(),
        description: fields.description.clone(),
        change_summary: change_summary.map(str::to_string),
        author_id,
        created_at_ms: now_ms,
    })
}

pub(in crate::store) fn get_version_tx(
    conn: &Connection,
    document_id: DocumentId,
    version_number: i64,
) -> Result<Option<Version>, StoreError> {
    Ok(conn
        .query_row(
            &format!(
                "SELECT {VERSION_COLUMNS} FROM document_versions WHERE document_id=?1 AND version_number=?2"
            ),
            params![document_id.get(), version_number],
            version_from_row,
        )
        .optional()?)
}

pub(in crate::store) fn require_version_tx(
    conn: &Connection,
    document_id: DocumentId,
    version_number: i64,
) -> Result<Version, StoreError> {
    get_version_tx(conn, document_id, version_number)?.ok_or(StoreError::NotFound("version"))
}

/// Newest first. Offset/limit over an append-only set, so pages are restartable.
pub(in crate::store) fn list_versions_tx(
    conn: &Connection,
    document_id: DocumentId,
    limit: i64,
    offset: i64,
) -> Result<Vec<Version>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VERSION_COLUMNS} FROM document_versions \
         WHERE document_id=?1 \
         ORDER BY version_number DESC \
         LIMIT ?2 OFFSET ?3"
    ))?;
    let mut rows = stmt.query(params![document_id.get(), limit, offset])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(version_from_row(row)?);
    }
    Ok(out)
}

pub(in crate::store) fn count_versions_tx(
    conn: &Connection,
    document_id: DocumentId,
) -> Result<i64, StoreError> {
    Ok(conn.query_row(
        "SELECT COUNT(1) FROM document_versions WHERE document_id=?1",
        params![document_id.get()],
        |row| row.get(0),
    )?)
}

/// Fields of `version_number`, to be written forward as a new version.
pub(in crate::store) fn rollback_snapshot_tx(
    conn: &Connection,
    document_id: DocumentId,
    version_number: i64,
) -> Result<DocumentFields, StoreError> {
    Ok(require_version_tx(conn, document_id, version_number)?.fields())
}

fn version_from_row(row: &Row<'_>) -> rusqlite::Result<Version> {
    Ok(Version {
        id: row.get(0)?,
        document_id: DocumentId::new(row.get(1)?),
        version_number: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        description: row.get(5)?,
        change_summary: row.get(6)?,
        author_id: UserId::new(row.get(7)?),
        created_at_ms: row.get(8)?,
    })
}
