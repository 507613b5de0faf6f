#![forbid(unsafe_code)]

use super::super::super::{StoreError, Tag};
use dv_core::ids::{DocumentId, TagId, UserId};
use dv_core::model::TagCategory;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub(in crate::store) const TAG_COLUMNS: &str =
    "id, name, category, color, description, use_count, created_by, created_at_ms";

pub(in crate::store) fn get_tag_tx(
    conn: &Connection,
    tag_id: TagId,
) -> Result<Option<Tag>, StoreError> {
    Ok(conn
        .query_row(
            &format!("SELECT {TAG_COLUMNS} FROM tags WHERE id=?1"),
            params![tag_id.get()],
            tag_from_row,
        )
        .optional()?)
}

pub(in crate::store) fn get_tag_by_name_tx(
    conn: &Connection,
    name: &str,
) -> Result<Option<Tag>, StoreError> {
    Ok(conn
        .query_row(
            &format!("SELECT {TAG_COLUMNS} FROM tags WHERE name=?1"),
            params![name],
            tag_from_row,
        )
        .optional()?)
}

pub(in crate::store) fn tag_exists_tx(conn: &Connection, tag_id: TagId) -> Result<bool, StoreError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM tags WHERE id=?1",
            params![tag_id.get()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some())
}

/// Tags currently linked to a document, by name.
pub(in crate::store) fn document_tags_tx(
    conn: &Connection,
    document_id: DocumentId,
) -> Result<Vec<Tag>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name, t.category, t.color, t.description, t.use_count, t.created_by, t.created_at_ms \
         FROM document_tags dt JOIN tags t ON t.id = dt.tag_id \
         WHERE dt.document_id=?1 \
         ORDER BY t.name ASC",
    )?;
    let mut rows = stmt.query(params![document_id.get()])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(tag_from_row(row)?);
    }
    Ok(out)
}

pub(in crate::store) fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    let category: String = row.get(2)?;
    Ok(Tag {
        id: TagId::new(row.get(0)?),
        name: row.get(1)?,
        category: TagCategory::parse(&category),
        color: row.get(3)?,
        description: row.get(4)?,
        use_count: row.get(5)?,
        created_by: row.get::<_, Option<i64>>(6)?.map(UserId::new),
        created_at_ms: row.get(7)?,
    })
}
