#![forbid(unsafe_code)]

use super::super::super::{DanglingTagPolicy, StoreError};
use super::rows::tag_exists_tx;
use dv_core::TagDelta;
use dv_core::ids::{DocumentId, TagId};
use rusqlite::{Connection, Transaction, params};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(in crate::store) struct AppliedTagDelta {
    pub added: Vec<TagId>,
    pub removed: Vec<TagId>,
    pub skipped: Vec<TagId>,
}

impl AppliedTagDelta {
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Authoritative read of the link set; never served from a value loaded
/// outside the current transaction.
pub(in crate::store) fn current_tag_ids_tx(
    conn: &Connection,
    document_id: DocumentId,
) -> Result<BTreeSet<TagId>, StoreError> {
    let mut stmt = conn.prepare("SELECT tag_id FROM document_tags WHERE document_id=?1")?;
    let mut rows = stmt.query(params![document_id.get()])?;
    let mut out = BTreeSet::new();
    while let Some(row) = rows.next()? {
        out.insert(TagId::new(row.get(0)?));
    }
    Ok(out)
}

/// Applies a reconciled delta. Each link change and its `use_count` adjustment
/// land in the same transaction; nothing here commits.
pub(in crate::store) fn apply_tag_delta_tx(
    tx: &Transaction<'_>,
    document_id: DocumentId,
    delta: &TagDelta,
    policy: DanglingTagPolicy,
    now_ms: i64,
) -> Result<AppliedTagDelta, StoreError> {
    let mut applied = AppliedTagDelta::default();

    for tag_id in &delta.to_remove {
        let removed = tx.execute(
            "DELETE FROM document_tags WHERE document_id=?1 AND tag_id=?2",
            params![document_id.get(), tag_id.get()],
        )?;
        if removed > 0 {
            tx.execute(
                "UPDATE tags SET use_count = use_count - 1 WHERE id=?1",
                params![tag_id.get()],
            )?;
            applied.removed.push(*tag_id);
        }
    }

    for tag_id in &delta.to_add {
        if !tag_exists_tx(tx, *tag_id)? {
            match policy {
                DanglingTagPolicy::Skip => {
                    debug!(
                        document_id = document_id.get(),
                        tag_id = tag_id.get(),
                        "skipping unknown tag id"
                    );
                    applied.skipped.push(*tag_id);
                    continue;
                }
                DanglingTagPolicy::Reject => {
                    return Err(StoreError::DanglingTagReference(*tag_id));
                }
            }
        }
        tx.execute(
            "INSERT INTO document_tags(document_id, tag_id, created_at_ms) VALUES (?1, ?2, ?3)",
            params![document_id.get(), tag_id.get(), now_ms],
        )?;
        tx.execute(
            "UPDATE tags SET use_count = use_count + 1 WHERE id=?1",
            params![tag_id.get()],
        )?;
        applied.added.push(*tag_id);
    }

    Ok(applied)
}

/// Drops every link of a document and returns the tag counters they held.
pub(in crate::store) fn unlink_all_tags_tx(
    tx: &Transaction<'_>,
    document_id: DocumentId,
) -> Result<Vec<TagId>, StoreError> {
    let current = current_tag_ids_tx(tx, document_id)?;
    for tag_id in &current {
        tx.execute(
            "UPDATE tags SET use_count = use_count - 1 WHERE id=?1",
            params![tag_id.get()],
        )?;
    }
    tx.execute(
        "DELETE FROM document_tags WHERE document_id=?1",
        params![document_id.get()],
    )?;
    Ok(current.into_iter().collect())
}
