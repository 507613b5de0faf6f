#![forbid(unsafe_code)]

use super::super::super::StoreError;
use dv_core::ids::DocumentId;
use rusqlite::{Transaction, params};

/// Proposes `max(version_number) + 1`, read from the ledger inside the caller's
/// transaction. Never derived from `documents.version_count` or any value
/// loaded before the transaction began. The proposal is only a guess: the
/// `uk_document_version` constraint rejects it if another writer got there
/// first, and the coordinator retries with a fresh read.
pub(in crate::store) fn next_version_number_tx(
    tx: &Transaction<'_>,
    document_id: DocumentId,
) -> Result<i64, StoreError> {
    let max: Option<i64> = tx.query_row(
        "SELECT MAX(version_number) FROM document_versions WHERE document_id=?1",
        params![document_id.get()],
        |row| row.get(0),
    )?;
    Ok(max.map_or(1, |value| value + 1))
}
