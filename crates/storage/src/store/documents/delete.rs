#![forbid(unsafe_code)]

use super::super::*;
use dv_core::ids::{DocumentId, UserId};
use rusqlite::params;
use serde_json::json;
use tracing::info;

impl SqliteStore {
    /// Soft delete. Versions stay in place for `purge_document`; tag links are
    /// released so popularity counts and `delete_tag` only see live documents.
    pub fn delete_document(
        &mut self,
        document_id: DocumentId,
        actor_id: UserId,
    ) -> Result<(), StoreError> {
        let now_ms = now_ms();
        let tx = self.write_tx()?;
        let row = load_live_document_tx(&tx, document_id)?;
        ensure_author(&row, actor_id)?;

        let unlinked = unlink_all_tags_tx(&tx, document_id)?;
        tx.execute(
            "UPDATE documents SET is_deleted=1, updated_at_ms=?2 WHERE id=?1",
            params![document_id.get(), now_ms],
        )?;
        insert_op_event_tx(
            &tx,
            OpEventInsertTxArgs {
                ts_ms: now_ms,
                actor_id,
                action: OpAction::Delete,
                target_kind: TARGET_DOCUMENT,
                target_id: document_id.get(),
                payload: json!({
                    "version_count": row.version_count,
                    "tags_removed": unlinked,
                }),
            },
        )?;
        tx.commit()?;

        info!(
            document_id = document_id.get(),
            tags_removed = unlinked.len(),
            "document soft-deleted"
        );
        Ok(())
    }

    /// Hard delete: links are dropped with their `use_count` share, then the
    /// document row goes and versions and grants cascade with it.
    pub fn purge_document(
        &mut self,
        document_id: DocumentId,
        actor_id: UserId,
    ) -> Result<(), StoreError> {
        let now_ms = now_ms();
        let tx = self.write_tx()?;
        let row = load_any_document_tx(&tx, document_id)?;
        ensure_author(&row, actor_id)?;

        let unlinked = unlink_all_tags_tx(&tx, document_id)?;
        tx.execute(
            "DELETE FROM documents WHERE id=?1",
            params![document_id.get()],
        )?;
        insert_op_event_tx(
            &tx,
            OpEventInsertTxArgs {
                ts_ms: now_ms,
                actor_id,
                action: OpAction::Purge,
                target_kind: TARGET_DOCUMENT,
                target_id: document_id.get(),
                payload: json!({
                    "version_count": row.version_count,
                    "tags_removed": unlinked,
                }),
            },
        )?;
        tx.commit()?;

        info!(
            document_id = document_id.get(),
            tags_removed = unlinked.len(),
            "document purged"
        );
        Ok(())
    }
}
