#![forbid(unsafe_code)]

use super::*;
use dv_core::ids::DocumentId;

impl SqliteStore {
    /// Newest first. Works for purged documents too; the log keeps their rows.
    pub fn list_events(
        &self,
        document_id: DocumentId,
        limit: usize,
    ) -> Result<Vec<OpEvent>, StoreError> {
        let limit = to_sqlite_i64(limit.clamp(1, self.config.max_page_size))?;
        list_op_events_tx(&self.conn, TARGET_DOCUMENT, document_id.get(), limit)
    }
}
