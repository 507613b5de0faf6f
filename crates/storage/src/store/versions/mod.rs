#![forbid(unsafe_code)]

use super::*;
use dv_core::diff_lines;
use dv_core::ids::{DocumentId, UserId};

impl SqliteStore {
    /// Newest first.
    pub fn get_version_history(
        &self,
        request: ListVersionsRequest,
    ) -> Result<VersionPage, StoreError> {
        let page = self.page_bounds(request.page, request.page_size)?;
        load_readable_document_tx(&self.conn, request.document_id, request.actor_id)?;

        let total = count_versions_tx(&self.conn, request.document_id)?;
        let versions = list_versions_tx(&self.conn, request.document_id, page.limit, page.offset)?;
        Ok(VersionPage {
            versions,
            page: page.page,
            page_size: page.size,
            total,
        })
    }

    pub fn get_version(
        &self,
        document_id: DocumentId,
        version_number: i64,
        actor_id: UserId,
    ) -> Result<Version, StoreError> {
        load_readable_document_tx(&self.conn, document_id, actor_id)?;
        require_version_tx(&self.conn, document_id, version_number)
    }

    /// Line diff of `content` between two versions, plus whether the title or
    /// description moved. Either side may be older; `from` is always the base.
    pub fn diff_versions(&self, request: DiffVersionsRequest) -> Result<VersionDiff, StoreError> {
        load_readable_document_tx(&self.conn, request.document_id, request.actor_id)?;
        let from = require_version_tx(&self.conn, request.document_id, request.from_version)?;
        let to = require_version_tx(&self.conn, request.document_id, request.to_version)?;

        let lines = diff_lines(&from.content, &to.content);
        Ok(VersionDiff {
            document_id: request.document_id,
            from_version: from.version_number,
            to_version: to.version_number,
            title_changed: from.title != to.title,
            description_changed: from.description != to.description,
            added_lines: lines.added_lines,
            removed_lines: lines.removed_lines,
        })
    }
}
