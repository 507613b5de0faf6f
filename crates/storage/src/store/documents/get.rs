#![forbid(unsafe_code)]

use super::super::*;
use dv_core::ids::{DocumentId, UserId};
use rusqlite::params_from_iter;

impl SqliteStore {
    /// Current state of a live document; the actor needs read access.
    pub fn get_document(
        &self,
        document_id: DocumentId,
        actor_id: UserId,
    ) -> Result<Document, StoreError> {
        let row = load_readable_document_tx(&self.conn, document_id, actor_id)?;
        let tags = document_tags_tx(&self.conn, document_id)?;
        Ok(into_document(row, tags))
    }

    /// Live documents by one author, most recently updated first. A non-empty
    /// `tag_ids` keeps documents linked to at least one of the given tags.
    pub fn list_documents(
        &self,
        request: ListDocumentsRequest,
    ) -> Result<DocumentPage, StoreError> {
        let page = self.page_bounds(request.page, request.page_size)?;

        let mut filter = String::from("author_id=?1 AND is_deleted=0");
        let mut args = vec![request.author_id.get()];
        if !request.tag_ids.is_empty() {
            let first = args.len() + 1;
            let placeholders = (first..first + request.tag_ids.len())
                .map(|idx| format!("?{idx}"))
                .collect::<Vec<_>>()
                .join(", ");
            filter.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM document_tags dt \
                 WHERE dt.document_id = documents.id AND dt.tag_id IN ({placeholders}))"
            ));
            args.extend(request.tag_ids.iter().map(|tag_id| tag_id.get()));
        }

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(1) FROM documents WHERE {filter}"),
            params_from_iter(args.iter()),
            |row| row.get(0),
        )?;

        let limit_idx = args.len() + 1;
        let offset_idx = args.len() + 2;
        args.push(page.limit);
        args.push(page.offset);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents \
             WHERE {filter} \
             ORDER BY updated_at_ms DESC, id DESC \
             LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
        ))?;
        let mut rows = stmt.query(params_from_iter(args.iter()))?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            let row = document_row_from_row(row)?;
            let tags = document_tags_tx(&self.conn, row.id)?;
            documents.push(into_document(row, tags));
        }

        Ok(DocumentPage {
            documents,
            page: page.page,
            page_size: page.size,
            total,
        })
    }
}
