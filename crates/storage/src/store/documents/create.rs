#![forbid(unsafe_code)]

use super::super::*;
use dv_core::{DocumentFields, TagDelta};
use serde_json::json;
use std::collections::BTreeSet;
use tracing::info;

const INITIAL_CHANGE_SUMMARY: &str = "Initial version";

impl SqliteStore {
    /// Document row, version 1 and the initial tag links commit together.
    pub fn create_document(
        &mut self,
        request: CreateDocumentRequest,
    ) -> Result<Document, StoreError> {
        let fields = DocumentFields::try_new(
            &request.title,
            &request.content,
            request.description.as_deref(),
        )?;
        let now_ms = now_ms();
        let policy = self.config.dangling_tags;

        let tx = self.write_tx()?;
        let document_id = insert_document_tx(&tx, &fields, request.author_id, now_ms)?;

        let version_number = next_version_number_tx(&tx, document_id)?;
        let appended = append_version_tx(
            &tx,
            VersionInsertTxArgs {
                document_id,
                version_number,
                fields: &fields,
                change_summary: Some(INITIAL_CHANGE_SUMMARY),
                author_id: request.author_id,
                now_ms,
            },
        );
        match appended {
            Ok(_) => {}
            // A brand-new document has nobody to race with; a collision here
            // is not worth a second attempt.
            Err(StoreError::DuplicateVersion { document_id, .. }) => {
                return Err(StoreError::VersionConflict {
                    document_id,
                    attempts: 1,
                });
            }
            Err(err) => return Err(err),
        }
        update_document_fields_tx(&tx, document_id, &fields, version_number, now_ms)?;

        let delta = TagDelta {
            to_add: request.tag_ids.clone(),
            to_remove: BTreeSet::new(),
        };
        let applied = apply_tag_delta_tx(&tx, document_id, &delta, policy, now_ms)?;

        insert_op_event_tx(
            &tx,
            OpEventInsertTxArgs {
                ts_ms: now_ms,
                actor_id: request.author_id,
                action: OpAction::Create,
                target_kind: TARGET_DOCUMENT,
                target_id: document_id.get(),
                payload: json!({
                    "version_number": version_number,
                    "title": fields.title,
                    "tags_added": applied.added,
                    "tags_skipped": applied.skipped,
                }),
            },
        )?;

        let document = read_document_tx(&tx, document_id)?;
        tx.commit()?;

        info!(
            document_id = document_id.get(),
            author_id = request.author_id.get(),
            tags = applied.added.len(),
            "document created"
        );
        Ok(document)
    }
}
