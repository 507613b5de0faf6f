#![forbid(unsafe_code)]

use super::super::*;
use dv_core::ids::{DocumentId, TagId, UserId};
use dv_core::model::Permission;
use dv_core::{FieldsPatch, normalize_change_summary, reconcile_tags};
use serde_json::json;
use std::collections::BTreeSet;
use tracing::{debug, info};

const DEFAULT_UPDATE_SUMMARY: &str = "Updated content";

pub(super) enum Revision<'a> {
    Edit {
        patch: &'a FieldsPatch,
        change_summary: Option<&'a str>,
    },
    /// Writes the target version's fields forward as a new version.
    Rollback { target_version: i64 },
}

pub(super) struct RevisionArgs<'a> {
    pub document_id: DocumentId,
    pub actor_id: UserId,
    pub revision: Revision<'a>,
    pub tag_ids: Option<&'a BTreeSet<TagId>>,
}

impl SqliteStore {
    /// Snapshot, relink and commit once. A numbering collision restarts the
    /// whole transaction; after `max_version_attempts` collisions the caller
    /// gets `VersionConflict` and nothing from any attempt is visible.
    pub fn update_document(
        &mut self,
        request: UpdateDocumentRequest,
    ) -> Result<UpdatedDocument, StoreError> {
        let change_summary = normalize_change_summary(request.change_summary.as_deref())?;
        let args = RevisionArgs {
            document_id: request.document_id,
            actor_id: request.actor_id,
            revision: Revision::Edit {
                patch: &request.patch,
                change_summary: change_summary.as_deref(),
            },
            tag_ids: request.tag_ids.as_ref(),
        };
        self.commit_revision(&args)
    }

    pub(super) fn commit_revision(
        &mut self,
        args: &RevisionArgs<'_>,
    ) -> Result<UpdatedDocument, StoreError> {
        let max_attempts = self.config.max_version_attempts;
        let updated = with_version_retry(args.document_id, max_attempts, |attempt| {
            self.revision_attempt(args, attempt)
        })?;

        info!(
            document_id = args.document_id.get(),
            version_number = ?updated.version.as_ref().map(|version| version.version_number),
            attempts = updated.attempts,
            tags_added = updated.tags_added.len(),
            tags_removed = updated.tags_removed.len(),
            "document revision committed"
        );
        Ok(updated)
    }

    fn revision_attempt(
        &mut self,
        args: &RevisionArgs<'_>,
        attempt: u32,
    ) -> Result<UpdatedDocument, StoreError> {
        let now_ms = now_ms();
        let policy = self.config.dangling_tags;
        let document_id = args.document_id;

        let tx = self.write_tx()?;
        let current = load_live_document_tx(&tx, document_id)?;
        ensure_permission_tx(&tx, &current, args.actor_id, Permission::Write)?;

        let (next_fields, change_summary, force_version, action) = match &args.revision {
            Revision::Edit {
                patch,
                change_summary,
            } => (
                patch.apply(&current.fields)?,
                (*change_summary).unwrap_or(DEFAULT_UPDATE_SUMMARY).to_string(),
                false,
                OpAction::Update,
            ),
            Revision::Rollback { target_version } => (
                rollback_snapshot_tx(&tx, document_id, *target_version)?,
                format!("Rolled back to version {target_version}"),
                true,
                OpAction::Rollback,
            ),
        };

        let version = if force_version || next_fields != current.fields {
            let version_number = next_version_number_tx(&tx, document_id)?;
            let version = append_version_tx(
                &tx,
                VersionInsertTxArgs {
                    document_id,
                    version_number,
                    fields: &next_fields,
                    change_summary: Some(&change_summary),
                    author_id: args.actor_id,
                    now_ms,
                },
            )?;
            update_document_fields_tx(&tx, document_id, &next_fields, version_number, now_ms)?;
            Some(version)
        } else {
            debug!(
                document_id = document_id.get(),
                "fields unchanged; no version written"
            );
            None
        };

        let applied = match args.tag_ids {
            Some(target) => {
                let current_tags = current_tag_ids_tx(&tx, document_id)?;
                let delta = reconcile_tags(&current_tags, target);
                apply_tag_delta_tx(&tx, document_id, &delta, policy, now_ms)?
            }
            None => AppliedTagDelta::default(),
        };

        if version.is_none() && applied.changed() {
            touch_document_tx(&tx, document_id, now_ms)?;
        }

        if version.is_some() || applied.changed() {
            insert_op_event_tx(
                &tx,
                OpEventInsertTxArgs {
                    ts_ms: now_ms,
                    actor_id: args.actor_id,
                    action,
                    target_kind: TARGET_DOCUMENT,
                    target_id: document_id.get(),
                    payload: json!({
                        "version_number": version.as_ref().map(|version| version.version_number),
                        "change_summary": version.as_ref().map(|_| change_summary.as_str()),
                        "tags_added": applied.added,
                        "tags_removed": applied.removed,
                        "tags_skipped": applied.skipped,
                        "attempt": attempt,
                    }),
                },
            )?;
        }

        let document = read_document_tx(&tx, document_id)?;
        tx.commit()?;

        Ok(UpdatedDocument {
            document,
            version,
            tags_added: applied.added,
            tags_removed: applied.removed,
            tags_skipped: applied.skipped,
            attempts: attempt,
        })
    }
}
