#![forbid(unsafe_code)]

use super::super::*;
use super::update::{Revision, RevisionArgs};

impl SqliteStore {
    /// Forward-only: the target's fields become a new version at the head of
    /// the ledger. Earlier versions are never rewritten. Current tags are kept.
    pub fn rollback(&mut self, request: RollbackRequest) -> Result<UpdatedDocument, StoreError> {
        if request.target_version < 1 {
            return Err(StoreError::NotFound("version"));
        }
        self.commit_revision(&RevisionArgs {
            document_id: request.document_id,
            actor_id: request.actor_id,
            revision: Revision::Rollback {
                target_version: request.target_version,
            },
            tag_ids: None,
        })
    }
}
