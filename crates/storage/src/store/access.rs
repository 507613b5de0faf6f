#![forbid(unsafe_code)]

use super::*;
use dv_core::ids::{DocumentId, UserId};
use dv_core::model::Permission;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde_json::json;
use tracing::info;

impl SqliteStore {
    /// Upserts a collaborator grant. Needs admin rights (or authorship); the
    /// author cannot be granted anything since they already hold everything.
    pub fn grant_access(&mut self, request: GrantAccessRequest) -> Result<Collaborator, StoreError> {
        let now_ms = now_ms();
        let tx = self.write_tx()?;
        let document = load_live_document_tx(&tx, request.document_id)?;
        ensure_permission_tx(&tx, &document, request.actor_id, Permission::Admin)?;
        if request.user_id == document.author_id {
            return Err(StoreError::InvalidInput("author already holds every permission"));
        }

        tx.execute(
            r#"
            INSERT INTO collaborators(document_id, user_id, permission, invited_by, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(document_id, user_id) DO UPDATE SET
              permission=excluded.permission,
              invited_by=excluded.invited_by
            "#,
            params![
                request.document_id.get(),
                request.user_id.get(),
                request.permission.as_str(),
                request.actor_id.get(),
                now_ms
            ],
        )?;
        insert_op_event_tx(
            &tx,
            OpEventInsertTxArgs {
                ts_ms: now_ms,
                actor_id: request.actor_id,
                action: OpAction::Share,
                target_kind: TARGET_DOCUMENT,
                target_id: request.document_id.get(),
                payload: json!({
                    "user_id": request.user_id,
                    "permission": request.permission,
                }),
            },
        )?;
        let collaborator = collaborator_tx(&tx, request.document_id, request.user_id)?
            .ok_or(StoreError::NotFound("collaborator"))?;
        tx.commit()?;

        info!(
            document_id = request.document_id.get(),
            user_id = request.user_id.get(),
            permission = request.permission.as_str(),
            "access granted"
        );
        Ok(collaborator)
    }

    pub fn revoke_access(
        &mut self,
        document_id: DocumentId,
        actor_id: UserId,
        user_id: UserId,
    ) -> Result<(), StoreError> {
        let now_ms = now_ms();
        let tx = self.write_tx()?;
        let document = load_live_document_tx(&tx, document_id)?;
        ensure_permission_tx(&tx, &document, actor_id, Permission::Admin)?;

        let removed = tx.execute(
            "DELETE FROM collaborators WHERE document_id=?1 AND user_id=?2",
            params![document_id.get(), user_id.get()],
        )?;
        if removed == 0 {
            return Err(StoreError::NotFound("collaborator"));
        }
        insert_op_event_tx(
            &tx,
            OpEventInsertTxArgs {
                ts_ms: now_ms,
                actor_id,
                action: OpAction::Unshare,
                target_kind: TARGET_DOCUMENT,
                target_id: document_id.get(),
                payload: json!({ "user_id": user_id }),
            },
        )?;
        tx.commit()?;

        info!(
            document_id = document_id.get(),
            user_id = user_id.get(),
            "access revoked"
        );
        Ok(())
    }

    pub fn list_collaborators(
        &self,
        document_id: DocumentId,
        actor_id: UserId,
    ) -> Result<Vec<Collaborator>, StoreError> {
        load_readable_document_tx(&self.conn, document_id, actor_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT document_id, user_id, permission, invited_by, created_at_ms \
             FROM collaborators WHERE document_id=?1 ORDER BY user_id ASC",
        )?;
        let mut rows = stmt.query(params![document_id.get()])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(collaborator_from_row(row)?);
        }
        Ok(out)
    }
}

fn collaborator_tx(
    conn: &Connection,
    document_id: DocumentId,
    user_id: UserId,
) -> Result<Option<Collaborator>, StoreError> {
    Ok(conn
        .query_row(
            "SELECT document_id, user_id, permission, invited_by, created_at_ms \
             FROM collaborators WHERE document_id=?1 AND user_id=?2",
            params![document_id.get(), user_id.get()],
            collaborator_from_row,
        )
        .optional()?)
}

fn collaborator_from_row(row: &Row<'_>) -> rusqlite::Result<Collaborator> {
    let raw: String = row.get(2)?;
    let permission = Permission::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown permission {raw}").into(),
        )
    })?;
    Ok(Collaborator {
        document_id: DocumentId::new(row.get(0)?),
        user_id: UserId::new(row.get(1)?),
        permission,
        invited_by: UserId::new(row.get(3)?),
        created_at_ms: row.get(4)?,
    })
}
