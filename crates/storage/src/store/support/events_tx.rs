#![forbid(unsafe_code)]

use super::super::{OpAction, OpEvent, StoreError};
use dv_core::ids::UserId;
use rusqlite::{Connection, Row, Transaction, params};

pub(in crate::store) const TARGET_DOCUMENT: &str = "document";

pub(in crate::store) struct OpEventInsertTxArgs<'a> {
    pub ts_ms: i64,
    pub actor_id: UserId,
    pub action: OpAction,
    pub target_kind: &'a str,
    pub target_id: i64,
    pub payload: serde_json::Value,
}

pub(in crate::store) fn insert_op_event_tx(
    tx: &Transaction<'_>,
    args: OpEventInsertTxArgs<'_>,
) -> Result<i64, StoreError> {
    let OpEventInsertTxArgs {
        ts_ms,
        actor_id,
        action,
        target_kind,
        target_id,
        payload,
    } = args;

    tx.execute(
        r#"
        INSERT INTO op_events(ts_ms, actor_id, action, target_kind, target_id, payload_json)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            ts_ms,
            actor_id.get(),
            action.as_str(),
            target_kind,
            target_id,
            payload.to_string()
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

pub(in crate::store) fn list_op_events_tx(
    conn: &Connection,
    target_kind: &str,
    target_id: i64,
    limit: i64,
) -> Result<Vec<OpEvent>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT seq, ts_ms, actor_id, action, target_kind, target_id, payload_json \
         FROM op_events \
         WHERE target_kind=?1 AND target_id=?2 \
         ORDER BY seq DESC \
         LIMIT ?3",
    )?;
    let mut rows = stmt.query(params![target_kind, target_id, limit])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(op_event_from_row(row)?);
    }
    Ok(out)
}

fn op_event_from_row(row: &Row<'_>) -> rusqlite::Result<OpEvent> {
    Ok(OpEvent {
        seq: row.get(0)?,
        ts_ms: row.get(1)?,
        actor_id: UserId::new(row.get(2)?),
        action: row.get(3)?,
        target_kind: row.get(4)?,
        target_id: row.get(5)?,
        payload_json: row.get(6)?,
    })
}
