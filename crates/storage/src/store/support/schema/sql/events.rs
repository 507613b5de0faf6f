#![forbid(unsafe_code)]

// No foreign key on target_id: the log outlives purged documents.
pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS op_events (
          seq INTEGER PRIMARY KEY AUTOINCREMENT,
          ts_ms INTEGER NOT NULL,
          actor_id INTEGER NOT NULL,
          action TEXT NOT NULL,
          target_kind TEXT NOT NULL,
          target_id INTEGER NOT NULL,
          payload_json TEXT NOT NULL
        );
"#;
