#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS collaborators (
          document_id INTEGER NOT NULL,
          user_id INTEGER NOT NULL,
          permission TEXT NOT NULL CHECK(permission IN ('read', 'write', 'admin')),
          invited_by INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          CONSTRAINT uk_document_user UNIQUE(document_id, user_id),
          FOREIGN KEY(document_id) REFERENCES documents(id) ON DELETE CASCADE
        );
"#;
