#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS tags (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE,
          category TEXT NOT NULL DEFAULT 'general',
          color TEXT NOT NULL DEFAULT '#6B7280',
          description TEXT,
          use_count INTEGER NOT NULL DEFAULT 0 CHECK(use_count >= 0),
          created_by INTEGER,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS document_tags (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          document_id INTEGER NOT NULL,
          tag_id INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          CONSTRAINT uk_document_tag UNIQUE(document_id, tag_id),
          FOREIGN KEY(document_id) REFERENCES documents(id) ON DELETE CASCADE,
          FOREIGN KEY(tag_id) REFERENCES tags(id) ON DELETE CASCADE
        );
"#;
