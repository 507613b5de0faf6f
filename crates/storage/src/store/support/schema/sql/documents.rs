#![forbid(unsafe_code)]

// `uk_document_version` is the authority for version numbering: the sequencer
// only proposes max+1, this constraint decides.
pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS documents (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          content TEXT NOT NULL,
          description TEXT,
          author_id INTEGER NOT NULL,
          version_count INTEGER NOT NULL DEFAULT 0 CHECK(version_count >= 0),
          is_deleted INTEGER NOT NULL DEFAULT 0 CHECK(is_deleted IN (0, 1)),
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS document_versions (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          document_id INTEGER NOT NULL,
          version_number INTEGER NOT NULL CHECK(version_number >= 1),
          title TEXT NOT NULL,
          content TEXT NOT NULL,
          description TEXT,
          change_summary TEXT,
          author_id INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          CONSTRAINT uk_document_version UNIQUE(document_id, version_number),
          FOREIGN KEY(document_id) REFERENCES documents(id) ON DELETE CASCADE
        );
"#;
