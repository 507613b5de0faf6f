#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_documents_author_updated ON documents(author_id, is_deleted, updated_at_ms);
        CREATE INDEX IF NOT EXISTS idx_document_tags_tag ON document_tags(tag_id);
        CREATE INDEX IF NOT EXISTS idx_tags_category ON tags(category, name);
        CREATE INDEX IF NOT EXISTS idx_tags_use_count ON tags(use_count);
        CREATE INDEX IF NOT EXISTS idx_collaborators_user ON collaborators(user_id);
        CREATE INDEX IF NOT EXISTS idx_op_events_target ON op_events(target_kind, target_id, seq);
"#;
