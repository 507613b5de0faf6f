#![allow(dead_code)]

use dv_core::FieldsPatch;
use dv_core::ids::{DocumentId, TagId, UserId};
use dv_storage::{
    CreateDocumentRequest, CreateTagRequest, Document, SqliteStore, StoreConfig,
    UpdateDocumentRequest,
};
use std::collections::BTreeSet;
use tempfile::TempDir;

pub const AUTHOR: UserId = UserId::new(1);
pub const OTHER_USER: UserId = UserId::new(2);

pub fn open_store() -> (TempDir, SqliteStore) {
    open_store_with(|_| {})
}

pub fn open_store_with(tweak: impl FnOnce(&mut StoreConfig)) -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = StoreConfig::for_dir(dir.path());
    tweak(&mut config);
    let store = SqliteStore::open_with(config).expect("open store");
    (dir, store)
}

pub fn tag_ids(ids: &[TagId]) -> BTreeSet<TagId> {
    ids.iter().copied().collect()
}

pub fn tag(store: &mut SqliteStore, name: &str) -> TagId {
    store
        .create_tag(CreateTagRequest {
            name: name.to_string(),
            category: None,
            color: None,
            description: None,
            created_by: Some(AUTHOR),
        })
        .expect("create tag")
        .id
}

pub fn create_doc(store: &mut SqliteStore, content: &str, tags: &[TagId]) -> Document {
    store
        .create_document(CreateDocumentRequest {
            title: "Prompt".to_string(),
            content: content.to_string(),
            description: None,
            tag_ids: tag_ids(tags),
            author_id: AUTHOR,
        })
        .expect("create document")
}

pub fn edit_content(document_id: DocumentId, content: &str) -> UpdateDocumentRequest {
    UpdateDocumentRequest {
        document_id,
        actor_id: AUTHOR,
        patch: FieldsPatch {
            content: Some(content.to_string()),
            ..FieldsPatch::default()
        },
        tag_ids: None,
        change_summary: None,
    }
}

pub fn use_count(store: &SqliteStore, tag_id: TagId) -> i64 {
    store.get_tag(tag_id).expect("get tag").use_count
}
