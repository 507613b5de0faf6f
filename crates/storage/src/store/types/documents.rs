#![forbid(unsafe_code)]

use super::{Tag, Version};
use dv_core::ids::{DocumentId, TagId, UserId};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub author_id: UserId,
    pub version_count: i64,
    pub tags: Vec<Tag>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl Document {
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|tag| tag.id).collect()
    }
}

/// Result of one committed update: the document as of the commit plus what changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpdatedDocument {
    pub document: Document,
    pub version: Option<Version>,
    pub tags_added: Vec<TagId>,
    pub tags_removed: Vec<TagId>,
    pub tags_skipped: Vec<TagId>,
    pub attempts: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentPage {
    pub documents: Vec<Document>,
    pub page: usize,
    pub page_size: usize,
    pub total: i64,
}
