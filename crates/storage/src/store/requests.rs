#![forbid(unsafe_code)]

use dv_core::FieldsPatch;
use dv_core::ids::{DocumentId, TagId, UserId};
use dv_core::model::{Permission, TagCategory};
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub tag_ids: BTreeSet<TagId>,
    pub author_id: UserId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateDocumentRequest {
    pub document_id: DocumentId,
    pub actor_id: UserId,
    pub patch: FieldsPatch,
    /// Target tag set. `None` leaves the current links untouched.
    pub tag_ids: Option<BTreeSet<TagId>>,
    pub change_summary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollbackRequest {
    pub document_id: DocumentId,
    pub target_version: i64,
    pub actor_id: UserId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListVersionsRequest {
    pub document_id: DocumentId,
    pub actor_id: UserId,
    /// 1-based.
    pub page: usize,
    pub page_size: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListDocumentsRequest {
    pub author_id: UserId,
    /// Keeps documents linked to any of these tags. Empty means no filter.
    pub tag_ids: BTreeSet<TagId>,
    pub page: usize,
    pub page_size: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffVersionsRequest {
    pub document_id: DocumentId,
    pub actor_id: UserId,
    pub from_version: i64,
    pub to_version: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTagRequest {
    pub name: String,
    pub category: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<UserId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListTagsRequest {
    pub category: Option<TagCategory>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrantAccessRequest {
    pub document_id: DocumentId,
    pub actor_id: UserId,
    pub user_id: UserId,
    pub permission: Permission,
}
