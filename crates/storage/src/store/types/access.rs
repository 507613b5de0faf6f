#![forbid(unsafe_code)]

use dv_core::ids::{DocumentId, UserId};
use dv_core::model::Permission;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Collaborator {
    pub document_id: DocumentId,
    pub user_id: UserId,
    pub permission: Permission,
    pub invited_by: UserId,
    pub created_at_ms: i64,
}
