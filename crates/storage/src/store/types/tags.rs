#![forbid(unsafe_code)]

use dv_core::ids::{TagId, UserId};
use dv_core::model::TagCategory;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub category: TagCategory,
    pub color: String,
    pub description: Option<String>,
    pub use_count: i64,
    pub created_by: Option<UserId>,
    pub created_at_ms: i64,
}
