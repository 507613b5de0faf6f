#![forbid(unsafe_code)]

use dv_core::ids::UserId;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpAction {
    Create,
    Update,
    Rollback,
    Delete,
    Purge,
    Share,
    Unshare,
}

impl OpAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Rollback => "rollback",
            Self::Delete => "delete",
            Self::Purge => "purge",
            Self::Share => "share",
            Self::Unshare => "unshare",
        }
    }
}

/// Operation log row. `payload_json` is the raw JSON detail written with the change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpEvent {
    pub seq: i64,
    pub ts_ms: i64,
    pub actor_id: UserId,
    pub action: String,
    pub target_kind: String,
    pub target_id: i64,
    pub payload_json: String,
}

impl OpEvent {
    pub fn event_id(&self) -> String {
        format!("evt_{:016}", self.seq)
    }
}
