#![forbid(unsafe_code)]

mod document_tx;
mod events_tx;
mod retry;
mod schema;
mod tag_tx;
mod time;
mod version_tx;

pub(super) use document_tx::*;
pub(super) use events_tx::*;
pub(super) use retry::*;
pub(super) use schema::migrate_sqlite_schema;
pub(super) use tag_tx::*;
pub(super) use time::now_ms;
pub(super) use version_tx::*;
