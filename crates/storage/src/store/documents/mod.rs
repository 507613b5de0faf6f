#![forbid(unsafe_code)]

mod create;
mod delete;
mod get;
mod rollback;
mod update;
