#![forbid(unsafe_code)]

mod access;
mod core;
mod documents;
mod events;
mod indexes;
mod tags;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(core::SQL);
    sql.push_str(documents::SQL);
    sql.push_str(tags::SQL);
    sql.push_str(access::SQL);
    sql.push_str(events::SQL);
    sql.push_str(indexes::SQL);
    sql
}
