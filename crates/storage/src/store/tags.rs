#![forbid(unsafe_code)]

use super::*;
use dv_core::ids::TagId;
use dv_core::model::TagCategory;
use dv_core::{normalize_tag_color, normalize_tag_description, normalize_tag_name};
use rusqlite::params;
use std::collections::BTreeMap;
use tracing::{debug, info};

impl SqliteStore {
    /// Create-or-get by name. An existing tag is returned as stored; the
    /// request's category and color do not overwrite it.
    pub fn create_tag(&mut self, request: CreateTagRequest) -> Result<Tag, StoreError> {
        let name = normalize_tag_name(&request.name)?;
        let color = normalize_tag_color(request.color.as_deref())?;
        let description = normalize_tag_description(request.description.as_deref())?;
        let category = request
            .category
            .as_deref()
            .map(TagCategory::parse)
            .unwrap_or_default();
        let now_ms = now_ms();

        let tx = self.write_tx()?;
        if let Some(existing) = get_tag_by_name_tx(&tx, &name)? {
            debug!(tag_id = existing.id.get(), name = %name, "tag already exists");
            return Ok(existing);
        }
        tx.execute(
            r#"
            INSERT INTO tags(name, category, color, description, use_count, created_by, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)
            "#,
            params![
                &name,
                category.as_str(),
                &color,
                description.as_deref(),
                request.created_by.map(|id| id.get()),
                now_ms
            ],
        )?;
        let tag_id = TagId::new(tx.last_insert_rowid());
        let tag = get_tag_tx(&tx, tag_id)?.ok_or(StoreError::NotFound("tag"))?;
        tx.commit()?;

        info!(tag_id = tag_id.get(), name = %tag.name, "tag created");
        Ok(tag)
    }

    pub fn get_tag(&self, tag_id: TagId) -> Result<Tag, StoreError> {
        get_tag_tx(&self.conn, tag_id)?.ok_or(StoreError::NotFound("tag"))
    }

    /// By name. The category filter matches the stored value, so `Other`
    /// only lists tags stored as `other`.
    pub fn list_tags(&self, request: ListTagsRequest) -> Result<Vec<Tag>, StoreError> {
        let (sql, filter) = match request.category {
            Some(category) => (
                format!("SELECT {TAG_COLUMNS} FROM tags WHERE category=?1 ORDER BY name ASC"),
                Some(category.as_str()),
            ),
            None => (
                format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY name ASC"),
                None,
            ),
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = match filter {
            Some(category) => stmt.query(params![category])?,
            None => stmt.query([])?,
        };
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(tag_from_row(row)?);
        }
        Ok(out)
    }

    pub fn popular_tags(&self, limit: usize) -> Result<Vec<Tag>, StoreError> {
        let limit = to_sqlite_i64(limit.clamp(1, self.config.max_page_size))?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TAG_COLUMNS} FROM tags ORDER BY use_count DESC, name ASC LIMIT ?1"
        ))?;
        let mut rows = stmt.query(params![limit])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(tag_from_row(row)?);
        }
        Ok(out)
    }

    /// Every tag grouped under its category. Unknown stored categories land
    /// in `Other`; empty categories are omitted.
    pub fn tags_by_category(&self) -> Result<BTreeMap<TagCategory, Vec<Tag>>, StoreError> {
        let mut grouped: BTreeMap<TagCategory, Vec<Tag>> = BTreeMap::new();
        for tag in self.list_tags(ListTagsRequest { category: None })? {
            grouped.entry(tag.category).or_default().push(tag);
        }
        Ok(grouped)
    }

    /// Refuses while any document still links the tag.
    pub fn delete_tag(&mut self, tag_id: TagId) -> Result<(), StoreError> {
        let tx = self.write_tx()?;
        let tag = get_tag_tx(&tx, tag_id)?.ok_or(StoreError::NotFound("tag"))?;
        if tag.use_count > 0 {
            return Err(StoreError::InvalidInput("tag is still in use"));
        }
        tx.execute("DELETE FROM tags WHERE id=?1", params![tag_id.get()])?;
        tx.commit()?;

        info!(tag_id = tag_id.get(), name = %tag.name, "tag deleted");
        Ok(())
    }
}
