#![forbid(unsafe_code)]

use crate::args::{Command, ContentArgs};
use anyhow::{Context, anyhow, bail};
use dv_core::FieldsPatch;
use dv_core::ids::{DocumentId, TagId, UserId};
use dv_core::model::{Permission, TagCategory};
use dv_storage::{
    CreateDocumentRequest, CreateTagRequest, DiffVersionsRequest, GrantAccessRequest,
    ListDocumentsRequest, ListTagsRequest, ListVersionsRequest, RollbackRequest, SqliteStore,
    UpdateDocumentRequest,
};
use serde_json::{Value, json};
use std::collections::BTreeSet;

pub(crate) fn execute(
    store: &mut SqliteStore,
    user: Option<i64>,
    command: Command,
) -> anyhow::Result<Value> {
    let actor = || {
        user.map(UserId::new)
            .ok_or_else(|| anyhow!("--as <USER_ID> (or DOCVER_USER) is required for this command"))
    };

    let result = match command {
        Command::Create {
            title,
            content,
            description,
            tags,
        } => {
            let content = read_content(&content)?
                .ok_or_else(|| anyhow!("create needs --content or --content-file"))?;
            let document = store.create_document(CreateDocumentRequest {
                title,
                content,
                description,
                tag_ids: tag_set(&tags),
                author_id: actor()?,
            })?;
            serde_json::to_value(document)?
        }
        Command::Update {
            document_id,
            title,
            content,
            description,
            tags,
            clear_tags,
            summary,
        } => {
            let patch = FieldsPatch {
                title,
                content: read_content(&content)?,
                description,
            };
            let tag_ids = if clear_tags {
                Some(BTreeSet::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tag_set(&tags))
            };
            if patch.is_empty() && tag_ids.is_none() {
                bail!("update needs at least one field, --tag or --clear-tags");
            }
            let updated = store.update_document(UpdateDocumentRequest {
                document_id: DocumentId::new(document_id),
                actor_id: actor()?,
                patch,
                tag_ids,
                change_summary: summary,
            })?;
            serde_json::to_value(updated)?
        }
        Command::Show { document_id } => {
            serde_json::to_value(store.get_document(DocumentId::new(document_id), actor()?)?)?
        }
        Command::List { author, tags, page } => {
            let author_id = match author {
                Some(author) => UserId::new(author),
                None => actor()?,
            };
            serde_json::to_value(store.list_documents(ListDocumentsRequest {
                author_id,
                tag_ids: tag_set(&tags),
                page: page.page,
                page_size: page.page_size,
            })?)?
        }
        Command::History { document_id, page } => {
            serde_json::to_value(store.get_version_history(ListVersionsRequest {
                document_id: DocumentId::new(document_id),
                actor_id: actor()?,
                page: page.page,
                page_size: page.page_size,
            })?)?
        }
        Command::Version {
            document_id,
            version_number,
        } => serde_json::to_value(store.get_version(
            DocumentId::new(document_id),
            version_number,
            actor()?,
        )?)?,
        Command::Diff {
            document_id,
            from_version,
            to_version,
        } => serde_json::to_value(store.diff_versions(DiffVersionsRequest {
            document_id: DocumentId::new(document_id),
            actor_id: actor()?,
            from_version,
            to_version,
        })?)?,
        Command::Rollback {
            document_id,
            target_version,
        } => serde_json::to_value(store.rollback(RollbackRequest {
            document_id: DocumentId::new(document_id),
            target_version,
            actor_id: actor()?,
        })?)?,
        Command::Delete { document_id } => {
            store.delete_document(DocumentId::new(document_id), actor()?)?;
            json!({ "document_id": document_id, "deleted": true })
        }
        Command::Purge { document_id } => {
            store.purge_document(DocumentId::new(document_id), actor()?)?;
            json!({ "document_id": document_id, "purged": true })
        }
        Command::TagCreate {
            name,
            category,
            color,
            description,
        } => serde_json::to_value(store.create_tag(CreateTagRequest {
            name,
            category,
            color,
            description,
            created_by: user.map(UserId::new),
        })?)?,
        Command::Tags {
            category,
            popular,
            grouped,
        } => {
            if grouped {
                serde_json::to_value(store.tags_by_category()?)?
            } else if let Some(limit) = popular {
                serde_json::to_value(store.popular_tags(limit)?)?
            } else {
                serde_json::to_value(store.list_tags(ListTagsRequest {
                    category: category.as_deref().map(TagCategory::parse),
                })?)?
            }
        }
        Command::TagDelete { tag_id } => {
            store.delete_tag(TagId::new(tag_id))?;
            json!({ "tag_id": tag_id, "deleted": true })
        }
        Command::Share {
            document_id,
            user_id,
            permission,
        } => {
            let permission = Permission::parse(&permission)
                .ok_or_else(|| anyhow!("permission must be read, write or admin"))?;
            serde_json::to_value(store.grant_access(GrantAccessRequest {
                document_id: DocumentId::new(document_id),
                actor_id: actor()?,
                user_id: UserId::new(user_id),
                permission,
            })?)?
        }
        Command::Unshare {
            document_id,
            user_id,
        } => {
            store.revoke_access(
                DocumentId::new(document_id),
                actor()?,
                UserId::new(user_id),
            )?;
            json!({ "document_id": document_id, "user_id": user_id, "revoked": true })
        }
        Command::Collaborators { document_id } => {
            serde_json::to_value(store.list_collaborators(DocumentId::new(document_id), actor()?)?)?
        }
        Command::Events { document_id, limit } => {
            let events = store.list_events(DocumentId::new(document_id), limit)?;
            Value::Array(
                events
                    .into_iter()
                    .map(|event| {
                        let payload = serde_json::from_str::<Value>(&event.payload_json)
                            .unwrap_or(Value::Null);
                        json!({
                            "event_id": event.event_id(),
                            "ts_ms": event.ts_ms,
                            "actor_id": event.actor_id,
                            "action": event.action,
                            "payload": payload,
                        })
                    })
                    .collect(),
            )
        }
    };
    Ok(result)
}

fn read_content(args: &ContentArgs) -> anyhow::Result<Option<String>> {
    if let Some(path) = &args.content_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read content file {}", path.display()))?;
        return Ok(Some(raw));
    }
    Ok(args.content.clone())
}

fn tag_set(ids: &[i64]) -> BTreeSet<TagId> {
    ids.iter().copied().map(TagId::new).collect()
}
