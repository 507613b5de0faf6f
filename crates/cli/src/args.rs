#![forbid(unsafe_code)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use dv_storage::DanglingTagPolicy;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "docver", version)]
#[command(about = "Versioned documents with reconciled tag sets")]
pub(crate) struct Cli {
    /// YAML config file.
    #[arg(long, global = true, env = "DOCVER_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true)]
    pub max_version_attempts: Option<u32>,

    #[arg(long, global = true, value_enum)]
    pub dangling_tags: Option<DanglingTagsArg>,

    /// Acting user id. Required by every write and by reads of a document.
    #[arg(long = "as", global = true, env = "DOCVER_USER")]
    pub user: Option<i64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DanglingTagsArg {
    Skip,
    Reject,
}

impl From<DanglingTagsArg> for DanglingTagPolicy {
    fn from(value: DanglingTagsArg) -> Self {
        match value {
            DanglingTagsArg::Skip => DanglingTagPolicy::Skip,
            DanglingTagsArg::Reject => DanglingTagPolicy::Reject,
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Create a document; writes version 1.
    Create {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        content: ContentArgs,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "tag", value_name = "TAG_ID")]
        tags: Vec<i64>,
    },
    /// Update fields and/or replace the tag set.
    Update {
        document_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        content: ContentArgs,
        /// Pass an empty string to clear.
        #[arg(long)]
        description: Option<String>,
        /// Target tag set; omit to leave tags untouched.
        #[arg(long = "tag", value_name = "TAG_ID", conflicts_with = "clear_tags")]
        tags: Vec<i64>,
        #[arg(long)]
        clear_tags: bool,
        #[arg(long)]
        summary: Option<String>,
    },
    Show {
        document_id: i64,
    },
    /// Documents of one author (defaults to --as).
    List {
        #[arg(long)]
        author: Option<i64>,
        /// Only documents carrying any of these tags.
        #[arg(long = "tag", value_name = "TAG_ID")]
        tags: Vec<i64>,
        #[command(flatten)]
        page: PageArgs,
    },
    History {
        document_id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
    Version {
        document_id: i64,
        version_number: i64,
    },
    Diff {
        document_id: i64,
        from_version: i64,
        to_version: i64,
    },
    /// Append a new version carrying an earlier version's fields.
    Rollback {
        document_id: i64,
        target_version: i64,
    },
    Delete {
        document_id: i64,
    },
    /// Hard delete, including soft-deleted documents.
    Purge {
        document_id: i64,
    },
    TagCreate {
        name: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Tags {
        #[arg(long, conflicts_with_all = ["popular", "grouped"])]
        category: Option<String>,
        #[arg(long, value_name = "LIMIT", conflicts_with = "grouped")]
        popular: Option<usize>,
        #[arg(long)]
        grouped: bool,
    },
    TagDelete {
        tag_id: i64,
    },
    Share {
        document_id: i64,
        user_id: i64,
        /// read, write or admin.
        permission: String,
    },
    Unshare {
        document_id: i64,
        user_id: i64,
    },
    Collaborators {
        document_id: i64,
    },
    Events {
        document_id: i64,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Debug, Args)]
pub(crate) struct ContentArgs {
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,
    #[arg(long, value_name = "PATH")]
    pub content_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl Command {
    pub fn intent(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Show { .. } => "show",
            Self::List { .. } => "list",
            Self::History { .. } => "history",
            Self::Version { .. } => "version",
            Self::Diff { .. } => "diff",
            Self::Rollback { .. } => "rollback",
            Self::Delete { .. } => "delete",
            Self::Purge { .. } => "purge",
            Self::TagCreate { .. } => "tag_create",
            Self::Tags { .. } => "tags",
            Self::TagDelete { .. } => "tag_delete",
            Self::Share { .. } => "share",
            Self::Unshare { .. } => "unshare",
            Self::Collaborators { .. } => "collaborators",
            Self::Events { .. } => "events",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn update_parses_repeated_tags_and_global_flags() {
        let cli = Cli::try_parse_from([
            "docver", "update", "7", "--content", "new", "--tag", "1", "--tag", "4", "--as", "3",
            "--dangling-tags", "reject",
        ])
        .expect("parse");
        assert_eq!(cli.user, Some(3));
        assert_eq!(cli.dangling_tags, Some(DanglingTagsArg::Reject));
        match cli.command {
            Command::Update {
                document_id,
                content,
                tags,
                clear_tags,
                ..
            } => {
                assert_eq!(document_id, 7);
                assert_eq!(content.content.as_deref(), Some("new"));
                assert_eq!(tags, vec![1, 4]);
                assert!(!clear_tags);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn clear_tags_conflicts_with_explicit_tags() {
        let err = Cli::try_parse_from(["docver", "update", "7", "--tag", "1", "--clear-tags"])
            .expect_err("conflict");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
