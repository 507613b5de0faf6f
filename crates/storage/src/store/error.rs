#![forbid(unsafe_code)]

use dv_core::FieldError;
use dv_core::ids::{DocumentId, TagId};
use rusqlite::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(rusqlite::Error),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(rusqlite::Error),
    #[error("config: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("permission denied")]
    PermissionDenied,
    #[error("duplicate version (document={document_id}, version={version_number})")]
    DuplicateVersion {
        document_id: DocumentId,
        version_number: i64,
    },
    #[error("version conflict (document={document_id}, attempts={attempts})")]
    VersionConflict {
        document_id: DocumentId,
        attempts: u32,
    },
    #[error("dangling tag reference (tag={0})")]
    DanglingTagReference(TagId),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Sql(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidInput(message) if message.starts_with("RESET_REQUIRED") => {
                "RESET_REQUIRED"
            }
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::DuplicateVersion { .. } => "DUPLICATE_VERSION",
            Self::VersionConflict { .. } => "VERSION_CONFLICT",
            Self::DanglingTagReference(_) => "DANGLING_TAG_REFERENCE",
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        if is_busy(&value) {
            return Self::StorageUnavailable(value);
        }
        Self::Sql(value)
    }
}

impl From<FieldError> for StoreError {
    fn from(value: FieldError) -> Self {
        Self::InvalidInput(value.message())
    }
}

fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if matches!(code.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    )
}

pub(in crate::store) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, _) => {
            code.code == ErrorCode::ConstraintViolation
                && (code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}
