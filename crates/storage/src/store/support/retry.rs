#![forbid(unsafe_code)]

use super::super::StoreError;
use dv_core::ids::DocumentId;
use tracing::{error, warn};

/// Runs `attempt` until it stops failing with `DuplicateVersion`, at most
/// `max_attempts` times. Each attempt must open its own transaction so the
/// version number is re-read from the ledger; a failed attempt's transaction
/// has already rolled back by the time it returns.
pub(in crate::store) fn with_version_retry<T>(
    document_id: DocumentId,
    max_attempts: u32,
    mut attempt: impl FnMut(u32) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let max_attempts = max_attempts.max(1);
    let mut current = 1u32;
    loop {
        match attempt(current) {
            Err(StoreError::DuplicateVersion { version_number, .. }) => {
                if current >= max_attempts {
                    error!(
                        document_id = document_id.get(),
                        version_number,
                        attempts = current,
                        "version numbering retries exhausted"
                    );
                    return Err(StoreError::VersionConflict {
                        document_id,
                        attempts: current,
                    });
                }
                warn!(
                    document_id = document_id.get(),
                    version_number,
                    attempt = current,
                    "version number already taken; retrying"
                );
                current += 1;
            }
            other => return other,
        }
    }
}
