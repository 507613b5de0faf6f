#![forbid(unsafe_code)]

use dv_storage::StoreError;
use serde_json::{Value, json};

pub(crate) fn ok(intent: &str, result: Value) -> Value {
    json!({
        "success": true,
        "intent": intent,
        "result": result,
        "error": null
    })
}

pub(crate) fn error(intent: &str, code: &str, message: &str, recovery: Option<&str>) -> Value {
    let mut error_obj = serde_json::Map::new();
    error_obj.insert("code".to_string(), Value::String(code.to_string()));
    error_obj.insert(
        "message".to_string(),
        Value::String(message.trim().to_string()),
    );
    if let Some(recovery) = recovery {
        error_obj.insert("recovery".to_string(), Value::String(recovery.to_string()));
    }
    json!({
        "success": false,
        "intent": intent,
        "result": null,
        "error": Value::Object(error_obj)
    })
}

/// Store errors keep their stable code; anything else is a usage problem.
pub(crate) fn from_error(intent: &str, err: &anyhow::Error) -> Value {
    match err.downcast_ref::<StoreError>() {
        Some(store_err) => error(
            intent,
            store_err.code(),
            &format!("{err:#}"),
            recovery_hint(store_err),
        ),
        None => error(intent, "INVALID_INPUT", &format!("{err:#}"), None),
    }
}

pub(crate) fn is_success(response: &Value) -> bool {
    response.get("success").and_then(Value::as_bool) == Some(true)
}

fn recovery_hint(err: &StoreError) -> Option<&'static str> {
    match err {
        StoreError::VersionConflict { .. } => Some("Re-read the document and retry the update."),
        StoreError::StorageUnavailable(_) => {
            Some("Another writer holds the database; retry shortly.")
        }
        StoreError::DanglingTagReference(_) => {
            Some("List tags with `docver tags` and drop unknown ids.")
        }
        StoreError::InvalidInput(message) if message.starts_with("RESET_REQUIRED") => {
            Some("Point --storage-dir at a fresh directory.")
        }
        _ => None,
    }
}
