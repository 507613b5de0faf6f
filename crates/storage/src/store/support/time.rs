#![forbid(unsafe_code)]

use std::time::{SystemTime, UNIX_EPOCH};

pub(in crate::store) fn now_ms() -> i64 {
    let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration,
        Err(_) => return 0,
    };

    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}
