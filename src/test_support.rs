//! Helpers shared by unit tests.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh directory under the system temp dir; callers remove it when done.
pub(crate) fn make_temp_dir(prefix: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be after UNIX_EPOCH")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("wikidiff-{}-{}-{}", prefix, std::process::id(), ts));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}
