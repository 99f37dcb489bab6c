use serde::Serialize;
use std::{path::PathBuf, sync::Once};
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Writes `value` as JSON into `dir` and returns the file's path.
pub fn write_json<T: Serialize>(dir: &TempDir, name: &str, value: &T) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}
