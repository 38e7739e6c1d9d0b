//! Tests for the `tastebook-config` loader.
//!
//! These exercise default handling, file discovery via `TASTEBOOK_CONFIG`,
//! and environment overrides.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use tastebook_config::load;

const ENV_VARS_TO_RESET: &[&str] = &[
    "TASTEBOOK_CONFIG",
    "TASTEBOOK__AUTH__SESSION_TTL_SECONDS",
    "TASTEBOOK__DATABASE__MAX_CONNECTIONS",
    "TASTEBOOK__DATABASE__URL",
    "TASTEBOOK__HTTP__ADDRESS",
    "TASTEBOOK__HTTP__PORT",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
}

impl TestContext {
    fn new() -> Self {
        let mut ctx = Self { vars: Vec::new() };
        for key in ENV_VARS_TO_RESET {
            ctx.remove_var(key);
        }
        ctx
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        for (key, previous) in self.vars.drain(..).rev() {
            match previous {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

#[test]
#[serial]
fn load_returns_defaults_without_sources() {
    let _ctx = TestContext::new();

    let config = load().expect("defaults should load");

    assert_eq!(config.http.address, "127.0.0.1");
    assert_eq!(config.http.port, 8080);
    assert_eq!(config.database.url, "sqlite://tastebook.db");
    assert_eq!(config.database.max_connections, 10);
    assert_eq!(config.auth.session_ttl_seconds, 86_400);
}

#[test]
#[serial]
fn load_reads_file_named_by_env_var() {
    let mut ctx = TestContext::new();
    let temp_dir = TempDir::new().expect("create temp dir");
    let path: PathBuf = temp_dir.path().join("tastebook.toml");
    fs::write(
        &path,
        r#"
[http]
address = "0.0.0.0"
port = 9090

[database]
url = "sqlite://custom.db"
max_connections = 3
"#,
    )
    .expect("write config file");

    ctx.set_var("TASTEBOOK_CONFIG", path.to_string_lossy());

    let config = load().expect("file-backed config should load");

    assert_eq!(config.http.address, "0.0.0.0");
    assert_eq!(config.http.port, 9090);
    assert_eq!(config.database.url, "sqlite://custom.db");
    assert_eq!(config.database.max_connections, 3);
    assert_eq!(config.auth.session_ttl_seconds, 86_400);
}

#[test]
#[serial]
fn environment_overrides_win_over_defaults() {
    let mut ctx = TestContext::new();
    ctx.set_var("TASTEBOOK__HTTP__PORT", "7171");
    ctx.set_var("TASTEBOOK__DATABASE__URL", "sqlite://:memory:");
    ctx.set_var("TASTEBOOK__AUTH__SESSION_TTL_SECONDS", "3600");

    let config = load().expect("env-backed config should load");

    assert_eq!(config.http.port, 7171);
    assert_eq!(config.database.url, "sqlite://:memory:");
    assert_eq!(config.auth.session_ttl_seconds, 3_600);
}

#[test]
#[serial]
fn environment_overrides_win_over_file() {
    let mut ctx = TestContext::new();
    let temp_dir = TempDir::new().expect("create temp dir");
    let path: PathBuf = temp_dir.path().join("tastebook.toml");
    fs::write(
        &path,
        r#"
[http]
port = 9090
"#,
    )
    .expect("write config file");

    ctx.set_var("TASTEBOOK_CONFIG", path.to_string_lossy());
    ctx.set_var("TASTEBOOK__HTTP__PORT", "6161");

    let config = load().expect("config should load");

    assert_eq!(config.http.port, 6161);
}
