use std::path::Path;
use std::process::{Command, Output};

use rusqlite::Connection;
use tempfile::TempDir;

/// Run the built binary inside `dir` with an isolated config home.
fn sqlmigrate(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlmigrate"))
        .args(args)
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SQLMIGRATE_CONFIG")
        .output()
        .expect("failed to run sqlmigrate")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Messages of the log lines emitted at `level`, in order.
fn messages_at<'a>(log: &'a str, level: &str) -> Vec<&'a str> {
    let marker = format!(" {level} ");
    log.lines()
        .filter_map(|line| line.split_once(marker.as_str()).map(|(_, msg)| msg))
        .collect()
}

fn table_names(db: &Path) -> Vec<String> {
    let conn = Connection::open(db).unwrap();
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn applies_migration_file_and_logs_success() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("001.sql"),
        "CREATE TABLE t (x INTEGER);\n\nINSERT INTO t VALUES (1);",
    )
    .unwrap();

    let output = sqlmigrate(&dir, &["001.sql", "app.db"]);
    let log = stderr(&output);
    assert!(output.status.success(), "{log}");
    assert!(log.contains("CREATE TABLE t (x INTEGER);"));
    assert!(log.contains("INSERT INTO t VALUES (1);"));
    assert!(
        log.trim_end()
            .lines()
            .last()
            .unwrap()
            .contains("Migration successfully applied.")
    );
    assert_eq!(
        messages_at(&log, "INFO"),
        vec![
            "Running statement 1/2:",
            "Running statement 2/2:",
            "Migration successfully applied.",
        ]
    );
    assert!(messages_at(&log, "WARN").is_empty(), "{log}");
    assert!(messages_at(&log, "ERROR").is_empty(), "{log}");

    let conn = Connection::open(dir.path().join("app.db")).unwrap();
    let x: i64 = conn.query_row("SELECT x FROM t", [], |row| row.get(0)).unwrap();
    assert_eq!(x, 1);
}

#[test]
fn failing_statement_exits_non_zero_and_rolls_back() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("001.sql"),
        "CREATE TABLE t (x INTEGER);\n\nINSERT INTO nonexistent VALUES (1);",
    )
    .unwrap();

    let output = sqlmigrate(&dir, &["001.sql", "app.db"]);
    let log = stderr(&output);
    assert!(!output.status.success());
    assert!(!log.contains("Migration successfully applied."));
    assert_eq!(
        messages_at(&log, "INFO"),
        vec!["Running statement 1/2:", "Running statement 2/2:"]
    );
    let errors = messages_at(&log, "ERROR");
    assert_eq!(errors.len(), 1, "{log}");
    assert!(
        errors[0].starts_with("migration aborted, changes rolled back: statement 2 failed"),
        "{log}"
    );

    assert!(table_names(&dir.path().join("app.db")).is_empty());
}

#[test]
fn missing_migration_file_exits_non_zero() {
    let dir = TempDir::new().unwrap();

    let output = sqlmigrate(&dir, &["absent.sql", "app.db"]);
    assert!(!output.status.success());
    let log = stderr(&output);
    let errors = messages_at(&log, "ERROR");
    assert_eq!(errors.len(), 1, "{log}");
    assert!(errors[0].contains("absent.sql"));
    assert!(messages_at(&log, "INFO").is_empty(), "{log}");
}

#[test]
fn no_arguments_apply_embedded_schema_to_juju_db() {
    let dir = TempDir::new().unwrap();

    let output = sqlmigrate(&dir, &[]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        table_names(&dir.path().join("juju.db")),
        vec!["filesystem", "machine", "machine_filesystem"]
    );

    // Second run against the same file is a no-op.
    let output = sqlmigrate(&dir, &[]);
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn config_file_changes_default_database() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("sqlmigrate.toml"),
        "default_database = \"sqlite.db\"\n",
    )
    .unwrap();

    let output = sqlmigrate(&dir, &["--config", "sqlmigrate.toml"]);
    let log = stderr(&output);
    assert!(output.status.success(), "{log}");
    assert!(!log.contains("loaded config"), "{log}");
    assert!(!log.contains("opening database"), "{log}");
    assert!(dir.path().join("sqlite.db").exists());
    assert!(!dir.path().join("juju.db").exists());
}

#[test]
fn dry_run_prints_plan_without_creating_database() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("001.sql"), "SELECT 1;\n\nSELECT 2;").unwrap();

    let output = sqlmigrate(&dir, &["--dry-run", "001.sql", "app.db"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-- [1/2]\nSELECT 1;"));
    assert!(stdout.contains("-- [2/2]\nSELECT 2;"));
    assert!(!dir.path().join("app.db").exists());
}

#[test]
fn migration_file_without_database_is_a_usage_error() {
    let dir = TempDir::new().unwrap();

    let output = sqlmigrate(&dir, &["001.sql"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn json_log_format_emits_json_lines() {
    let dir = TempDir::new().unwrap();

    let output = sqlmigrate(&dir, &["--log-format", "json"]);
    assert!(output.status.success());
    let log = stderr(&output);
    let last = log.trim_end().lines().last().unwrap();
    assert!(last.starts_with('{'), "{last}");
    assert!(last.contains("Migration successfully applied."));
}
