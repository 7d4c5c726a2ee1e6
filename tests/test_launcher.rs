//! Integration tests for pid-file based server process management.

use std::path::PathBuf;

use tempfile::TempDir;

use teambase::config::{Config, Environment};
use teambase::launcher::{
    clear_logs, process_is_alive, read_pid_file, stop_server, write_pid_file, LauncherError,
};

/// A pid far above any real pid_max, guaranteed not to exist.
const DEAD_PID: i32 = 999_999_999;

fn config_with_logs_dir(logs_dir: PathBuf) -> Config {
    Config {
        env: Environment::Development,
        app_name: "teambase".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        workers: 1,
        content_dir: logs_dir.clone(),
        logs_dir,
        database_url: "sqlite::memory:".to_string(),
        secret_key: "test-secret".to_string(),
        session_expire_secs: 43200,
        login_disabled: false,
        cors_origins: vec!["*".to_string()],
        debug: true,
    }
}

#[test]
fn test_stop_server_without_pid_file() {
    let dir = TempDir::new().expect("Failed to create tempdir");
    let config = config_with_logs_dir(dir.path().to_path_buf());

    let result = stop_server(&config);
    assert!(matches!(result, Err(LauncherError::PidFileMissing(_))));
}

#[test]
fn test_stop_server_removes_stale_pid_file() {
    let dir = TempDir::new().expect("Failed to create tempdir");
    let config = config_with_logs_dir(dir.path().to_path_buf());

    write_pid_file(&config.pid_file(), DEAD_PID).expect("Failed to write pid file");
    assert!(!process_is_alive(DEAD_PID));

    let result = stop_server(&config);
    assert!(matches!(
        result,
        Err(LauncherError::ProcessNotRunning(pid)) if pid == DEAD_PID
    ));

    // The stale file is gone, so a later start is not blocked
    assert!(!config.pid_file().exists());
}

#[test]
fn test_stop_server_rejects_malformed_pid_file() {
    let dir = TempDir::new().expect("Failed to create tempdir");
    let config = config_with_logs_dir(dir.path().to_path_buf());

    std::fs::write(config.pid_file(), "garbage\n").expect("Failed to write pid file");

    let result = stop_server(&config);
    assert!(matches!(
        result,
        Err(LauncherError::MalformedPidFile { .. })
    ));
}

#[test]
fn test_pid_file_records_launched_process() {
    // Starting the server records the launched process id in the pid file.
    // Exercised with the pid-file primitives against a process known to be
    // alive (ourselves).
    let dir = TempDir::new().expect("Failed to create tempdir");
    let config = config_with_logs_dir(dir.path().to_path_buf());

    let own_pid = std::process::id() as i32;
    write_pid_file(&config.pid_file(), own_pid).expect("Failed to write pid file");

    let recorded = read_pid_file(&config.pid_file()).expect("Failed to read pid file");
    assert_eq!(recorded, own_pid);
    assert!(process_is_alive(recorded));
}

#[test]
fn test_clear_logs_only_removes_log_files() {
    let dir = TempDir::new().expect("Failed to create tempdir");
    let config = config_with_logs_dir(dir.path().to_path_buf());

    std::fs::write(dir.path().join("teambase-server.log"), "out").expect("write failed");
    std::fs::write(dir.path().join("teambase-server.err.log"), "err").expect("write failed");
    std::fs::write(dir.path().join("teambase-server.pid"), "123\n").expect("write failed");

    let removed = clear_logs(&config).expect("Failed to clear logs");
    assert_eq!(removed, 2);

    // The pid file survives
    assert!(config.pid_file().exists());
    assert!(!dir.path().join("teambase-server.log").exists());
}

#[test]
fn test_clear_logs_with_missing_directory() {
    let dir = TempDir::new().expect("Failed to create tempdir");
    let config = config_with_logs_dir(dir.path().join("never-created"));

    assert_eq!(clear_logs(&config).expect("Failed to clear logs"), 0);
}
