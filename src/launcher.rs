//! Server process management.
//!
//! `start-server` spawns the current executable's `serve` subcommand as a
//! detached child, redirects its output to log files, and records the child
//! pid in a pid file under the logs directory. `stop-server` reads that
//! file and delivers SIGTERM to the recorded pid. A pid file whose process
//! is no longer alive is treated as stale and removed rather than signaled.

use std::fs::{File, OpenOptions};
use std::io::Read;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use thiserror::Error;

use crate::config::{Config, Environment};

#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("pid file not found: {0}")]
    PidFileMissing(PathBuf),

    #[error("malformed pid file {path}: {message}")]
    MalformedPidFile { path: PathBuf, message: String },

    #[error("server already running with pid {0}")]
    AlreadyRunning(i32),

    #[error("no process with pid {0}; removed stale pid file")]
    ProcessNotRunning(i32),

    #[error("failed to signal process {pid}: {source}")]
    Signal { pid: i32, source: nix::Error },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reads a pid from the first line of a pid file.
pub fn read_pid_file(path: &Path) -> Result<i32, LauncherError> {
    if !path.is_file() {
        return Err(LauncherError::PidFileMissing(path.to_path_buf()));
    }

    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;

    contents
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .parse::<i32>()
        .map_err(|e| LauncherError::MalformedPidFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Writes a pid to a pid file, replacing any previous contents.
pub fn write_pid_file(path: &Path, pid: i32) -> Result<(), LauncherError> {
    std::fs::write(path, format!("{}\n", pid))?;
    Ok(())
}

/// Whether a process with the given pid exists.
///
/// Uses the null signal; EPERM counts as alive (the process exists but
/// belongs to another user).
pub fn process_is_alive(pid: i32) -> bool {
    match kill(Pid::from_raw(pid), None) {
        Ok(()) => true,
        Err(Errno::ESRCH) => false,
        Err(_) => true,
    }
}

/// Starts the HTTP server as a detached background process.
///
/// Refuses to start when the pid file names a live process. Returns the
/// pid of the spawned child after recording it in the pid file.
pub fn start_server(
    config: &Config,
    mode: Environment,
    workers: Option<usize>,
) -> Result<i32, LauncherError> {
    let pid_file = config.pid_file();

    match read_pid_file(&pid_file) {
        Ok(pid) if process_is_alive(pid) => return Err(LauncherError::AlreadyRunning(pid)),
        Ok(_) | Err(LauncherError::MalformedPidFile { .. }) => {
            // Stale or unreadable leftover from a dead server.
            std::fs::remove_file(&pid_file)?;
        }
        Err(LauncherError::PidFileMissing(_)) => {}
        Err(err) => return Err(err),
    }

    let stdout = open_log(&config.server_log_file())?;
    let stderr = open_log(&config.server_err_file())?;

    let exe = std::env::current_exe()?;
    let mut command = Command::new(exe);
    command
        .arg("serve")
        .env("APP_ENV", mode.as_str())
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        // New process group, so the server outlives this CLI invocation and
        // does not receive the terminal's signals.
        .process_group(0);

    if let Some(workers) = workers {
        command.env("WORKERS", workers.to_string());
    }

    let child = command.spawn()?;
    let pid = child.id() as i32;

    write_pid_file(&pid_file, pid)?;

    Ok(pid)
}

/// Stops the background server recorded in the pid file.
///
/// Sends SIGTERM to the recorded pid and removes the pid file. A stale pid
/// file (recorded process no longer alive) is removed without signaling and
/// reported as an error.
pub fn stop_server(config: &Config) -> Result<i32, LauncherError> {
    let pid_file = config.pid_file();
    let pid = read_pid_file(&pid_file)?;

    if !process_is_alive(pid) {
        std::fs::remove_file(&pid_file)?;
        return Err(LauncherError::ProcessNotRunning(pid));
    }

    kill(Pid::from_raw(pid), Signal::SIGTERM)
        .map_err(|source| LauncherError::Signal { pid, source })?;

    std::fs::remove_file(&pid_file)?;

    Ok(pid)
}

/// Deletes all `.log` files in the logs directory. Returns how many files
/// were removed.
pub fn clear_logs(config: &Config) -> Result<usize, LauncherError> {
    if !config.logs_dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in std::fs::read_dir(&config.logs_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("log") {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }

    Ok(removed)
}

fn open_log(path: &Path) -> Result<File, LauncherError> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
