//! Application configuration loaded from environment variables.
//!
//! Two profiles are supported, selected by `APP_ENV`: `development` (the
//! default) and `production`. The development profile fills in permissive
//! defaults so the application runs without any environment set up; the
//! production profile requires an explicit secret key.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

/// Deployment profile for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidValue {
                var: "APP_ENV".to_string(),
                message: format!("unknown environment `{}`", other),
            }),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment profile (`APP_ENV`)
    pub env: Environment,
    /// Application name, used for file names under the logs directory
    pub app_name: String,
    pub host: String,
    pub port: u16,
    /// Number of HTTP server workers
    pub workers: usize,
    /// Directory holding application data, including the SQLite database
    pub content_dir: PathBuf,
    /// Directory holding log files and the server pid file
    pub logs_dir: PathBuf,
    /// Database connection string; defaults to a SQLite file in `content_dir`
    pub database_url: String,
    /// Secret key for signing; required in production
    pub secret_key: String,
    /// Login token lifetime hint, in seconds
    pub session_expire_secs: i64,
    /// Disables the authentication guard entirely (unit testing only)
    pub login_disabled: bool,
    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,
    /// Verbose diagnostics (true in development)
    pub debug: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Secret key used when none is configured in development.
const DEV_SECRET_KEY: &str = "dev-secret";

fn parse_var<T: FromStr>(var: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    env::var(var)
        .ok()
        .map(|v| {
            v.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                var: var.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ok if it doesn't exist)
        // Skip loading .env in test mode to allow tests to control env vars
        if env::var("TEAMBASE_TEST_MODE").is_err() {
            dotenvy::dotenv().ok();
        }

        let env_profile = match env::var("APP_ENV") {
            Ok(value) => value.parse::<Environment>()?,
            Err(_) => Environment::Development,
        };

        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "teambase".to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var::<u16>("PORT")?.unwrap_or(5000);
        let workers = parse_var::<usize>("WORKERS")?.unwrap_or(1);

        let content_dir = env::var("CONTENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./content"));
        let logs_dir = env::var("LOGS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./logs"));

        // SQLite database file lives in the content directory unless a full
        // connection string is given.
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => format!(
                "sqlite://{}",
                content_dir.join(format!("{}.db", app_name)).display()
            ),
        };

        let secret_key = match env::var("SECRET_KEY") {
            Ok(key) => key,
            Err(_) if env_profile == Environment::Development => DEV_SECRET_KEY.to_string(),
            Err(_) => return Err(ConfigError::MissingVar("SECRET_KEY".to_string())),
        };

        let session_expire_secs = parse_var::<i64>("SESSION_EXPIRE_SECS")?.unwrap_or(43200);

        let login_disabled = match env::var("LOGIN_DISABLED") {
            Ok(value) => matches!(value.as_str(), "1" | "true" | "yes"),
            Err(_) => false,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let debug = env_profile == Environment::Development;

        Ok(Config {
            env: env_profile,
            app_name,
            host,
            port,
            workers,
            content_dir,
            logs_dir,
            database_url,
            secret_key,
            session_expire_secs,
            login_disabled,
            cors_origins,
            debug,
        })
    }

    /// Creates the content and logs directories if they do not exist.
    ///
    /// Must be called before anything touches the database file or the pid
    /// file.
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        for dir in [&self.content_dir, &self.logs_dir] {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pid file written by `start-server` and read by `stop-server`.
    pub fn pid_file(&self) -> PathBuf {
        self.logs_dir.join(format!("{}-server.pid", self.app_name))
    }

    /// Stdout of the detached server process.
    pub fn server_log_file(&self) -> PathBuf {
        self.logs_dir.join(format!("{}-server.log", self.app_name))
    }

    /// Stderr of the detached server process.
    pub fn server_err_file(&self) -> PathBuf {
        self.logs_dir
            .join(format!("{}-server.err.log", self.app_name))
    }

    /// Filesystem path of the SQLite database, if `database_url` points at one.
    pub fn database_path(&self) -> Option<&Path> {
        self.database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))
            .map(Path::new)
    }
}
