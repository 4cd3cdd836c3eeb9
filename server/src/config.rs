use std::path::PathBuf;

use error_stack::{Report, ResultExt};

use kernel::KernelError;

static SERVER_PORT: &str = "SERVER_PORT";
static LOG_DIR: &str = "LOG_DIR";
static RUST_LOG: &str = "RUST_LOG";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_DIR: &str = "./logs/";
const DEFAULT_LOG_FILTER: &str =
    "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

impl ServerConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let port = match lookup(SERVER_PORT) {
            Some(port) => port
                .parse::<u16>()
                .change_context_lazy(|| KernelError::InvalidArgument)
                .attach_printable_lazy(|| format!("{SERVER_PORT} must be a port number"))?,
            None => DEFAULT_PORT,
        };
        let log_dir = lookup(LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        let log_filter = lookup(RUST_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        if log_filter.trim().is_empty() {
            return Err(Report::new(KernelError::InvalidArgument)
                .attach_printable(format!("{RUST_LOG} must not be empty")));
        }
        Ok(Self {
            port,
            log_dir,
            log_filter,
        })
    }
}
