//! Runtime configuration.
//!
//! Every key is optional in the TOML file; missing keys take the defaults
//! below. Command-line flags override the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::protocol::DEFAULT_PORT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app_name: String,
    pub port: u16,

    /// Host and port participants reach the server through, when it sits
    /// behind a proxy.
    pub proxy_scheme: String,
    pub proxy_host: String,
    pub proxy_port: Option<u16>,

    /// `ws` or `wss`.
    pub ws_scheme: String,
    /// Seconds between client reconnection attempts.
    pub ws_reconnect_interval: u64,
    /// Seconds between server pings.
    pub ping_sleep: u64,
    /// Seconds without a pong before a connection is dropped.
    pub ping_timeout: u64,

    pub user_scalable_viewport: bool,

    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Alternatives".to_string(),
            port: DEFAULT_PORT,
            proxy_scheme: "http".to_string(),
            proxy_host: "localhost".to_string(),
            proxy_port: None,
            ws_scheme: "ws".to_string(),
            ws_reconnect_interval: 55,
            ping_sleep: 10,
            ping_timeout: 20,
            user_scalable_viewport: false,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| Error::config(path, e.to_string()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if !matches!(self.ws_scheme.as_str(), "ws" | "wss") {
            return Err(Error::config(
                path,
                format!("ws_scheme must be \"ws\" or \"wss\", found {:?}", self.ws_scheme),
            ));
        }
        if self.ping_sleep == 0 || self.ping_timeout < self.ping_sleep {
            return Err(Error::config(
                path,
                "ping_sleep must be positive and no larger than ping_timeout",
            ));
        }
        Ok(())
    }

    /// Public URL of the server, as seen from outside the proxy.
    pub fn proxy_url(&self) -> String {
        match self.proxy_port {
            Some(port) => format!("{}://{}:{}", self.proxy_scheme, self.proxy_host, port),
            None => format!("{}://{}", self.proxy_scheme, self.proxy_host),
        }
    }

    pub fn ws_url(&self, host: &str, port: u16) -> String {
        format!("{}://{}:{}", self.ws_scheme, host, port)
    }

    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_secs(self.ws_reconnect_interval)
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_sleep)
    }

    pub fn pong_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout)
    }
}
