use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub notes_root: PathBuf,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// `host:port` as used in log lines and URLs.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8800,
            notes_root: PathBuf::from("."),
            max_body_bytes: 1024 * 1024,
        }
    }
}
