use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    if let Ok(s) = std::env::var("PAYWAVE_DATA") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "paywave", "paywave") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Get the config directory for the application.
pub fn get_config_dir() -> PathBuf {
    if let Ok(s) = std::env::var("PAYWAVE_CONFIG") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "paywave", "paywave") {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

/// Which data backend serves the record store and identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-memory seeded data with simulated latency.
    Mock,
    /// The hosted record API.
    Remote,
}

/// Connection settings for the record API and identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub project_id: String,
    pub public_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendKind,
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::mock()
    }
}

impl Config {
    /// Create config from CLI args.
    ///
    /// The project id and public key come from the `PAYWAVE_PROJECT_ID` and
    /// `PAYWAVE_PUBLIC_KEY` environment variables; they are only required
    /// when the remote backend is selected.
    pub fn new(backend: &str, api_url: Option<&str>) -> Self {
        let mut config = Self::from_backend(backend);
        if let Some(url) = api_url {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
        config
    }

    pub fn mock() -> Self {
        Self {
            backend: BackendKind::Mock,
            api: ApiConfig {
                base_url: String::new(),
                project_id: String::new(),
                public_key: String::new(),
            },
        }
    }

    pub fn remote() -> Self {
        Self {
            backend: BackendKind::Remote,
            api: ApiConfig {
                base_url: "https://api.paywave.dev/v1".to_string(),
                project_id: std::env::var("PAYWAVE_PROJECT_ID").unwrap_or_default(),
                public_key: std::env::var("PAYWAVE_PUBLIC_KEY").unwrap_or_default(),
            },
        }
    }

    pub fn from_backend(backend: &str) -> Self {
        match backend {
            "remote" => Self::remote(),
            _ => Self::mock(),
        }
    }
}
