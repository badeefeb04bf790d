use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Stdin,
    Url(String),
}

impl DocumentSource {
    /// `-` is stdin, `http://` / `https://` is a URL, anything else a file path.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        if raw == "-" {
            DocumentSource::Stdin
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            DocumentSource::Url(raw.to_string())
        } else {
            DocumentSource::File(PathBuf::from(raw))
        }
    }

    /// Location recorded as the snapshot url.
    pub fn location(&self) -> String {
        match self {
            DocumentSource::File(path) => path.display().to_string(),
            DocumentSource::Stdin => "stdin".to_string(),
            DocumentSource::Url(url) => url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 { 30 }
fn default_user_agent() -> String { concat!("goal-resolver/", env!("CARGO_PKG_VERSION")).to_string() }

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Read the raw document text. No retries; the caller owns that policy.
pub fn load_document(source: &DocumentSource, fetch: &FetchConfig) -> Result<String, LoadError> {
    match source {
        DocumentSource::File(path) => std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        }),
        DocumentSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(LoadError::Stdin)?;
            Ok(buf)
        }
        DocumentSource::Url(url) => fetch_url(url, fetch),
    }
}

fn fetch_url(url: &str, fetch: &FetchConfig) -> Result<String, LoadError> {
    let http_err = |source: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .user_agent(fetch.user_agent.as_str())
        .build()
        .map_err(http_err)?;

    debug!(url, "fetching document");
    let response = client.get(url).send().map_err(http_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().map_err(http_err)
}
