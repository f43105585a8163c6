#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("unexpected page structure: {0}")]
    Parse(String),
    #[error("unrecognised timestamp: {0}")]
    Format(String),
    #[error("no last-updated date found for simfile {item_id} ({display_name})")]
    DataIntegrity {
        item_id: String,
        display_name: String,
    },
    #[error("archive extraction failed: {0}")]
    Extract(String),
    #[error("could not determine version for simfile {item_id} ({display_name})")]
    VersionNotFound {
        item_id: String,
        display_name: String,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SyncError {
    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        SyncError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
