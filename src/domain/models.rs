use crate::domain::errors::SyncError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub type Instant = DateTime<Utc>;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub item_id: String,
    pub display_name: String,
    pub remote_timestamp: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VersionLabel {
    pub label: String,
    pub category_id: u64,
}

impl VersionLabel {
    pub fn new(label: &str, category_id: u64) -> Self {
        Self {
            label: label.to_string(),
            category_id,
        }
    }
}

/// Ordered list of known versions, most specific label first.
///
/// The order is load-bearing: classification takes the first label found in
/// the page text, so a label must never appear after a shorter label it
/// contains ("DDR A20 PLUS" before "DDR A20" before "DDR A").
#[derive(Debug, Clone, Serialize)]
pub struct VersionTable {
    labels: Vec<VersionLabel>,
}

impl VersionTable {
    pub fn new(labels: Vec<VersionLabel>) -> Result<Self, SyncError> {
        for (i, general) in labels.iter().enumerate() {
            if general.label.trim().is_empty() {
                return Err(SyncError::Config("empty version label".to_string()));
            }
            for specific in &labels[i + 1..] {
                if specific.label.contains(&general.label) {
                    return Err(SyncError::Config(format!(
                        "version '{}' must be listed before '{}'",
                        specific.label, general.label
                    )));
                }
            }
        }
        Ok(Self { labels })
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionLabel> {
        self.labels.iter()
    }

    pub fn get(&self, label: &str) -> Option<&VersionLabel> {
        self.labels.iter().find(|v| v.label == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    /// Legacy `.sm` chart, the primary format.
    Sm,
    /// `.ssc` chart; supersedes `.sm` when both are present.
    Ssc,
}

impl ChartFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Sm => "sm",
            ChartFormat::Ssc => "ssc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalArtifact {
    pub path: PathBuf,
    pub modified_at: Instant,
    pub format: ChartFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDecision {
    UpToDate,
    Missing,
    Outdated,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallResult {
    pub item_id: String,
    pub display_name: String,
    pub version: Option<String>,
    pub target_dir: PathBuf,
    pub extracted_files: usize,
    pub last_activity: Option<Instant>,
}

#[derive(Debug, Serialize)]
pub struct ItemReport {
    pub item_id: String,
    pub display_name: String,
    pub decision: Option<SyncDecision>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogReport {
    pub version: String,
    pub category_id: u64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub items: Vec<ItemReport>,
}

#[derive(Debug, Serialize)]
pub struct ForceReport {
    pub item_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed: Option<InstallResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub site: Option<String>,
    pub root: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub versions: Vec<VersionLabel>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub site: String,
    pub root: PathBuf,
    pub timeout_secs: u64,
    pub log_file: PathBuf,
    pub versions: VersionTable,
}
