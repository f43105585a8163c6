use crate::domain::errors::SyncError;
use crate::domain::models::{ChartFormat, LocalArtifact};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Chart files found on disk for one display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub sm: Option<PathBuf>,
    pub ssc: Option<PathBuf>,
}

/// Which file is authoritative, and which one (if any) it supersedes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: PathBuf,
    pub format: ChartFormat,
    pub superseded: Option<PathBuf>,
}

pub fn chart_path(root: &Path, display_name: &str, format: ChartFormat) -> PathBuf {
    root.join(display_name)
        .join(format!("{}.{}", display_name, format.extension()))
}

/// Looks up `root/<name>/<name>.sm` and `root/<name>/<name>.ssc`.
pub fn locate(root: &Path, display_name: &str) -> Candidates {
    let existing = |format: ChartFormat| {
        Some(chart_path(root, display_name, format)).filter(|p| p.is_file())
    };
    Candidates {
        sm: existing(ChartFormat::Sm),
        ssc: existing(ChartFormat::Ssc),
    }
}

/// Collapses the candidates to a single authoritative file. An `.ssc` chart
/// supersedes an `.sm` chart sitting next to it.
pub fn plan(candidates: Candidates) -> Option<Resolution> {
    match candidates {
        Candidates {
            sm: None,
            ssc: None,
        } => None,
        Candidates {
            sm: Some(path),
            ssc: None,
        } => Some(Resolution {
            path,
            format: ChartFormat::Sm,
            superseded: None,
        }),
        Candidates { sm, ssc: Some(path) } => Some(Resolution {
            path,
            format: ChartFormat::Ssc,
            superseded: sm,
        }),
    }
}

/// Deletes a superseded chart file. Returns whether a file was removed; a file
/// that is already gone is not an error.
pub fn prune_superseded(path: &Path) -> Result<bool, SyncError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!("removed superseded chart {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub fn modified_at(path: &Path) -> Result<DateTime<Utc>, SyncError> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}

/// Finds the stored chart for `display_name` under `root`, pruning a
/// superseded `.sm` when an `.ssc` exists alongside it.
pub fn resolve(root: &Path, display_name: &str) -> Result<Option<LocalArtifact>, SyncError> {
    let Some(resolution) = plan(locate(root, display_name)) else {
        return Ok(None);
    };
    if let Some(superseded) = &resolution.superseded {
        prune_superseded(superseded)?;
    }
    Ok(Some(LocalArtifact {
        modified_at: modified_at(&resolution.path)?,
        path: resolution.path,
        format: resolution.format,
    }))
}
