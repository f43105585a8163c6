use crate::domain::constants::{
    default_versions, DEFAULT_LOG_FILE, DEFAULT_ROOT, DEFAULT_SITE, DEFAULT_TIMEOUT_SECS,
};
use crate::domain::models::{ConfigFile, Settings, VersionTable};
use std::path::{Path, PathBuf};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub site: Option<String>,
    pub root: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/simsync/config.toml"))
}

/// Reads the config file. An explicitly named file must exist; the default
/// location is optional.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Ok(p) if p.exists() => p,
            _ => return Ok(ConfigFile::default()),
        },
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
    Ok(toml::from_str(&raw)?)
}

pub fn settings(file: ConfigFile, overrides: Overrides) -> anyhow::Result<Settings> {
    let versions = if file.versions.is_empty() {
        default_versions()
    } else {
        file.versions
    };
    Ok(Settings {
        site: overrides
            .site
            .or(file.site)
            .unwrap_or_else(|| DEFAULT_SITE.to_string()),
        root: overrides
            .root
            .or(file.root)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
        timeout_secs: overrides
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
        log_file: overrides
            .log_file
            .or(file.log_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        versions: VersionTable::new(versions)?,
    })
}
