use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "simsync",
    version,
    about = "Keep a local simfile mirror in sync with the catalog site",
    long_about = "With no IDS, every known version is synced: listed simfiles are \
                  downloaded when missing locally or older than the catalog. With \
                  IDS, exactly those simfiles are downloaded regardless of freshness."
)]
pub struct Cli {
    #[arg(help = "Numeric simfile ids to force-install")]
    pub ids: Vec<String>,
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, help = "Catalog site base URL, or a mirror directory")]
    pub site: Option<String>,
    #[arg(long, help = "Local mirror root")]
    pub root: Option<PathBuf>,
    #[arg(long, help = "Log file, recreated on every run")]
    pub log_file: Option<PathBuf>,
    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout_secs: Option<u64>,
    #[arg(long, help = "Config file (default: ~/.config/simsync/config.toml)")]
    pub config: Option<PathBuf>,
    #[arg(
        long = "version-label",
        value_name = "LABEL",
        help = "Only sync this version (repeatable)"
    )]
    pub only: Vec<String>,
    #[arg(long, help = "Report decisions without downloading")]
    pub dry_run: bool,
    #[arg(
        long,
        value_name = "DIR",
        help = "Install here when a forced item's version is unknown"
    )]
    pub into: Option<PathBuf>,
    #[arg(long, help = "Print the known versions and exit")]
    pub list_versions: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(bad) = self
            .ids
            .iter()
            .find(|id| id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()))
        {
            anyhow::bail!("simfile id must be numeric: {}", bad);
        }
        if !self.ids.is_empty() && (!self.only.is_empty() || self.dry_run) {
            anyhow::bail!("--version-label and --dry-run apply to catalog syncs, not to forced ids");
        }
        Ok(())
    }
}
