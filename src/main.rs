use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;
mod site;

use cli::Cli;
use commands::handle_mirror_commands;
use services::config::{load_config, settings, Overrides};
use services::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    let file = load_config(cli.config.as_deref())?;
    let settings = settings(
        file,
        Overrides {
            site: cli.site.clone(),
            root: cli.root.clone(),
            timeout_secs: cli.timeout_secs,
            log_file: cli.log_file.clone(),
        },
    )?;
    init_logging(&settings.log_file, cli.json)?;

    handle_mirror_commands(&cli, &settings)
}
