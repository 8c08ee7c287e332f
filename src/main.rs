//! i18n-routes - locale-aware routes, fallbacks and redirects for static sites.

use std::sync::Arc;

use anyhow::Result;
use clap::{ColorChoice, Parser};

use i18n_routes::cli::{self, Cli, Commands};
use i18n_routes::config::Options;
use i18n_routes::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let options = Options::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_routes(Arc::new(options)).map(|_| ()),
        Commands::Routes { locale, json } => {
            cli::routes::print_routes(&options, locale.as_deref(), *json)
        }
        Commands::Locate { path, locale } => cli::locate::locate(&options, path, locale.as_deref()),
    }
}
