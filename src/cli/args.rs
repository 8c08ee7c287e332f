//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Locale-aware routes, untranslated fallbacks and redirects for static sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: i18n.toml)
    #[arg(short = 'C', long, global = true, default_value = "i18n.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a full pass: route table, fallbacks, redirects, page manifest
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Print the route table of the last build
    #[command(visible_alias = "r")]
    Routes {
        /// Only show this locale
        #[arg(short, long)]
        locale: Option<String>,

        /// Print as JSON (`route id -> locale -> url`)
        #[arg(long)]
        json: bool,
    },

    /// Find the route of a URL and print its localized destination
    #[command(visible_alias = "l")]
    Locate {
        /// URL path, as typed in a browser (`/it/chi-siamo/`)
        path: String,

        /// Target locale (default: the URL's own locale)
        #[arg(short, long)]
        locale: Option<String>,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Content directory (relative to project root), repeatable
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Vec<PathBuf>,

    /// Page manifest path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// `_redirects` path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub redirects: Option<PathBuf>,

    /// Do not emit splat redirects
    #[arg(long)]
    pub no_splat: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["i18n-routes", "-v", "build", "-c", "pages", "-c", "docs", "--no-splat"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("i18n.toml"));
        let Commands::Build { args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.content, [PathBuf::from("pages"), PathBuf::from("docs")]);
        assert!(args.no_splat);
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_parse_locate() {
        let cli = Cli::parse_from(["i18n-routes", "locate", "/it/chi-siamo/", "--locale", "en", "-C", "site/i18n.toml"]);
        assert_eq!(cli.config, PathBuf::from("site/i18n.toml"));
        let Commands::Locate { path, locale } = cli.command else {
            panic!("expected locate");
        };
        assert_eq!(path, "/it/chi-siamo/");
        assert_eq!(locale.as_deref(), Some("en"));
    }
}
