// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    name = "tsexam",
    about = "Linter for Qt translation catalogs (.ts).",
    after_help = "For help with a specific command, see: `tsexam help <command>`."
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check catalogs
    Check(CheckArgs),

    /// Display rules used to check catalogs
    Rules(RulesArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// List of catalogs to check
    #[clap(help = "List of catalogs to check [default: all catalogs in the catalog directory]")]
    pub files: Vec<PathBuf>,

    /// Directory with the catalogs (`translation_<code>.ts`) [default: src/translation]
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Config file [default: tsexam.toml if it exists]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Display settings used to check files
    #[arg(long)]
    pub show_settings: bool,

    /// Do not check obsolete and vanished messages (checked by default)
    #[arg(long)]
    pub skip_obsolete: bool,

    /// Select rules to apply (comma-separated list), the special rule "all" can be used to select all rules
    #[arg(short, long)]
    pub select: Option<String>,

    /// Ignore rules (comma-separated list)
    #[arg(short, long)]
    pub ignore: Option<String>,

    /// Do not display the summary
    #[arg(long)]
    pub no_summary: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Quiet mode: do not report any error, only set the exit code
    #[arg(short, long)]
    pub quiet: bool,

    /// Token for the GitHub API (pull request mode)
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository with the pull request, as `owner/name` (pull request mode)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Number of the pull request to review (pull request mode)
    #[arg(long, env = "PR_NUMBER")]
    pub pr_number: Option<String>,

    /// Base URL of the GitHub API [default: https://api.github.com]
    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,
}

/// Arguments for the `rules` command.
#[derive(Debug, Args)]
pub struct RulesArgs {}

/// Output format.
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    /// Human readable text format
    Human,

    /// JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
