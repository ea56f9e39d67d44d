// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tsexam is a linter for Qt translation catalogs (`translation_<code>.ts`).
//!
//! It can report its findings on the terminal, or as review comments on the lines
//! changed by a GitHub pull request.
//!
//! The following sub-commands are available:
//!
//! - [`check`](#check-catalogs): check catalogs
//! - [`rules`](#rules): display rules used to check catalogs
//!
//! # Check catalogs
//!
//! The `check` command checks the catalogs given on command-line, or all catalogs
//! found in the catalog directory (`src/translation` by default).
//!
//! When a GitHub token, a repository and a pull request number are given (or set
//! in environment variables `GH_TOKEN`, `GITHUB_REPOSITORY` and `PR_NUMBER`), only
//! the warnings on lines changed by the pull request are kept, and they are posted
//! as review comments.
//!
//! The exit code is 0 if no warnings are found, 1 if warnings are found and 2 on
//! fatal errors.
//!
//! # Rules
//!
//! The `rules` command displays the rules used to check catalogs.

mod args;
mod checker;
mod config;
mod diagnostic;
mod diff;
mod dir;
mod github;
mod highlight;
mod result;
mod rules;
mod ts;

use clap::Parser;

use crate::args::{Cli, Command};
use crate::checker::run_check;
use crate::rules::rule::run_rules;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Cli::parse();
    let rc = match &args.command {
        Command::Check(args) => run_check(args),
        Command::Rules(args) => run_rules(args),
    };
    std::process::exit(rc);
}
