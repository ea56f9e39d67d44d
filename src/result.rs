// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display check result, or post it as review comments on a pull request.

use std::{collections::BTreeMap, path::Path, time::Duration};

use colored::Colorize;
use log::{debug, info};

use crate::{
    args,
    checker::CheckResult,
    diagnostic::Diagnostic,
    diff::DiffIndex,
    github::{GithubError, ReviewComment, ReviewService},
};

/// Sort diagnostics by path and line number.
fn sorted_diagnostics(result: &[CheckResult]) -> Vec<&Diagnostic> {
    let mut diags: Vec<&Diagnostic> = result.iter().flat_map(|x| &x.1).collect();
    diags.sort_by_key(|diag| (diag.path.as_path(), diag.line_number));
    diags
}

/// Format diagnostics in the requested output format.
fn format_diagnostics(diags: &[&Diagnostic], output: &args::OutputFormat) -> String {
    match output {
        args::OutputFormat::Human => diags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        args::OutputFormat::Json => serde_json::to_string(diags).unwrap_or_default(),
    }
}

/// Display file statistics.
fn display_file_stats(result: &[CheckResult]) {
    for (filename, diags) in result {
        if diags.is_empty() {
            println!("{}: all OK!", filename.display());
        } else {
            println!("{}: {} warnings", filename.display(), diags.len());
        }
    }
}

/// Display the result of the checks and return the appropriate exit code.
pub fn display_result(result: &[CheckResult], args: &args::CheckArgs, elapsed: &Duration) -> i32 {
    let count_warnings: usize = result.iter().map(|(_, diags)| diags.len()).sum();
    if !args.quiet {
        let diags = sorted_diagnostics(result);
        match args.output {
            args::OutputFormat::Human => {
                if !diags.is_empty() {
                    println!("{}", format_diagnostics(&diags, &args.output));
                }
                if !args.no_summary {
                    if count_warnings > 0 {
                        println!();
                    }
                    display_file_stats(result);
                    println!(
                        "{} files checked, total warnings: {count_warnings} [{elapsed:?}]",
                        result.len()
                    );
                }
            }
            args::OutputFormat::Json => {
                println!("{}", format_diagnostics(&diags, &args.output));
            }
        }
    }
    i32::from(count_warnings > 0)
}

/// Diagnostics retained for a pull request.
#[derive(Debug, Default)]
struct Review<'a> {
    /// Diagnostics on lines of the diff, grouped by file and line.
    comments: BTreeMap<(&'a str, usize), Vec<&'a Diagnostic>>,
    /// Diagnostics without line (line 0) in files changed by the pull request.
    unanchored: Vec<&'a Diagnostic>,
}

impl<'a> Review<'a> {
    /// Keep only diagnostics on files and lines changed in the pull request.
    fn new(result: &'a [CheckResult], index: &'a DiffIndex) -> Self {
        let mut review = Review::default();
        for diag in sorted_diagnostics(result) {
            let Some(repository_path) = index.repository_path(&diag.path) else {
                continue;
            };
            if diag.line_number == 0 {
                review.unanchored.push(diag);
            } else if index.contains(&diag.path, diag.line_number) {
                review
                    .comments
                    .entry((repository_path, diag.line_number))
                    .or_default()
                    .push(diag);
            }
        }
        review
    }

    fn count_diagnostics(&self) -> usize {
        self.unanchored.len() + self.comments.values().map(Vec::len).sum::<usize>()
    }
}

/// Post the diagnostics on lines changed by the pull request as review comments.
///
/// Diagnostics on other lines are ignored. Failing to post a comment is not fatal:
/// a warning is displayed and the other comments are posted. Diagnostics without
/// line in the changed catalogs are displayed in the requested output format.
pub fn run_review<S: ReviewService>(
    service: &S,
    result: &[CheckResult],
    dir: &Path,
    args: &args::CheckArgs,
) -> Result<i32, GithubError> {
    let commit_id = service.head_sha()?;
    let files = service.changed_files()?;
    let index = DiffIndex::new(&files, dir);
    if index.is_empty() {
        info!("no catalog changed in pull request");
    } else {
        info!("{} catalogs changed in pull request", index.len());
    }
    let review = Review::new(result, &index);
    // Diagnostics without line can not be commented: they are displayed.
    if !args.quiet && (!review.unanchored.is_empty() || args.output == args::OutputFormat::Json)
    {
        println!("{}", format_diagnostics(&review.unanchored, &args.output));
    }
    let mut posted = 0;
    let mut failed = 0;
    for ((path, line), diags) in &review.comments {
        let body = diags
            .iter()
            .map(|diag| diag.body())
            .collect::<Vec<_>>()
            .join("\n\n");
        let comment = ReviewComment::new(body, &commit_id, path, *line);
        match service.create_review_comment(&comment) {
            Ok(()) => {
                debug!("{path}:{line}: comment posted");
                posted += 1;
            }
            Err(err) => {
                eprintln!(
                    "{}: could not post comment on {path}:{line}: {err}",
                    "Warning".yellow()
                );
                failed += 1;
            }
        }
    }
    if !args.quiet && args.output == args::OutputFormat::Human {
        println!("Review comments: {posted} posted, {failed} failed");
    } else {
        info!("review comments: {posted} posted, {failed} failed");
    }
    Ok(i32::from(review.count_diagnostics() > 0))
}
