// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Checker for translation catalogs.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use colored::Colorize;
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    args,
    config::{Settings, load_config},
    diagnostic::{Diagnostic, Severity},
    dir::find_ts_files,
    github::{GithubClient, PullRequest},
    result::{display_result, run_review},
    rules::rule::{Rule, Rules, get_selected_rules},
    ts::{catalog::Catalog, parser::parse_catalog, unit::Unit},
};

pub type CheckResult = (PathBuf, Vec<Diagnostic>);

/// Exit code returned on fatal errors (invalid settings, pull request not available).
pub const EXIT_FATAL: i32 = 2;

#[derive(Default)]
pub struct Checker<'d, 'r> {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    data: &'d [u8],
    rules: &'r Rules,
    skip_obsolete: bool,
    language: String,
    current_rule: &'static str,
    current_severity: Severity,
    current_line: usize,
}

impl<'d, 'r> Checker<'d, 'r> {
    /// Create a new `Checker` for the given data and rules.
    pub fn new(data: &'d [u8], rules: &'r Rules) -> Self {
        Checker {
            data,
            rules,
            ..Default::default()
        }
    }

    /// Set the path of the file being checked.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = PathBuf::from(path);
        self
    }

    /// Set the flag indicating the obsolete and vanished messages are skipped.
    pub fn with_skip_obsolete(mut self, skip_obsolete: bool) -> Self {
        self.skip_obsolete = skip_obsolete;
        self
    }

    /// Get the language code of the catalog being checked (e.g. `pt_BR`).
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Report a diagnostic for the whole file, out of any rule (always at line 0).
    pub fn report_file(&mut self, rule: &'static str, severity: Severity, message: String) {
        self.diagnostics
            .push(Diagnostic::new(self.path.as_path(), 0, rule, severity, message));
    }

    /// Report a diagnostic for the catalog header (always at line 0).
    pub fn report_catalog(&mut self, message: String) {
        self.diagnostics.push(Diagnostic::new(
            self.path.as_path(),
            0,
            self.current_rule,
            self.current_severity,
            message,
        ));
    }

    /// Report a diagnostic for a translation unit.
    pub fn report_unit(&mut self, message: String) {
        self.diagnostics.push(Diagnostic::new(
            self.path.as_path(),
            self.current_line,
            self.current_rule,
            self.current_severity,
            message,
        ));
    }

    /// Report a diagnostic for a translation unit, with the source and translation
    /// as context.
    pub fn report_msg(
        &mut self,
        message: String,
        source: &str,
        hl_source: &[(usize, usize)],
        translation: &str,
        hl_translation: &[(usize, usize)],
    ) {
        let mut diagnostic = Diagnostic::new(
            self.path.as_path(),
            self.current_line,
            self.current_rule,
            self.current_severity,
            message,
        );
        diagnostic.add_line("Source", source, hl_source);
        diagnostic.add_line("Translation", translation, hl_translation);
        self.diagnostics.push(diagnostic);
    }

    /// Check the catalog header using the given rule.
    pub fn check_catalog(&mut self, catalog: &Catalog, rule: &Rule) {
        self.current_rule = rule.name();
        self.current_severity = rule.severity();
        self.current_line = 0;
        rule.check_catalog(self, catalog);
    }

    /// Check the translation unit using the given rule.
    pub fn check_unit(&mut self, unit: &Unit, rule: &Rule) {
        self.current_rule = rule.name();
        self.current_severity = rule.severity();
        self.current_line = unit.line_number;
        rule.check_unit(self, unit);
    }

    /// Parse the catalog and perform all checks on every unit.
    ///
    /// If the catalog can not be parsed, a single `parse-error` diagnostic is reported.
    pub fn do_all_checks(&mut self) {
        let catalog = match parse_catalog(&self.path, self.data) {
            Ok(catalog) => catalog,
            Err(err) => {
                self.report_file(
                    "parse-error",
                    Severity::Error,
                    format!("XML parse error: {err}"),
                );
                return;
            }
        };
        debug!(
            "{}: language {}, source language {}, {} units",
            catalog.path.display(),
            catalog.language,
            catalog.source_language.as_deref().unwrap_or("-"),
            catalog.units.len(),
        );
        self.language = catalog.language_code().to_string();
        let rules = self.rules;
        for rule in &rules.enabled {
            self.check_catalog(&catalog, rule);
        }
        for unit in &catalog.units {
            if self.skip_obsolete && unit.status.is_obsolete() {
                continue;
            }
            for rule in &rules.enabled {
                self.check_unit(unit, rule);
            }
        }
    }
}

/// Check a single catalog and return the list of diagnostics found.
pub fn check_file(path: &Path, rules: &Rules, settings: &Settings) -> CheckResult {
    let buf = match std::fs::read(path) {
        Ok(buf) => buf,
        Err(err) => {
            return (
                PathBuf::from(path),
                vec![Diagnostic::new(
                    path,
                    0,
                    "read-error",
                    Severity::Error,
                    format!("could not read file: {err}"),
                )],
            );
        }
    };
    let mut checker = Checker::new(&buf, rules)
        .with_path(path)
        .with_skip_obsolete(settings.skip_obsolete);
    checker.do_all_checks();
    debug!(
        "{}: {} diagnostics",
        path.display(),
        checker.diagnostics.len()
    );
    (PathBuf::from(path), checker.diagnostics)
}

/// Check all the given catalogs; the result is sorted by path.
pub fn check_files(files: &[PathBuf], rules: &Rules, settings: &Settings) -> Vec<CheckResult> {
    let mut result: Vec<CheckResult> = files
        .par_iter()
        .map(|f| check_file(f, rules, settings))
        .collect();
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

/// Display the settings used to check files.
fn display_settings(args: &args::CheckArgs, settings: &Settings, rules: &Rules) {
    if args.quiet || !args.show_settings {
        return;
    }
    println!("Configuration:");
    let rules_names = rules.names().join(", ");
    println!(
        "  Rules enabled: {}",
        if rules_names.is_empty() {
            "<none>".to_string()
        } else {
            rules_names
        }
    );
    println!("  Catalog directory: {}", settings.dir.display());
    println!("  Catalog extension: {}", settings.extension);
    println!(
        "  Check obsolete messages: {}",
        if settings.skip_obsolete { "no" } else { "yes" }
    );
    println!("  Output format: {}", args.output);
}

fn fatal(message: &str) -> i32 {
    eprintln!("{}: {message}", "Error".bright_red().bold());
    EXIT_FATAL
}

/// Check and display result for all catalogs.
pub fn run_check(args: &args::CheckArgs) -> i32 {
    let start = Instant::now();
    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fatal(&err.to_string()),
    };
    let settings = Settings::new(args, config);
    let rules = match get_selected_rules(settings.select.as_deref(), &settings.ignore) {
        Ok(selected_rules) => selected_rules,
        Err(err) => return fatal(&err.to_string()),
    };
    let pull_request = match PullRequest::from_args(args) {
        Ok(pull_request) => pull_request,
        Err(err) => return fatal(&err.to_string()),
    };
    display_settings(args, &settings, &rules);
    let files = if args.files.is_empty() {
        find_ts_files(&settings.dir, &settings.extension)
    } else {
        args.files.clone()
    };
    info!("{} catalogs to check", files.len());
    let result = check_files(&files, &rules, &settings);
    match pull_request {
        None => display_result(&result, args, &start.elapsed()),
        Some(pull_request) => {
            let client = match GithubClient::new(&pull_request, &settings) {
                Ok(client) => client,
                Err(err) => return fatal(&err.to_string()),
            };
            match run_review(&client, &result, &settings.dir, args) {
                Ok(rc) => rc,
                Err(err) => fatal(&format!(
                    "could not get pull request #{}: {err}",
                    pull_request.number
                )),
            }
        }
    }
}
