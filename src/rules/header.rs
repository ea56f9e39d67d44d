// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of the `header-mismatch` rule: check the language declared in the
//! catalog against its file name.

use crate::checker::Checker;
use crate::diagnostic::Severity;
use crate::rules::rule::RuleChecker;
use crate::ts::catalog::Catalog;

pub struct HeaderMismatchRule {}

impl RuleChecker for HeaderMismatchRule {
    fn name(&self) -> &'static str {
        "header-mismatch"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Check that the `language` attribute of the root element is the language code
    /// of the file name (`translation_<code>.ts`).
    ///
    /// Files whose name does not follow this pattern are not checked.
    ///
    /// Wrong entry (in file `translation_de.ts`):
    /// ```text
    /// <TS version="2.1" language="fr_FR">
    /// ```
    ///
    /// Correct entry (in file `translation_de.ts`):
    /// ```text
    /// <TS version="2.1" language="de">
    /// ```
    ///
    /// Diagnostics reported with severity [`error`](Severity::Error):
    /// - `Language header '<declared>' does not match filename '<code>'`
    fn check_catalog(&self, checker: &mut Checker, catalog: &Catalog) {
        if let Some((declared, code)) = catalog.language_mismatch() {
            checker.report_catalog(format!(
                "Language header '{declared}' does not match filename '{code}'"
            ));
        }
    }
}
