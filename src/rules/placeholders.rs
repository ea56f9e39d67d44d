// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of the `placeholder-mismatch` rule: check numbered placeholders.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::checker::Checker;
use crate::diagnostic::Severity;
use crate::rules::rule::RuleChecker;
use crate::ts::unit::Unit;

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%\d+").unwrap());

/// Return the distinct placeholders (`%1`, `%2`, ...) found in a string.
pub fn placeholders(s: &str) -> BTreeSet<&str> {
    PLACEHOLDER_REGEX.find_iter(s).map(|m| m.as_str()).collect()
}

/// Return the positions (start, end) of all placeholders in a string.
fn placeholders_pos(s: &str) -> Vec<(usize, usize)> {
    PLACEHOLDER_REGEX
        .find_iter(s)
        .map(|m| (m.start(), m.end()))
        .collect()
}

pub struct PlaceholderMismatchRule {}

impl RuleChecker for PlaceholderMismatchRule {
    fn name(&self) -> &'static str {
        "placeholder-mismatch"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    /// Check for different numbered placeholders between source and translation.
    ///
    /// Placeholders are compared as sets: translators may reorder or repeat them, but
    /// must not drop or invent any. The status of the message is not considered, so an
    /// empty translation of a source with placeholders is reported.
    ///
    /// Wrong entry:
    /// ```text
    /// <message>
    ///     <source>%1 of %2 connected</source>
    ///     <translation>%1 verbunden</translation>
    /// </message>
    /// ```
    ///
    /// Correct entry:
    /// ```text
    /// <message>
    ///     <source>%1 of %2 connected</source>
    ///     <translation>%2: %1 verbunden</translation>
    /// </message>
    /// ```
    ///
    /// Diagnostics reported with severity [`warning`](Severity::Warning):
    /// - `<lang>: placeholder mismatch for '<excerpt>...'`
    fn check_unit(&self, checker: &mut Checker, unit: &Unit) {
        let source_placeholders = placeholders(&unit.source);
        if let Some(translation) = unit
            .translations()
            .find(|tr| placeholders(tr) != source_placeholders)
        {
            checker.report_msg(
                format!(
                    "{}: placeholder mismatch for '{}...'",
                    checker.language(),
                    unit.excerpt()
                ),
                &unit.source,
                &placeholders_pos(&unit.source),
                translation,
                &placeholders_pos(translation),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{diagnostic::Diagnostic, rules::rule::Rules};

    fn check_placeholders(source: &str, translation: &str) -> Vec<Diagnostic> {
        let content = format!(
            r#"<TS language="de"><context>
<message>
    <source>{source}</source>
    <translation>{translation}</translation>
</message>
</context></TS>"#
        );
        let rules = Rules::new(vec![Box::new(PlaceholderMismatchRule {})]);
        let mut checker =
            Checker::new(content.as_bytes(), &rules).with_path(Path::new("translation_de.ts"));
        checker.do_all_checks();
        checker.diagnostics
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("%1 and %2, %1 again, 100%"),
            BTreeSet::from(["%1", "%2"])
        );
        assert!(placeholders("no placeholder").is_empty());
        assert_eq!(placeholders_pos("a %12 b"), vec![(2, 5)]);
    }

    #[test]
    fn test_no_placeholders() {
        assert!(check_placeholders("Hello", "Hallo").is_empty());
    }

    #[test]
    fn test_reordered_placeholders() {
        assert!(check_placeholders("%1 and %2", "%2 und %1").is_empty());
        assert!(check_placeholders("%1 and %2", "%2 und %1 und %1").is_empty());
    }

    #[test]
    fn test_placeholder_error() {
        let diags = check_placeholders("%1", "");
        assert_eq!(diags.len(), 1);
        let diag = &diags[0];
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "de: placeholder mismatch for '%1...'");
        assert_eq!(diag.lines[0].message, "%1");
        assert_eq!(diag.lines[0].highlights, vec![(0, 2)]);
        assert_eq!(diag.lines[1].message, "");

        let diags = check_placeholders("Hello %1", "Hallo %1 %3");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].lines[1].highlights, vec![(6, 8), (9, 11)]);
    }

    #[test]
    fn test_numerus_forms() {
        let content = r#"<TS language="de"><context>
<message numerus="yes">
    <source>%n files in %1</source>
    <translation>
        <numerusform>%n Datei in %1</numerusform>
        <numerusform>%n Dateien</numerusform>
    </translation>
</message>
</context></TS>"#;
        let rules = Rules::new(vec![Box::new(PlaceholderMismatchRule {})]);
        let mut checker = Checker::new(content.as_bytes(), &rules);
        checker.do_all_checks();
        assert_eq!(checker.diagnostics.len(), 1);
        assert_eq!(checker.diagnostics[0].lines[1].message, "%n Dateien");
    }
}
