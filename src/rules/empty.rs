// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of the `empty-translation` rule: check empty translations.

use crate::checker::Checker;
use crate::diagnostic::Severity;
use crate::rules::rule::RuleChecker;
use crate::ts::unit::Unit;

pub struct EmptyTranslationRule {}

impl RuleChecker for EmptyTranslationRule {
    fn name(&self) -> &'static str {
        "empty-translation"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    /// Check for empty translation (or only whitespace) of a message that is not
    /// marked as unfinished.
    ///
    /// An unfinished message is expected to be empty; any other empty translation
    /// is an omission. For plural messages, the rule is triggered if any form is
    /// empty.
    ///
    /// Wrong entry:
    /// ```text
    /// <message>
    ///     <source>Connect</source>
    ///     <translation></translation>
    /// </message>
    /// ```
    ///
    /// Correct entries:
    /// ```text
    /// <message>
    ///     <source>Connect</source>
    ///     <translation>Verbinden</translation>
    /// </message>
    /// <message>
    ///     <source>Connect</source>
    ///     <translation type="unfinished"></translation>
    /// </message>
    /// ```
    ///
    /// Diagnostics reported with severity [`warning`](Severity::Warning):
    /// - `<lang>: empty translation for '<excerpt>...'`
    fn check_unit(&self, checker: &mut Checker, unit: &Unit) {
        if unit.status.is_unfinished() {
            return;
        }
        if unit.translations().any(|tr| tr.trim().is_empty()) {
            checker.report_unit(format!(
                "{}: empty translation for '{}...'",
                checker.language(),
                unit.excerpt()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{diagnostic::Diagnostic, rules::rule::Rules};

    fn check_empty(content: &str) -> Vec<Diagnostic> {
        let rules = Rules::new(vec![Box::new(EmptyTranslationRule {})]);
        let mut checker =
            Checker::new(content.as_bytes(), &rules).with_path(Path::new("translation_de.ts"));
        checker.do_all_checks();
        checker.diagnostics
    }

    #[test]
    fn test_translated() {
        let diags = check_empty(
            r#"<TS language="de"><context>
<message>
    <source>Connect</source>
    <translation>Verbinden</translation>
</message>
</context></TS>"#,
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_unfinished_empty() {
        let diags = check_empty(
            r#"<TS language="de"><context>
<message>
    <source>Connect</source>
    <translation type="unfinished"></translation>
</message>
</context></TS>"#,
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_empty_error() {
        for status in ["", " type=\"finished\"", " type=\"obsolete\""] {
            let diags = check_empty(&format!(
                r#"<TS language="de"><context>
<message>
    <source>Connect to
the server</source>
    <translation{status}>  </translation>
</message>
</context></TS>"#
            ));
            assert_eq!(diags.len(), 1);
            let diag = &diags[0];
            assert_eq!(diag.severity, Severity::Warning);
            assert_eq!(diag.rule, "empty-translation");
            assert_eq!(diag.line_number, 2);
            assert_eq!(diag.message, "de: empty translation for 'Connect to the server...'");
            assert!(diag.lines.is_empty());
        }
    }

    #[test]
    fn test_missing_translation_element() {
        let diags = check_empty(
            r#"<TS language="de"><context>
<message>
    <source>Connect</source>
</message>
</context></TS>"#,
        );
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_numerus_empty_form() {
        let diags = check_empty(
            r#"<TS language="de"><context>
<message numerus="yes">
    <source>%n file(s)</source>
    <translation>
        <numerusform>%n Datei</numerusform>
        <numerusform></numerusform>
    </translation>
</message>
<message numerus="yes">
    <source>%n user(s)</source>
    <translation>
        <numerusform>%n Benutzer</numerusform>
        <numerusform>%n Benutzer</numerusform>
    </translation>
</message>
</context></TS>"#,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line_number, 2);
    }
}
