// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of the `html-mismatch` rule: check HTML tags missing in translation.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::Checker;
use crate::diagnostic::Severity;
use crate::rules::rule::RuleChecker;
use crate::ts::unit::Unit;

static HTML_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Return the positions (start, end) of all HTML tags in a string.
fn tags_pos(s: &str) -> Vec<(usize, usize)> {
    HTML_TAG_REGEX
        .find_iter(s)
        .map(|m| (m.start(), m.end()))
        .collect()
}

pub struct HtmlMismatchRule {}

impl RuleChecker for HtmlMismatchRule {
    fn name(&self) -> &'static str {
        "html-mismatch"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    /// Check for HTML tags in source that are all missing in the translation.
    ///
    /// This is only a presence check: the tags are not compared, so they can be
    /// reordered or changed by the translator. Unfinished messages are not checked.
    ///
    /// Wrong entry:
    /// ```text
    /// <message>
    ///     <source>&lt;b&gt;Mute&lt;/b&gt; myself</source>
    ///     <translation>Mich stumm schalten</translation>
    /// </message>
    /// ```
    ///
    /// Correct entry:
    /// ```text
    /// <message>
    ///     <source>&lt;b&gt;Mute&lt;/b&gt; myself</source>
    ///     <translation>Mich &lt;b&gt;stumm&lt;/b&gt; schalten</translation>
    /// </message>
    /// ```
    ///
    /// Diagnostics reported with severity [`warning`](Severity::Warning):
    /// - `<lang>: HTML missing for '<excerpt>...'`
    fn check_unit(&self, checker: &mut Checker, unit: &Unit) {
        if unit.status.is_unfinished() {
            return;
        }
        let source_tags = tags_pos(&unit.source);
        if source_tags.is_empty() {
            return;
        }
        if let Some(translation) = unit
            .translations()
            .find(|tr| !HTML_TAG_REGEX.is_match(tr))
        {
            checker.report_msg(
                format!(
                    "{}: HTML missing for '{}...'",
                    checker.language(),
                    unit.excerpt()
                ),
                &unit.source,
                &source_tags,
                translation,
                &[],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{diagnostic::Diagnostic, rules::rule::Rules};

    fn check_html(source: &str, translation: &str, status: &str) -> Vec<Diagnostic> {
        let content = format!(
            r#"<TS language="de"><context>
<message>
    <source>{source}</source>
    <translation{status}>{translation}</translation>
</message>
</context></TS>"#
        );
        let rules = Rules::new(vec![Box::new(HtmlMismatchRule {})]);
        let mut checker =
            Checker::new(content.as_bytes(), &rules).with_path(Path::new("translation_de.ts"));
        checker.do_all_checks();
        checker.diagnostics
    }

    #[test]
    fn test_no_html() {
        assert!(check_html("Hello", "", "").is_empty());
    }

    #[test]
    fn test_html_ok() {
        assert!(check_html("&lt;b&gt;Hi&lt;/b&gt;", "&lt;i&gt;Hallo&lt;/i&gt;", "").is_empty());
    }

    #[test]
    fn test_html_unfinished() {
        assert!(check_html("&lt;b&gt;Hi&lt;/b&gt;", "Hallo", " type=\"unfinished\"").is_empty());
    }

    #[test]
    fn test_html_error() {
        let diags = check_html("&lt;b&gt;Hi&lt;/b&gt;", "Hallo", "");
        assert_eq!(diags.len(), 1);
        let diag = &diags[0];
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.rule, "html-mismatch");
        assert_eq!(diag.message, "de: HTML missing for '<b>Hi</b>...'");
        assert_eq!(diag.lines[0].message, "<b>Hi</b>");
        assert_eq!(diag.lines[0].highlights, vec![(0, 3), (5, 9)]);
        assert_eq!(diag.lines[1].message, "Hallo");
    }

    #[test]
    fn test_html_obsolete() {
        let diags = check_html("&lt;br&gt;", "", " type=\"obsolete\"");
        assert_eq!(diags.len(), 1);
    }
}
