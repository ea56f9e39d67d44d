// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Diagnostic for translation catalogs.

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use colored::Colorize;
use serde::{
    Serialize,
    ser::{SerializeStruct, Serializer},
};

use crate::highlight::HighlightExt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
    Error,
}

/// Context line of a diagnostic, like the source or the translation of a message.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DiagnosticLine {
    pub label: &'static str,
    pub message: String,
    pub highlights: Vec<(usize, usize)>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub line_number: usize,
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
    pub lines: Vec<DiagnosticLine>,
}

impl std::fmt::Display for Severity {
    /// Format the `Severity` as a colored string for display.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Severity::Warning => "warning".yellow(),
            Severity::Error => "error".bright_red().bold(),
        };
        write!(f, "{s}")
    }
}

impl Serialize for DiagnosticLine {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DiagnosticLine", 3)?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("message", &self.message)?;
        // Convert highlights from byte positions to character positions for serialization.
        let hl: Vec<_> = self
            .highlights
            .iter()
            .map(|(s, e)| {
                (
                    self.message[..*s].chars().count(),
                    self.message[..*e].chars().count(),
                )
            })
            .collect();
        state.serialize_field("highlights", &hl)?;
        state.end()
    }
}

impl DiagnosticLine {
    /// Get the message with highlights applied.
    fn message_hl_color(&self) -> Cow<'_, str> {
        if self.highlights.is_empty() {
            Cow::Borrowed(&self.message)
        } else {
            Cow::Owned(self.message.highlight_list_pos(&self.highlights))
        }
    }
}

impl Diagnostic {
    /// Create a new `Diagnostic` with the given path, line, rule, severity, and message.
    pub fn new(
        path: &Path,
        line_number: usize,
        rule: &'static str,
        severity: Severity,
        message: String,
    ) -> Self {
        Self {
            path: PathBuf::from(path),
            line_number,
            rule,
            severity,
            message,
            ..Default::default()
        }
    }

    pub fn add_line(&mut self, label: &'static str, message: &str, highlights: &[(usize, usize)]) {
        self.lines.push(DiagnosticLine {
            label,
            message: message.to_string(),
            highlights: highlights.to_vec(),
        });
    }

    /// Full text of the diagnostic without colors: the message followed by the
    /// context lines (`Source: ...`, `Translation: ...`).
    ///
    /// This is the text posted in review comments.
    #[must_use]
    pub fn body(&self) -> String {
        let mut body = self.message.clone();
        for line in &self.lines {
            body.push('\n');
            body.push_str(line.label);
            body.push_str(": ");
            body.push_str(&line.message);
        }
        body
    }

    /// Format a context line (label + message) with colors for display.
    fn format_line(line: &DiagnosticLine) -> String {
        let prefix_line = format!("{:>12} | ", line.label).cyan().to_string();
        let prefix_lf_empty = "             | ".cyan().to_string();
        if line.message.is_empty() {
            return prefix_line;
        }
        let mut out = String::new();
        for (idx, line) in line.message_hl_color().lines().enumerate() {
            if idx == 0 {
                out.push_str(&prefix_line);
            } else {
                out.push('\n');
                out.push_str(&prefix_lf_empty);
            }
            out.push_str(line);
        }
        out
    }

    fn format_lines(&self) -> String {
        if self.lines.is_empty() {
            String::new()
        } else {
            let mut list_lines = Vec::with_capacity(self.lines.len() + 1);
            list_lines.push(String::new());
            for line in &self.lines {
                list_lines.push(Diagnostic::format_line(line));
            }
            list_lines.join("\n")
        }
    }
}

impl std::fmt::Display for Diagnostic {
    /// Format the `Diagnostic` for display, including file, line, severity, message, and context.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let str_line = if self.line_number > 0 {
            format!(":{}", self.line_number)
        } else {
            String::new()
        };
        write!(
            f,
            "{}{str_line}: [{}:{}] {}{}",
            self.path.display().to_string().white().bold(),
            self.severity,
            self.rule,
            self.message,
            self.format_lines(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic() -> Diagnostic {
        let mut diag = Diagnostic::new(
            Path::new("translation_de.ts"),
            12,
            "placeholder-mismatch",
            Severity::Warning,
            "de: placeholder mismatch for 'Hello %1...'".to_string(),
        );
        diag.add_line("Source", "Hello %1", &[(6, 8)]);
        diag.add_line("Translation", "Hallo", &[]);
        diag
    }

    #[test]
    fn test_body() {
        assert_eq!(
            diagnostic().body(),
            "de: placeholder mismatch for 'Hello %1...'\nSource: Hello %1\nTranslation: Hallo"
        );
        let diag = Diagnostic::new(
            Path::new("translation_de.ts"),
            0,
            "header-mismatch",
            Severity::Error,
            "Language header 'fr' does not match filename 'de'".to_string(),
        );
        assert_eq!(
            diag.body(),
            "Language header 'fr' does not match filename 'de'"
        );
    }

    #[test]
    fn test_display() {
        colored::control::set_override(false);
        assert_eq!(
            diagnostic().to_string(),
            "translation_de.ts:12: [warning:placeholder-mismatch] \
             de: placeholder mismatch for 'Hello %1...'\n      \
             Source | Hello %1\n Translation | Hallo"
        );
    }

    #[test]
    fn test_serialize() {
        let mut diag = diagnostic();
        diag.lines[0].message = "Héllo %1".to_string();
        diag.lines[0].highlights = vec![(7, 9)];
        let json = serde_json::to_string(&diag).unwrap_or_default();
        assert!(json.contains("\"line_number\":12"));
        assert!(json.contains("\"rule\":\"placeholder-mismatch\""));
        assert!(json.contains("\"severity\":\"warning\""));
        assert!(json.contains("\"highlights\":[[6,8]]"));
    }
}
