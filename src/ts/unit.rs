// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Translation unit: one `message` of a catalog.

/// Maximum number of characters of the source kept in an excerpt.
const EXCERPT_LEN: usize = 30;

/// Status of a translation, from the `type` attribute of the `translation` element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    #[default]
    Unset,
    Finished,
    Unfinished,
    Obsolete,
    Vanished,
}

impl Status {
    /// Build the status from the value of the `type` attribute (if present).
    #[must_use]
    pub fn from_type(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("finished") => Status::Finished,
            Some("unfinished") => Status::Unfinished,
            Some("obsolete") => Status::Obsolete,
            Some("vanished") => Status::Vanished,
            _ => Status::Unset,
        }
    }

    #[must_use]
    pub fn is_unfinished(self) -> bool {
        self == Status::Unfinished
    }

    /// Return `true` if the message is not used any more in the sources.
    #[must_use]
    pub fn is_obsolete(self) -> bool {
        matches!(self, Status::Obsolete | Status::Vanished)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Unit {
    pub line_number: usize,
    pub context: String,
    pub source: String,
    pub translation: String,
    pub numerus_forms: Vec<String>,
    pub status: Status,
}

impl Unit {
    /// Create a new `Unit` with the given line number and default values.
    #[must_use]
    pub fn new(line_number: usize) -> Self {
        Self {
            line_number,
            ..Default::default()
        }
    }

    /// Return `true` if the message has plural forms (`numerusform` elements).
    #[must_use]
    pub fn is_numerus(&self) -> bool {
        !self.numerus_forms.is_empty()
    }

    /// Iterator over the translated strings: the plural forms if any, otherwise the
    /// translation text.
    pub fn translations(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        if self.is_numerus() {
            Box::new(self.numerus_forms.iter().map(String::as_str))
        } else {
            Box::new(std::iter::once(self.translation.as_str()))
        }
    }

    /// Short excerpt of the source: first characters, with newlines replaced by spaces.
    #[must_use]
    pub fn excerpt(&self) -> String {
        self.source
            .chars()
            .take(EXCERPT_LEN)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect()
    }
}
