// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Translation catalog: one `.ts` file for a target language.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ts::unit::Unit;

const FILENAME_PREFIX: &str = "translation_";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{message} (at byte {position})")]
    Xml { position: u64, message: String },

    #[error("root element is <{0}>, expected <TS>")]
    NotTs(String),
}

#[derive(Debug, Default)]
pub struct Catalog {
    pub path: PathBuf,
    /// Language code from the file name (`translation_<code>.<ext>`).
    pub file_language: Option<String>,
    /// Language declared in the `language` attribute of the root element.
    pub language: String,
    pub source_language: Option<String>,
    pub units: Vec<Unit>,
}

impl Catalog {
    /// Language code used in messages: the code from the file name, otherwise the
    /// declared language.
    #[must_use]
    pub fn language_code(&self) -> &str {
        self.file_language.as_deref().unwrap_or(&self.language)
    }

    /// Return the declared language if it does not match the code from the file name.
    #[must_use]
    pub fn language_mismatch(&self) -> Option<(&str, &str)> {
        match &self.file_language {
            Some(code) if *code != self.language => {
                Some((self.language.as_str(), code.as_str()))
            }
            _ => None,
        }
    }
}

/// Extract the language code from a file name like `translation_pt_BR.ts`.
///
/// The code may contain ASCII letters, digits, `-` and `_`; `None` is returned if the
/// file name does not follow the pattern.
#[must_use]
pub fn language_from_filename(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let (stem, ext) = name.strip_prefix(FILENAME_PREFIX)?.rsplit_once('.')?;
    if stem.is_empty()
        || ext.is_empty()
        || !stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }
    Some(stem.to_string())
}
