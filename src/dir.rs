// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory utilities.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use colored::Colorize;
use ignore::WalkBuilder;

use crate::ts::catalog::language_from_filename;

/// Return `true` if the path is a catalog: `translation_<code>.<extension>`.
fn is_catalog(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
        && language_from_filename(path).is_some()
}

/// Recursively find all catalogs (`translation_<code>.<extension>`) under the given
/// directory, sorted by path.
///
/// The .gitignore rules are respected: ignored files are skipped.
pub fn find_ts_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(dir);
    builder.follow_links(false);

    let files = Arc::new(Mutex::new(Vec::new()));
    builder.build_parallel().run(|| {
        let files = Arc::clone(&files);
        Box::new(move |entry| {
            match entry {
                Ok(dirent) => {
                    if dirent.file_type().is_some_and(|ft| ft.is_file())
                        && is_catalog(dirent.path(), extension)
                    {
                        if let Ok(mut files) = files.lock() {
                            files.push(
                                dirent
                                    .path()
                                    .strip_prefix("./")
                                    .unwrap_or(dirent.path())
                                    .to_path_buf(),
                            );
                        }
                    }
                }
                Err(err) => {
                    eprintln!("{}: could not read entry: {err}", "Warning".yellow());
                }
            }
            ignore::WalkState::Continue
        })
    });
    let mut files = files.lock().map(|files| files.clone()).unwrap_or_default();
    files.sort();
    files
}
