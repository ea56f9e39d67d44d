// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lines changed in a pull request, from the unified diff of each file.

use std::{
    borrow::Cow,
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use log::debug;
use path_absolutize::Absolutize;
use regex::Regex;

use crate::github::ChangedFile;

static HUNK_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@ -\d+(?:,\d+)? \+(\d+)(?:,(\d+))? @@").unwrap());

/// Return the line numbers in the new version of the file of all lines in the hunks
/// of a unified diff: added lines and context lines (removed lines are skipped).
pub fn parse_patch(patch: &str) -> BTreeSet<usize> {
    let mut lines = BTreeSet::new();
    let mut new_line = 0;
    let mut remaining = 0;
    for line in patch.lines() {
        if let Some(caps) = HUNK_HEADER_REGEX.captures(line) {
            new_line = caps[1].parse().unwrap_or(0);
            remaining = caps
                .get(2)
                .map_or(Some(1), |m| m.as_str().parse().ok())
                .unwrap_or(0);
            continue;
        }
        if remaining == 0 || new_line == 0 {
            continue;
        }
        match line.as_bytes().first() {
            Some(b'-' | b'\\') => {}
            // Added line, context line, or context line with its leading space removed.
            _ => {
                lines.insert(new_line);
                new_line += 1;
                remaining -= 1;
            }
        }
    }
    lines
}

/// Normalize a path to compare paths given relative to different directories.
fn normalize(path: &Path) -> PathBuf {
    path.absolutize()
        .map_or_else(|_| path.to_path_buf(), Cow::into_owned)
}

#[derive(Debug)]
struct IndexedFile {
    /// Path of the file in the repository.
    path: String,
    lines: BTreeSet<usize>,
}

/// Lines that can be commented in a pull request, for each catalog changed.
#[derive(Debug, Default)]
pub struct DiffIndex {
    files: HashMap<PathBuf, IndexedFile>,
}

impl DiffIndex {
    /// Build the index with the files of the pull request that are in the catalog
    /// directory.
    pub fn new(files: &[ChangedFile], catalog_dir: &Path) -> Self {
        let dir = normalize(catalog_dir);
        let mut index = DiffIndex::default();
        for file in files {
            if file.status == "removed" {
                continue;
            }
            let path = normalize(Path::new(&file.filename));
            if !path.starts_with(&dir) {
                continue;
            }
            let lines = file.patch.as_deref().map(parse_patch).unwrap_or_default();
            debug!("{}: {} lines in diff", file.filename, lines.len());
            index.files.insert(
                path,
                IndexedFile {
                    path: file.filename.clone(),
                    lines,
                },
            );
        }
        index
    }

    /// Number of files in the index.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Return `true` if the line of the file is in the diff of the pull request.
    pub fn contains(&self, path: &Path, line: usize) -> bool {
        self.files
            .get(&normalize(path))
            .is_some_and(|file| file.lines.contains(&line))
    }

    /// Return the path of the file in the repository, used to comment the pull request.
    pub fn repository_path(&self, path: &Path) -> Option<&str> {
        self.files
            .get(&normalize(path))
            .map(|file| file.path.as_str())
    }
}
