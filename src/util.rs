// ONELOG: Metric Extraction from ONE Simulator Report and Settings Files
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Utility module collection of functions
use std::path::{Path, PathBuf};

use itertools::Itertools;

/// File name without its leading directories, e.g. `reports/batch3/elog.txt` -> `elog.txt`.
pub fn path_leaf(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// File name without path and extension, e.g. `reports/batch3_spec.txt` -> `batch3_spec`.
/// Everything from the first `.` on counts as the extension.
pub fn core_name(path: impl AsRef<Path>) -> String {
    let leaf = path_leaf(path);
    match leaf.find('.') {
        Some(dot) => leaf[..dot].to_string(),
        None => leaf,
    }
}

/// The `.log` sibling name of a file, e.g. `batch3_spec.txt` -> `batch3_spec.log`.
pub fn log_name(path: impl AsRef<Path>) -> String {
    format!("{}.log", core_name(path))
}

/// Expand a list of glob patterns (or plain paths) into a sorted, deduplicated file list.
/// Patterns that match nothing are kept as literal paths, so a missing file still surfaces
/// as a read error later instead of silently disappearing from the batch.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, glob::PatternError> {
    let mut files = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        for entry in glob::glob(pattern)?.flatten() {
            matched = true;
            files.push(entry);
        }
        if !matched {
            files.push(PathBuf::from(pattern));
        }
    }
    Ok(files.into_iter().unique().sorted().collect())
}
