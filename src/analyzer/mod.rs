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
//! Parsers and scrapers for the files the ONE simulator produces or consumes.
use std::path::PathBuf;

use rayon::prelude::*;

pub mod event_log;
pub mod msg_stats;
pub mod settings;

pub use event_log::{EventLog, EventLogError};
pub use msg_stats::{MsgStatsError, MsgStatsReport};
pub use settings::{grab_pair, BaseFile, SettingsError, SpecFile};

/// Analyze a batch of event logs in parallel, one independent analyzer per file.
///
/// There is no shared state between files; the order of results follows the input order,
/// not the completion order.
pub fn analyze_event_logs(
    files: &[PathBuf],
    marker: char,
    strict: bool,
) -> Vec<Result<EventLog, EventLogError>> {
    files
        .par_iter()
        .map(|path| {
            let mut log = EventLog::new(path.display().to_string()).with_marker(marker);
            if strict {
                log = log.with_strict_ids();
            }
            log.parse().map(|()| log)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{fs, io::Write};

    #[test]
    fn batch_analysis_is_independent_per_file() {
        let dir = std::env::temp_dir();
        let mut paths = Vec::new();
        for (i, content) in ["M1 C\nM1 DE D\n", "M1 C\nM2 C\nM1 DE\n"].iter().enumerate() {
            let mut path = dir.clone();
            path.push(format!("onelog_batch_{}_{i}", std::process::id()));
            let mut f = fs::File::create(&path).unwrap();
            f.write_all(content.as_bytes()).unwrap();
            paths.push(path);
        }

        let results = analyze_event_logs(&paths, 'M', false);
        for path in &paths {
            fs::remove_file(path).unwrap();
        }

        let first = results[0].as_ref().unwrap();
        assert_eq!(first.delivery_ratio(), 1.0);
        let second = results[1].as_ref().unwrap();
        assert_eq!(second.unique_message_count(), 2);
        assert_eq!(second.total_replicas(), 3);
        assert_eq!(second.delivery_ratio(), 0.0);
    }

    #[test]
    fn missing_file_is_a_fatal_error_for_that_log() {
        let results = analyze_event_logs(
            &[PathBuf::from("/nonexistent/onelog/EventLogReport.txt")],
            'M',
            false,
        );
        assert!(matches!(results[0], Err(EventLogError::Io(_))));
    }
}
