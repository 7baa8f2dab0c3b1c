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
//! Scraper for `MessageStatsReport` files (`key: value` lines).
use std::{collections::HashMap, fs, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum MsgStatsError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Metric keys extracted from a `MessageStatsReport`.
const QUALS: [&str; 4] = ["latency_avg", "latency_med", "hopcount_avg", "hopcount_med"];

/// Scraper for the `MessageStatsReport` a simulation run writes next to the event log.
pub struct MsgStatsReport {
    path: PathBuf,
}

impl MsgStatsReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Scrape the latency and hop-count metrics from the report.
    ///
    /// The first line of the report (scenario header) carries no `:` and is skipped, as is
    /// any metric not listed in [`QUALS`]. Values are kept as strings; the caller decides
    /// whether `NaN` placeholders are acceptable.
    pub fn grab_quals(&self) -> Result<HashMap<String, String>, MsgStatsError> {
        let mut metrics = HashMap::new();

        for line in fs::read_to_string(&self.path)?.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if QUALS.contains(&key) {
                metrics.insert(key.to_string(), value.trim().to_string());
            }
        }

        Ok(metrics)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn grabs_only_listed_metrics() {
        let mut path = std::env::temp_dir();
        path.push(format!("onelog_msgstats_{}", std::process::id()));
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(
            b"Message stats for scenario batch3_run1\n\
              created: 832\n\
              delivered: 407\n\
              latency_avg: 3914.5622\n\
              latency_med: 3075.5000\n\
              hopcount_avg: 2.8133\n\
              hopcount_med: 3\n",
        )
        .unwrap();

        let metrics = MsgStatsReport::new(&path).grab_quals().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(metrics.len(), 4);
        assert_eq!(metrics["latency_avg"], "3914.5622");
        assert_eq!(metrics["hopcount_med"], "3");
        assert!(!metrics.contains_key("created"));
    }
}
