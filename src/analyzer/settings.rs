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
//! Scrapers for ONE settings files (`key = value` format): per-run specification files and
//! the base scenario file shared by a batch.
use std::{collections::HashMap, fs, path::PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::util::path_leaf;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

lazy_static! {
    /// `key = value`, whitespace-tolerant. Values may contain commas (e.g. router parameter
    /// sweeps like `HeraRouter.lambda = 1,2,3,4`) but no inner whitespace.
    static ref PAIR_RE: Regex =
        Regex::new(r"^\s*(?P<key>[^=\s]+)\s*=\s*(?P<value>\S*)\s*$").unwrap();
}

/// Split a settings line into its `(key, value)` pair, if it has the expected shape.
pub fn grab_pair(line: &str) -> Option<(String, String)> {
    let m = PAIR_RE.captures(line)?;
    Some((m["key"].to_string(), m["value"].to_string()))
}

/// Scraper for the run-specific specification file of a batch: the secondary settings file
/// passed to the simulator that selects the router and its parameters.
pub struct SpecFile {
    path: PathBuf,
}

/// Setting keys that are scraped from a specification file (matched by substring, so any
/// `<Group>.router` / `<Interface>.transmitRange` qualifies).
const SPEC_ATTRS: [&str; 2] = [".router", ".transmitRange"];

impl SpecFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path_leaf(&self) -> String {
        path_leaf(&self.path)
    }

    /// Scrape the settings relevant for evaluation.
    ///
    /// The router setting is reported under the key `Router`, the BLE transmit range under
    /// `BLE_RANGE`. Once the router is known, all of its parameter lines
    /// (`<RouterName>.param = value`) are collected as well, under their original keys.
    /// Lines containing `#` are treated as comments and skipped.
    pub fn grab_settings(&self) -> Result<HashMap<String, String>, SettingsError> {
        let mut output = HashMap::new();
        let mut router_name: Option<String> = None;

        for line in fs::read_to_string(&self.path)?.lines() {
            if line.contains('#') {
                continue;
            }

            let mut matched = SPEC_ATTRS.iter().find(|attr| line.contains(*attr)).copied();
            if matched.is_none() {
                // router parameters only appear after the router itself was declared
                if let Some(router) = &router_name {
                    if line.contains(router.as_str()) {
                        matched = Some("");
                    }
                }
            }

            let Some(attr) = matched else {
                continue;
            };
            let Some((key, value)) = grab_pair(line) else {
                continue;
            };

            match attr {
                ".router" => {
                    router_name = Some(value.clone());
                    output.insert("Router".to_string(), value);
                }
                ".transmitRange" => {
                    output.insert("BLE_RANGE".to_string(), value);
                }
                _ => {
                    output.insert(key, value);
                }
            }
        }

        Ok(output)
    }
}

/// Scraper for the base scenario file of a batch, which holds the report directory and the
/// mobility dataset among many settings irrelevant for evaluation.
pub struct BaseFile {
    path: PathBuf,
}

impl BaseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path_leaf(&self) -> String {
        path_leaf(&self.path)
    }

    /// The configured `.reportDir`, normalized to carry a trailing `/`.
    pub fn report_dir(&self) -> Result<Option<String>, SettingsError> {
        for line in fs::read_to_string(&self.path)?.lines() {
            if line.contains('#') || !line.contains(".reportDir") {
                continue;
            }
            if let Some((_, value)) = grab_pair(line) {
                let mut dir = value;
                if !dir.ends_with('/') {
                    dir.push('/');
                }
                return Ok(Some(dir));
            }
        }
        Ok(None)
    }

    /// The name of the mobility dataset (`ExternalEvents.filePath`, path leaf only).
    pub fn dataset(&self) -> Result<Option<String>, SettingsError> {
        for line in fs::read_to_string(&self.path)?.lines() {
            if line.contains('#') || !line.contains("ExternalEvents.filePath") {
                continue;
            }
            if let Some((_, value)) = grab_pair(line) {
                return Ok(Some(path_leaf(value)));
            }
        }
        Ok(None)
    }
}
