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
//! Record data types to (de-)serialize derived metrics to CSV.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
/// Aggregate metrics of one `EventLogReport`, one row per analyzed log.
pub struct EventLogRecord {
    /// Path of the analyzed report file.
    pub log: String,
    /// Number of unique messages created. Identical to the number of creation events.
    pub nrof_msgs: usize,
    /// Number of final-delivery events.
    pub nrof_delivered: usize,
    /// `nrof_delivered / nrof_msgs`, or `0.0` for a log without creations.
    pub delivery_ratio: f64,
    /// Total number of message copies (creations plus relays).
    pub nrof_replicas: usize,
}

impl fmt::Display for EventLogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.log)?;
        writeln!(f, "\tNumber of unique msgs created = {}", self.nrof_msgs)?;
        writeln!(f, "\tNumber of delivered msgs = {}", self.nrof_delivered)?;
        writeln!(f, "\tSuccessful delivery ratio = {}", self.delivery_ratio)?;
        write!(f, "\tNumber of replicas = {}", self.nrof_replicas)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
/// One `(time, omega)` sample of the relay-weight progression over a run.
pub struct OmegaRecord {
    pub time: f64,
    pub omega: f64,
}
