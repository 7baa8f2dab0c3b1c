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
//! Library for extracting delivery metrics from ONE simulator reports and settings files.

pub mod analyzer;
pub mod omega;
pub mod records;
pub mod util;

pub mod prelude {
    pub use super::{
        analyzer::{analyze_event_logs, BaseFile, EventLog, MsgStatsReport, SpecFile},
        omega::{omega, read_gamma, write_omegas},
        records::{EventLogRecord, OmegaRecord},
    };
}
