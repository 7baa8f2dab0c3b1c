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
//! Compute the progression of omega values over a run from a matrix data file.
use std::path::PathBuf;

use clap::Parser;

use onelog::omega::{read_gamma, write_omegas};

#[derive(Parser, Debug)]
#[command(author, version, about)] // get author/version information from Cargo.toml
struct Args {
    /// Matrix data file: comma-separated, time in column 0, hop vector from column 3 on.
    matrix: PathBuf,
    /// Output file for the `(time, omega)` CSV rows.
    output: PathBuf,
    /// Whitespace-separated file of gamma values, one per relay hop.
    gamma: PathBuf,
}

fn main() -> Result<(), anyhow::Error> {
    pretty_env_logger::init();
    let args = Args::parse();

    let gamma = read_gamma(&args.gamma)?;
    log::info!("gamma has {} entries", gamma.len());

    write_omegas(&args.matrix, &args.output, &gamma)?;
    log::info!("wrote omega values to {}", args.output.display());

    Ok(())
}
