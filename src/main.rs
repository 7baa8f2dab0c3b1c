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
use std::{fs, io::Write, path::PathBuf};

use clap::{Parser, Subcommand};
use itertools::Itertools;

use onelog::{
    analyzer::{analyze_event_logs, BaseFile, EventLog, MsgStatsReport, SpecFile},
    util,
};

#[derive(Parser, Debug)]
#[command(author, version, about)] // get author/version information from Cargo.toml
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze `EventLogReport` files and print delivery metrics for each.
    EventLog {
        /// Report files or glob patterns.
        files: Vec<String>,
        /// Message marker character, matching the simulation's message id prefix.
        #[arg(short, long, default_value_t = 'M')]
        marker: char,
        /// Only accept `<marker><digits>` tokens as message names. May change metrics
        /// compared to historical runs.
        #[arg(long)]
        strict: bool,
        /// Print CSV rows instead of the human-readable summary.
        #[arg(long)]
        csv: bool,
    },
    /// Scrape router settings from a run specification file.
    Specs {
        file: PathBuf,
    },
    /// Scrape latency and hop-count metrics from `MessageStatsReport` files.
    MsgStats {
        files: Vec<PathBuf>,
    },
    /// Print the report directory configured in a base scenario file.
    ReportDir {
        base: PathBuf,
    },
    /// Print the mobility dataset configured in a base scenario file.
    Dataset {
        base: PathBuf,
    },
    /// Combine the metrics of one run into a single CSV row: batch name, router settings,
    /// message stats, replicas, and delivery ratio.
    All {
        /// Base scenario file of the batch.
        base: PathBuf,
        /// Run specification file.
        spec: PathBuf,
        /// `MessageStatsReport` of the run.
        msg_stats: PathBuf,
        /// `EventLogReport` of the run.
        event_log: PathBuf,
        /// Write the CSV to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), anyhow::Error> {
    pretty_env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::EventLog {
            files,
            marker,
            strict,
            csv,
        } => {
            let files = util::expand_patterns(&files)?;
            log::info!("analyzing {} event log(s)", files.len());

            let mut summaries = Vec::new();
            for result in analyze_event_logs(&files, marker, strict) {
                summaries.push(result?.summary());
            }

            if csv {
                let mut csv = csv::Writer::from_writer(std::io::stdout());
                for summary in summaries {
                    csv.serialize(summary)?;
                }
                csv.flush()?;
            } else {
                for summary in summaries {
                    println!("{summary}\n");
                }
            }
        }

        Command::Specs { file } => {
            let settings = SpecFile::new(file).grab_settings()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }

        Command::MsgStats { files } => {
            for file in files {
                let metrics = MsgStatsReport::new(&file).grab_quals()?;
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            }
        }

        Command::ReportDir { base } => {
            match BaseFile::new(&base).report_dir()? {
                Some(dir) => println!("{dir}"),
                None => anyhow::bail!("no report directory configured in {}", base.display()),
            }
        }

        Command::Dataset { base } => {
            match BaseFile::new(&base).dataset()? {
                Some(dataset) => println!("{dataset}"),
                None => println!("no dataset given"),
            }
        }

        Command::All {
            base,
            spec,
            msg_stats,
            event_log,
            output,
        } => {
            let base_file = BaseFile::new(&base);
            let spec_file = SpecFile::new(&spec);

            let mut header = vec!["batch".to_string(), "specFile".to_string()];
            let mut row = vec![base_file.path_leaf(), spec_file.path_leaf()];

            // router settings of this run
            for (key, value) in spec_file.grab_settings()?.into_iter().sorted() {
                header.push(key);
                row.push(value);
            }

            // latency / hop count metrics
            for (key, value) in MsgStatsReport::new(&msg_stats)
                .grab_quals()?
                .into_iter()
                .sorted()
            {
                header.push(key);
                row.push(value);
            }

            // replicas and delivery ratio from the event log
            let mut elog = EventLog::new(event_log.display().to_string());
            elog.parse()?;
            header.push("Replicas".to_string());
            row.push(elog.total_replicas().to_string());
            header.push("Delivery_Ratio".to_string());
            row.push(elog.delivery_ratio().to_string());

            let writer: Box<dyn Write> = match output {
                Some(path) => Box::new(fs::File::create(path)?),
                None => Box::new(std::io::stdout()),
            };
            let mut csv = csv::Writer::from_writer(writer);
            csv.write_record(&header)?;
            csv.write_record(&row)?;
            csv.flush()?;
        }
    }

    Ok(())
}
