// © 2023-2024 ETH Zurich
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// any later version.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use internal::RunParameters;
use model::uncertainty::CapacityRevelation;
use model::DataError;
use solver::{SolveOptions, Strategy};
use tracing::info;

#[derive(Parser)]
#[clap(author, version, about = "Routes vehicles from plants to dealers on scheduled trucks", long_about = None)]
struct Cli {
    /// plan with the realised capacities instead of the revealed ones
    #[arg(long)]
    deterministic: bool,

    #[arg(long, value_delimiter = ',', default_value = "GREEDY,GREEDY_CANDIDATE_PATHS,FLOW")]
    solvers: Vec<Strategy>,

    #[arg(long, value_delimiter = ',', default_value = "1")]
    dataset_indices: Vec<usize>,

    /// quantile of the capacity history used in the real-time setting (0.0 = most conservative)
    #[arg(long, default_value_t = 0.0)]
    quantile_value: f64,

    /// plan with the mean of the capacity history minus this many standard deviations
    #[arg(long, conflicts_with_all = ["deterministic", "planned_minus_std_dev"])]
    mean_minus_std_dev: Option<f64>,

    /// plan with the planned capacity minus this many standard deviations of the history
    #[arg(long, conflicts_with = "deterministic")]
    planned_minus_std_dev: Option<f64>,

    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// time limit of the mip engine in seconds
    #[arg(long, default_value_t = 60.0)]
    time_limit: f64,

    /// threads of the mip engine (default: all)
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, default_value_t = 3)]
    candidate_paths: usize,

    /// check the consistency of every encoding
    #[arg(long)]
    verify: bool,

    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn revelation(&self) -> Result<CapacityRevelation, DataError> {
        match (self.mean_minus_std_dev, self.planned_minus_std_dev) {
            (Some(factor), _) => CapacityRevelation::mean_minus_std_dev(factor),
            (None, Some(factor)) => CapacityRevelation::planned_minus_std_dev(factor),
            (None, None) => CapacityRevelation::new(self.deterministic, self.quantile_value),
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let defaults = SolveOptions::default();
    let parameters = RunParameters {
        revelation: cli.revelation()?,
        solvers: cli.solvers,
        dataset_indices: cli.dataset_indices,
        data_dir: cli.data_dir,
        output_dir: cli.output_dir,
        options: SolveOptions {
            candidate_paths: cli.candidate_paths,
            time_limit: Duration::try_from_secs_f64(cli.time_limit)?,
            threads: cli.threads.unwrap_or(defaults.threads),
            verify: cli.verify,
        },
    };

    let records = internal::run(&parameters)?;

    info!("dataset | solver | objective value | lower bound | running time | routed");
    for record in records {
        info!(
            "{:>7} | {:<22} | {:>15} | {:>11} | {:>11.2}s | {}",
            record.dataset_index,
            record.strategy,
            record.objective_value,
            record
                .lower_bound
                .map_or_else(|| String::from("-"), |bound| format!("{:.2}", bound)),
            record.running_time,
            record.routed_vehicles
        );
    }
    Ok(())
}
