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

#[cfg(test)]
mod tests;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use model::network::Network;
use model::uncertainty::CapacityRevelation;
use solution::json_serialisation::write_encoding_to_json;
use solution::Metrics;
use solver::{solve, SolutionResult, SolveOptions, Strategy};

/// which networks are built and which solvers are compared on them.
#[derive(Debug, Clone)]
pub struct RunParameters {
    pub revelation: CapacityRevelation,
    pub solvers: Vec<Strategy>,
    pub dataset_indices: Vec<usize>,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub options: SolveOptions,
}

/// one line of the final comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub dataset_index: usize,
    pub strategy: Strategy,
    pub objective_value: i64,
    pub lower_bound: Option<f64>,
    pub running_time: f64,
    pub routed_vehicles: usize,
}

/// runs every solver on every dataset, sequentially, and writes the metric, summary and json
/// files to the output directory.
pub fn run(parameters: &RunParameters) -> anyhow::Result<Vec<RunRecord>> {
    fs::create_dir_all(&parameters.output_dir).with_context(|| {
        format!(
            "could not create output directory {}",
            parameters.output_dir.display()
        )
    })?;

    let mut records = Vec::new();
    for &dataset_index in parameters.dataset_indices.iter() {
        let network = model::load_network_with_revelation(
            &parameters.data_dir,
            dataset_index,
            parameters.revelation,
        )
        .with_context(|| format!("could not load dataset {}", dataset_index))?;
        tracing::info!("dataset {}: {}", dataset_index, network_summary(&network));

        for &strategy in parameters.solvers.iter() {
            let result = solve(network.clone(), strategy, &parameters.options)?;
            let base_name = output_base_name(parameters, dataset_index, strategy);
            write_metrics(parameters, dataset_index, &result, &base_name)?;
            write_summary(&network, &result, &base_name)?;
            let json_path = with_suffix(&base_name, ".json");
            write_encoding_to_json(result.encoding(), &json_path)
                .with_context(|| format!("could not write {}", json_path.display()))?;

            records.push(RunRecord {
                dataset_index,
                strategy,
                objective_value: result.objective_value(),
                lower_bound: result.lower_bound(),
                running_time: result.running_time().as_secs_f64(),
                routed_vehicles: result.encoding().number_of_routed_vehicles(),
            });
        }
    }
    Ok(records)
}

fn network_summary(network: &Network) -> String {
    format!(
        "{} locations, {} vehicles, {} trucks",
        network.locations().len(),
        network.number_of_vehicles(),
        network.number_of_trucks()
    )
}

/// e.g. `<output_dir>/deterministic_FLOW_dataset_03` or `<output_dir>/quantile_0.5_GREEDY_dataset_01`
pub fn output_base_name(
    parameters: &RunParameters,
    dataset_index: usize,
    strategy: Strategy,
) -> PathBuf {
    parameters.output_dir.join(format!(
        "{}_{}_dataset_{:02}",
        parameters.revelation, strategy, dataset_index
    ))
}

fn with_suffix(base_name: &Path, suffix: &str) -> PathBuf {
    let mut name = base_name.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// one `key: value` line per metric
pub fn metric_lines(
    parameters: &RunParameters,
    dataset_index: usize,
    result: &SolutionResult,
) -> Vec<String> {
    let mut lines = vec![
        format!("solver: {}", result.strategy()),
        format!("dataset: {}", dataset_index),
        format!("deterministic: {}", parameters.revelation.is_deterministic()),
        format!("capacity revelation: {}", parameters.revelation),
        format!("objective value: {}", result.objective_value()),
        format!("total cost: {}", result.total_cost()),
        format!("delay cost: {}", result.delay_cost()),
        format!("running time: {:0.3}", result.running_time().as_secs_f64()),
        format!(
            "routed vehicles: {}",
            result.encoding().number_of_routed_vehicles()
        ),
        format!("unroutable vehicles: {}", result.unroutable_vehicles().count()),
    ];
    if let Some(gap) = result.optimality_gap() {
        lines.push(format!("optimality gap: {}", gap));
    }
    if let Some(bound) = result.lower_bound() {
        lines.push(format!("lower bound: {}", bound));
    }
    lines.extend(
        Metrics::of(result.encoding())
            .to_string()
            .lines()
            .map(String::from),
    );
    lines
}

fn write_metrics(
    parameters: &RunParameters,
    dataset_index: usize,
    result: &SolutionResult,
    base_name: &Path,
) -> anyhow::Result<()> {
    let path = with_suffix(base_name, "_metrics.txt");
    let mut file =
        fs::File::create(&path).with_context(|| format!("could not create {}", path.display()))?;
    for line in metric_lines(parameters, dataset_index, result) {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

fn write_summary(network: &Network, result: &SolutionResult, base_name: &Path) -> anyhow::Result<()> {
    let path = with_suffix(base_name, "_summary.txt");
    let mut file =
        fs::File::create(&path).with_context(|| format!("could not create {}", path.display()))?;
    writeln!(file, "{}", network)?;
    writeln!(
        file,
        "{}: objective value {} (trucks {}, delays {}), running time {:0.2}sec",
        result.strategy(),
        result.objective_value(),
        result.total_cost(),
        result.delay_cost(),
        result.running_time().as_secs_f32()
    )?;
    if let Some(bound) = result.lower_bound() {
        writeln!(file, "lower bound: {:.2}", bound)?;
    }
    writeln!(file)?;
    write!(file, "{}", result.encoding())?;
    Ok(())
}
