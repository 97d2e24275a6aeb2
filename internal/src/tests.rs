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

use std::fs;

use model::test_utilities::multi_hop_instance;
use model::uncertainty::CapacityRevelation;
use solver::{SolveOptions, Strategy};

use crate::{output_base_name, run, RunParameters};

fn parameters(name: &str) -> RunParameters {
    let dir = std::env::temp_dir().join(format!("{}_{}", name, std::process::id()));
    RunParameters {
        revelation: CapacityRevelation::Deterministic,
        solvers: vec![Strategy::Greedy, Strategy::Flow],
        dataset_indices: vec![1],
        data_dir: dir.join("data"),
        output_dir: dir.join("output"),
        options: SolveOptions {
            verify: true,
            ..SolveOptions::default()
        },
    }
}

#[test]
fn run_writes_metrics_summary_and_json() {
    // ARRANGE
    let parameters = parameters("distribution_run");
    fs::create_dir_all(&parameters.data_dir).unwrap();
    fs::write(
        model::json_serialisation::dataset_path(&parameters.data_dir, 1),
        serde_json::to_string(&multi_hop_instance()).unwrap(),
    )
    .unwrap();

    // ACT
    let records = run(&parameters).unwrap();

    // ASSERT
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].strategy, Strategy::Flow);
    assert_eq!(records[1].objective_value, 92);
    assert_eq!(records[1].routed_vehicles, 5);

    let base_name = output_base_name(&parameters, 1, Strategy::Flow);
    assert!(base_name.ends_with("deterministic_FLOW_dataset_01"));
    let metrics = fs::read_to_string(format!("{}_metrics.txt", base_name.display())).unwrap();
    assert!(metrics.lines().any(|line| line == "solver: FLOW"));
    assert!(metrics.lines().any(|line| line == "objective value: 92"));
    assert!(metrics.lines().any(|line| line == "unroutable vehicles: 0"));
    let summary = fs::read_to_string(format!("{}_summary.txt", base_name.display())).unwrap();
    assert!(summary.contains("veh4"));
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(format!("{}.json", base_name.display())).unwrap())
            .unwrap();
    assert_eq!(json["routes"].as_array().unwrap().len(), 5);

    fs::remove_dir_all(parameters.output_dir.parent().unwrap()).unwrap();
}

#[test]
fn missing_dataset_aborts_the_run() {
    // ARRANGE
    let parameters = parameters("distribution_missing");

    // ACT
    let result = run(&parameters);

    // ASSERT
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("could not load dataset 1"));
}

#[test]
fn output_names_carry_the_revelation_policy() {
    // ARRANGE
    let mut parameters = parameters("distribution_names");
    parameters.revelation = CapacityRevelation::planned_minus_std_dev(1.0).unwrap();

    // ACT
    let base_name = output_base_name(&parameters, 2, Strategy::Greedy);

    // ASSERT
    assert!(base_name.ends_with("planned_minus_std_1_GREEDY_dataset_02"));
}
