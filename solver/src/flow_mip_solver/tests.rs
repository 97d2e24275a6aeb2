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

use std::time::Duration;

use itertools::assert_equal;
use model::base_types::VehicleIdx;
use model::test_utilities::{init_test_data, single_transport_network};
use solution::UnroutableReason;

use crate::mip::{HighsBackend, MipBackend, MipError, MipLimits, MipModel, MipSolution};
use crate::time_expanded_network::{commodities, CommodityNetwork};
use crate::{OptimalityGap, SolveOptions, Solver};

use super::{FlowMipSolver, FlowModel};

struct FailingBackend;

impl MipBackend for FailingBackend {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn solve(&self, _model: &MipModel, _limits: &MipLimits) -> Result<MipSolution, MipError> {
        Err(MipError::Infeasible)
    }
}

/// solves with HiGHS but reports the solution as an incumbent found before a limit
struct InterruptedHighs;

impl MipBackend for InterruptedHighs {
    fn name(&self) -> &'static str {
        "interrupted"
    }

    fn solve(&self, model: &MipModel, limits: &MipLimits) -> Result<MipSolution, MipError> {
        let solution = HighsBackend.solve(model, limits)?;
        Ok(MipSolution {
            limit_reached: true,
            ..solution
        })
    }
}

#[test]
fn flow_model_shares_truck_capacities() {
    // ARRANGE
    let d = init_test_data();
    let flow_networks: Vec<CommodityNetwork> =
        commodities(&d.network, d.network.vehicles_by_availability())
            .into_iter()
            .map(|commodity| CommodityNetwork::build(&d.network, commodity))
            .collect();

    // ACT
    let flow_model = FlowModel::build(&flow_networks, |truck| d.network.capacity_of(truck), true);

    // ASSERT
    assert_eq!(flow_model.model().variables().len(), 4 + 7);
    // 2 + 3 nodes and 6 trucks
    assert_eq!(flow_model.model().constraints().len(), 5 + 6);
    assert!(flow_model.model().is_integral());
    let values: Vec<f64> = (0..11).map(|v| v as f64).collect();
    let split = flow_model.arc_values(&values);
    assert_eq!(split[0], vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(split[1].len(), 7);
}

#[test]
fn flow_mip_finds_the_optimum() {
    // ARRANGE
    let d = init_test_data();
    let solver = FlowMipSolver::initialize(d.network.clone(), SolveOptions::default());

    // ACT
    let outcome = solver.solve();

    // ASSERT
    assert_eq!(outcome.optimality_gap, Some(OptimalityGap::Proven));
    assert!(outcome.encoding.is_consistent());
    assert_eq!(outcome.encoding.number_of_routed_vehicles(), 5);
    assert_eq!(outcome.encoding.total_cost(), 92);
    assert_eq!(outcome.encoding.objective_value(), 92);
}

#[test]
fn flow_mip_marks_vehicles_without_capacity() {
    // ARRANGE
    let network = single_transport_network(2, 10, 3);
    let solver = FlowMipSolver::initialize(network, SolveOptions::default());

    // ACT
    let outcome = solver.solve();

    // ASSERT
    assert_eq!(outcome.encoding.total_cost(), 20);
    assert_eq!(outcome.encoding.number_of_unroutable_vehicles(), 1);
    assert!(outcome
        .encoding
        .unroutable_vehicles()
        .all(|(_, reason)| reason == UnroutableReason::NoFeasibleRoute));
}

#[test]
fn engine_failure_marks_all_vehicles() {
    // ARRANGE
    let network = single_transport_network(3, 10, 2);
    let solver =
        FlowMipSolver::with_backend(network, SolveOptions::default(), Box::new(FailingBackend));

    // ACT
    let outcome = solver.solve();

    // ASSERT
    assert_eq!(outcome.optimality_gap, Some(OptimalityGap::Infeasible));
    assert_equal(
        outcome.encoding.unroutable_vehicles(),
        [
            (VehicleIdx(0), UnroutableReason::SolverFailure),
            (VehicleIdx(1), UnroutableReason::SolverFailure),
        ],
    );
}

#[test]
fn reaching_the_time_limit_leaves_the_gap_unknown() {
    // ARRANGE
    let network = single_transport_network(3, 10, 3);
    let solver =
        FlowMipSolver::with_backend(network, SolveOptions::default(), Box::new(InterruptedHighs));

    // ACT
    let outcome = solver.solve();

    // ASSERT
    assert_eq!(outcome.optimality_gap, Some(OptimalityGap::Unknown));
    assert_eq!(outcome.encoding.total_cost(), 30);
    assert!(outcome.encoding.is_consistent());
}

#[test]
fn finishing_within_the_time_limit_is_proven() {
    // ARRANGE
    let network = single_transport_network(3, 10, 3);
    let options = SolveOptions {
        time_limit: Duration::from_secs(30),
        ..SolveOptions::default()
    };
    let solver = FlowMipSolver::initialize(network, options);

    // ACT
    let outcome = solver.solve();

    // ASSERT
    assert_eq!(outcome.optimality_gap, Some(OptimalityGap::Proven));
}
