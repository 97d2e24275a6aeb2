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

use itertools::assert_equal;
use model::base_types::VehicleIdx;
use model::test_utilities::{init_test_data, single_transport_network};
use solution::{Route, UnroutableReason};

use crate::{SolveOptions, Solver};

use super::MinCostFlowSolver;

#[test]
fn flow_routes_every_vehicle_of_multi_hop_instance() {
    // ARRANGE
    let d = init_test_data();
    let solver = MinCostFlowSolver::initialize(d.network.clone(), SolveOptions::default());

    // ACT
    let encoding = solver.solve().encoding;

    // ASSERT
    assert!(encoding.is_consistent());
    assert_eq!(encoding.number_of_routed_vehicles(), 5);
    assert_eq!(encoding.number_of_unroutable_vehicles(), 0);
    // dealer2 is due first and gets the cheap truck
    assert_eq!(
        encoding.route_of(d.veh4),
        Some(&Route::from_trucks(
            [d.plant_terminal_cheap, d.terminal_dealer2],
            &d.network
        ))
    );
    assert_eq!(
        encoding.route_of(d.veh0),
        Some(&Route::from_trucks([d.plant_dealer1_direct], &d.network))
    );
    assert_eq!(encoding.total_cost(), 92);
    assert_eq!(encoding.delay_cost(), 0);
    assert_eq!(encoding.objective_value(), 92);
}

#[test]
fn flow_leaves_vehicles_without_capacity_unrouted() {
    // ARRANGE
    let network = single_transport_network(2, 10, 3);
    let solver = MinCostFlowSolver::initialize(network, SolveOptions::default());

    // ACT
    let encoding = solver.solve().encoding;

    // ASSERT
    assert_eq!(encoding.total_cost(), 20);
    assert_equal(
        encoding.unroutable_vehicles(),
        [(VehicleIdx(2), UnroutableReason::NoFeasibleRoute)],
    );
    assert!(encoding.is_consistent());
}

#[test]
fn flow_routes_all_vehicles_with_enough_capacity() {
    // ARRANGE
    let network = single_transport_network(3, 10, 3);
    let solver = MinCostFlowSolver::initialize(network, SolveOptions::default());

    // ACT
    let encoding = solver.solve().encoding;

    // ASSERT
    assert_eq!(encoding.total_cost(), 30);
    assert_eq!(encoding.number_of_unroutable_vehicles(), 0);
}
