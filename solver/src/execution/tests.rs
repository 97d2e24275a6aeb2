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
use model::base_types::{TruckIdx, VehicleIdx};
use model::json_serialisation::load_network_from_json;
use model::test_utilities::{init_test_data, overpromised_single_transport_network};
use model::uncertainty::CapacityRevelation;
use serde_json::json;
use solution::{Encoding, Route, UnroutableReason};

use crate::greedy::GreedySolver;
use crate::{SolveOptions, Solver};

use super::execute_plan;

#[test]
fn vehicles_beyond_the_realised_capacity_are_left_behind() {
    // ARRANGE
    let network = overpromised_single_transport_network(2, 5, 3);
    let truck = TruckIdx(0);
    let plan = GreedySolver::initialize(network.clone(), SolveOptions::default())
        .solve()
        .encoding;
    assert_eq!(plan.load_of(truck).len(), 3);
    assert!(!plan.is_consistent());

    // ACT
    let executed = execute_plan(&plan);

    // ASSERT
    assert!(executed.is_consistent());
    assert_eq!(executed.load_of(truck), &[VehicleIdx(0), VehicleIdx(1)]);
    assert_eq!(executed.total_cost(), 20);
    assert_equal(
        executed.unroutable_vehicles(),
        [(VehicleIdx(2), UnroutableReason::CapacityShortfall)],
    );
}

#[test]
fn vehicles_left_behind_take_a_later_truck() {
    // ARRANGE
    let input = json!({
        "locations": [
            {"name": "GER01", "type": "PLANT"},
            {"name": "FRA01", "type": "DEAL"}
        ],
        "vehicles": [
            {"id": 0, "origin": "GER01", "destination": "FRA01", "availableDay": 0, "dueDay": 6},
            {"id": 1, "origin": "GER01", "destination": "FRA01", "availableDay": 0, "dueDay": 5}
        ],
        "trucks": [
            {"origin": "GER01", "destination": "FRA01", "truckNumber": 1, "departureDay": 1,
                "arrivalDay": 2, "capacity": 1, "plannedCapacity": 3,
                "capacityHistory": [3, 3], "price": 10},
            {"origin": "GER01", "destination": "FRA01", "truckNumber": 1, "departureDay": 3,
                "arrivalDay": 4, "capacity": 3, "price": 20}
        ]
    });
    let network = load_network_from_json(input, CapacityRevelation::Quantile(0.0)).unwrap();
    let plan = GreedySolver::initialize(network.clone(), SolveOptions::default())
        .solve()
        .encoding;
    assert_eq!(plan.total_cost(), 20);

    // ACT
    let executed = execute_plan(&plan);

    // ASSERT
    assert!(executed.is_consistent());
    // vehicle 1 is due earlier and boards the small truck
    assert_eq!(
        executed.route_of(VehicleIdx(1)),
        Some(&Route::from_trucks([TruckIdx(0)], &network))
    );
    assert_eq!(
        executed.route_of(VehicleIdx(0)),
        Some(&Route::from_trucks([TruckIdx(1)], &network))
    );
    assert_eq!(executed.total_cost(), 30);
    assert_eq!(executed.number_of_unroutable_vehicles(), 0);
}

#[test]
fn executing_a_feasible_plan_keeps_it() {
    // ARRANGE
    let d = init_test_data();
    let mut plan = Encoding::empty(d.network.clone());
    plan.assign(d.veh0, Route::from_trucks([d.plant_dealer1_direct], &d.network))
        .unwrap();
    plan.mark_unroutable(d.veh1, UnroutableReason::NoFeasibleLeg)
        .unwrap();

    // ACT
    let executed = execute_plan(&plan);

    // ASSERT
    assert!(executed.is_consistent());
    assert_eq!(executed.route_of(d.veh0), plan.route_of(d.veh0));
    assert_eq!(executed.total_cost(), plan.total_cost());
    assert_equal(
        executed.unroutable_vehicles(),
        [(d.veh1, UnroutableReason::NoFeasibleLeg)],
    );
}
