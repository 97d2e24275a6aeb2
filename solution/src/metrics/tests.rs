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

use model::base_types::{TruckIdx, VehicleIdx};
use model::json_serialisation::load_network_from_json;
use model::test_utilities::{init_test_data, single_transport_instance};
use model::uncertainty::CapacityRevelation;
use serde_json::json;

use crate::route::Route;
use crate::{Encoding, Metrics, UnroutableReason};

#[test]
fn metrics_of_multi_hop_encoding() {
    // ARRANGE
    let d = init_test_data();
    let mut encoding = Encoding::empty(d.network.clone());
    encoding
        .assign(
            d.veh0,
            Route::from_trucks([d.plant_terminal_cheap, d.terminal_dealer1_late], &d.network),
        )
        .unwrap();
    encoding
        .assign(d.veh1, Route::from_trucks([d.plant_dealer1_direct], &d.network))
        .unwrap();
    encoding
        .mark_unroutable(d.veh2, UnroutableReason::NoFeasibleLeg)
        .unwrap();

    // ACT
    let metrics = Metrics::of(&encoding);

    // ASSERT
    assert_eq!(metrics.number_of_vehicles, 5);
    assert_eq!(metrics.routed_vehicles, 2);
    assert_eq!(metrics.unroutable_vehicles, 3);
    assert_eq!(metrics.delayed_vehicles, 0);
    assert_eq!(metrics.vehicles_on_priced_trucks, 3);
    assert_eq!(metrics.used_trucks, 3);
    assert_eq!(metrics.price_for_trucks, 42);
    assert_eq!(metrics.price_for_delays, 0);
    assert_eq!(
        metrics.objective_value,
        42 + 3 * d.network.unroutable_penalty()
    );
}

#[test]
fn metrics_count_planned_delays() {
    // ARRANGE
    let mut input = single_transport_instance(3, 0, 3);
    input["vehicles"][0]["dueDay"] = json!(1);
    input["vehicles"][1]["dueDay"] = json!(0);
    input["vehicles"][1]["revealedDay"] = json!(-10);
    let network = load_network_from_json(input, CapacityRevelation::Deterministic).unwrap();
    let mut encoding = Encoding::empty(network.clone());
    for vehicle in [VehicleIdx(0), VehicleIdx(1), VehicleIdx(2)] {
        encoding
            .assign(vehicle, Route::from_trucks([TruckIdx(0)], &network))
            .unwrap();
    }

    // ACT
    let metrics = Metrics::of(&encoding);

    // ASSERT
    assert_eq!(metrics.delayed_vehicles, 2);
    assert_eq!(metrics.planned_delayed_vehicles, 1);
    assert_eq!(metrics.total_days_late, 3);
    assert_eq!(metrics.vehicles_on_priced_trucks, 0);
    assert_eq!(metrics.price_for_trucks, 0);
    assert_eq!(metrics.price_for_delays, 900);
    assert!(metrics.to_string().contains("price for delays: 900"));
}
