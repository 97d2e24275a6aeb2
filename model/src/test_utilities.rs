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

//! small instances shared by the tests of all crates.

use std::sync::Arc;

use serde_json::json;

use crate::base_types::{LocationIdx, TruckIdx, VehicleIdx};
use crate::json_serialisation::load_network_from_json;
use crate::network::Network;
use crate::uncertainty::CapacityRevelation;

pub struct TestData {
    pub network: Arc<Network>,
    pub plant: LocationIdx,
    pub terminal: LocationIdx,
    pub dealer1: LocationIdx,
    pub dealer2: LocationIdx,
    pub plant_terminal_cheap: TruckIdx,     // day 0 -> 1, capacity 2, price 10
    pub plant_terminal_expensive: TruckIdx, // day 0 -> 1, capacity 2, price 15
    pub plant_dealer1_direct: TruckIdx,     // day 0 -> 4, capacity 1, price 30
    pub terminal_dealer1_early: TruckIdx,   // day 2 -> 3, capacity 3, price 5
    pub terminal_dealer2: TruckIdx,         // day 2 -> 3, capacity 4, price 6
    pub terminal_dealer1_late: TruckIdx,    // day 3 -> 4, capacity 3, price 2
    pub veh0: VehicleIdx, // veh0 to veh3 go to dealer1 (due day 4)
    pub veh1: VehicleIdx,
    pub veh2: VehicleIdx,
    pub veh3: VehicleIdx,
    pub veh4: VehicleIdx, // goes to dealer2 (due day 3)
}

/// one plant, one terminal and two dealers; five vehicles available on day 0.
/// The cheapest assignment routing all vehicles costs 92.
pub fn multi_hop_instance() -> serde_json::Value {
    json!({
        "locations": [
            {"name": "GER01", "type": "PLANT"},
            {"name": "GER02", "type": "TERM"},
            {"name": "FRA01", "type": "DEAL"},
            {"name": "FRA02", "type": "DEAL"}
        ],
        "vehicles": [
            {"id": 0, "origin": "GER01", "destination": "FRA01", "availableDay": 0, "dueDay": 4},
            {"id": 1, "origin": "GER01", "destination": "FRA01", "availableDay": 0, "dueDay": 4},
            {"id": 2, "origin": "GER01", "destination": "FRA01", "availableDay": 0, "dueDay": 4},
            {"id": 3, "origin": "GER01", "destination": "FRA01", "availableDay": 0, "dueDay": 4},
            {"id": 4, "origin": "GER01", "destination": "FRA02", "availableDay": 0, "dueDay": 3}
        ],
        "trucks": [
            {"origin": "GER02", "destination": "FRA01", "truckNumber": 2, "departureDay": 3,
                "arrivalDay": 4, "capacity": 3, "price": 2},
            {"origin": "GER01", "destination": "GER02", "truckNumber": 1, "departureDay": 0,
                "arrivalDay": 1, "capacity": 2, "price": 10},
            {"origin": "GER01", "destination": "GER02", "truckNumber": 2, "departureDay": 0,
                "arrivalDay": 1, "capacity": 2, "price": 15},
            {"origin": "GER01", "destination": "FRA01", "truckNumber": 1, "departureDay": 0,
                "arrivalDay": 4, "capacity": 1, "price": 30},
            {"origin": "GER02", "destination": "FRA01", "truckNumber": 1, "departureDay": 2,
                "arrivalDay": 3, "capacity": 3, "price": 5},
            {"origin": "GER02", "destination": "FRA02", "truckNumber": 1, "departureDay": 2,
                "arrivalDay": 3, "capacity": 4, "price": 6}
        ]
    })
}

pub fn init_test_data() -> TestData {
    let network = load_network_from_json(multi_hop_instance(), CapacityRevelation::Deterministic)
        .unwrap();
    TestData {
        network,
        plant: LocationIdx(0),
        terminal: LocationIdx(1),
        dealer1: LocationIdx(2),
        dealer2: LocationIdx(3),
        // trucks are indexed by (departure, arrival, origin, destination, truck number)
        plant_terminal_cheap: TruckIdx(0),
        plant_terminal_expensive: TruckIdx(1),
        plant_dealer1_direct: TruckIdx(2),
        terminal_dealer1_early: TruckIdx(3),
        terminal_dealer2: TruckIdx(4),
        terminal_dealer1_late: TruckIdx(5),
        veh0: VehicleIdx(0),
        veh1: VehicleIdx(1),
        veh2: VehicleIdx(2),
        veh3: VehicleIdx(3),
        veh4: VehicleIdx(4),
    }
}

/// one plant, one dealer and a single transport (day 1 -> 2) with one truck; the given number
/// of vehicles is available on day 0 and due on day 5.
pub fn single_transport_instance(capacity: i64, price: i64, vehicles: u32) -> serde_json::Value {
    let vehicles: Vec<serde_json::Value> = (0..vehicles)
        .map(|id| {
            json!({"id": id, "origin": "GER01", "destination": "FRA01", "availableDay": 0,
                "dueDay": 5})
        })
        .collect();
    json!({
        "locations": [
            {"name": "GER01", "type": "PLANT"},
            {"name": "FRA01", "type": "DEAL"}
        ],
        "vehicles": vehicles,
        "trucks": [
            {"origin": "GER01", "destination": "FRA01", "truckNumber": 1, "departureDay": 1,
                "arrivalDay": 2, "capacity": capacity, "price": price}
        ]
    })
}

pub fn single_transport_network(capacity: i64, price: i64, vehicles: u32) -> Arc<Network> {
    load_network_from_json(
        single_transport_instance(capacity, price, vehicles),
        CapacityRevelation::Deterministic,
    )
    .unwrap()
}

/// like [`single_transport_network`], but planned in the real-time setting with quantile 0.0
/// while the capacity history promises `planned` vehicles. The truck only carries `realised`.
pub fn overpromised_single_transport_network(
    realised: i64,
    planned: i64,
    vehicles: u32,
) -> Arc<Network> {
    let mut input = single_transport_instance(realised, 10, vehicles);
    input["trucks"][0]["plannedCapacity"] = json!(planned);
    input["trucks"][0]["capacityHistory"] = json!([planned, planned, planned]);
    load_network_from_json(input, CapacityRevelation::Quantile(0.0)).unwrap()
}
