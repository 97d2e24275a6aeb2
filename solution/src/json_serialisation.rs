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


use model::network::Network;
use serde::Serialize;

use crate::{Encoding, Metrics, UnroutableReason, VehicleAssignment};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonLeg {
    origin: String,
    destination: String,
    truck_number: u32,
    departure_day: i32,
    arrival_day: i32,
    price: i64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonRoute {
    vehicle: u32,
    origin: String,
    destination: String,
    delivery_day: i32,
    days_late: i32,
    delay_cost: i64,
    legs: Vec<JsonLeg>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonUnroutable {
    vehicle: u32,
    reason: UnroutableReason,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonOutput {
    metrics: Metrics,
    routes: Vec<JsonRoute>,
    unroutable: Vec<JsonUnroutable>,
}

pub fn write_encoding_to_json(encoding: &Encoding, path: &std::path::Path) -> Result<(), std::io::Error> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &encoding_to_json(encoding))?;
    Ok(())
}

pub fn encoding_to_json(encoding: &Encoding) -> serde_json::Value {
    let network = encoding.network();
    let output = JsonOutput {
        metrics: Metrics::of(encoding),
        routes: encoding
            .vehicle_assignments()
            .map(|assignment| route_to_json(assignment, network))
            .collect(),
        unroutable: encoding
            .unroutable_vehicles()
            .map(|(vehicle, reason)| JsonUnroutable {
                vehicle: vehicle.0,
                reason,
            })
            .collect(),
    };
    serde_json::json!(output)
}

fn route_to_json(assignment: &VehicleAssignment, network: &Network) -> JsonRoute {
    let location_name = |location| network.location(location).name().to_string();
    let legs = assignment
        .route()
        .trucks()
        .map(|truck| {
            let truck = network.truck(truck);
            JsonLeg {
                origin: location_name(truck.origin()),
                destination: location_name(truck.destination()),
                truck_number: truck.number(),
                departure_day: truck.departure().value(),
                arrival_day: truck.arrival().value(),
                price: truck.price(),
            }
        })
        .collect();
    // vehicles of an assignment are part of the network
    let (origin, destination) = network
        .vehicle(assignment.vehicle())
        .map(|vehicle| (location_name(vehicle.origin()), location_name(vehicle.destination())))
        .unwrap_or_default();
    JsonRoute {
        vehicle: assignment.vehicle().0,
        origin,
        destination,
        delivery_day: assignment.delivery().value(),
        days_late: assignment.days_late(),
        delay_cost: assignment.delay_cost(),
        legs,
    }
}
