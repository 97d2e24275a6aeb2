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


use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base_types::{
    Capacity, Cost, Day, DayCount, Idx, LocationIdx, TransportIdx, TruckIdx, VehicleIdx,
};
use crate::config::{Config, ConfigDelayCosts, DelayTariff};
use crate::error::DataError;
use crate::locations::{LocationType, Locations};
use crate::network::Network;
use crate::trucks::{Transport, Truck};
use crate::uncertainty::CapacityRevelation;
use crate::vehicles::Vehicle;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonLocation {
    name: String,
    #[serde(rename = "type")]
    location_type: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonVehicle {
    id: Idx,
    origin: String,
    destination: String,
    available_day: DayCount,
    due_day: DayCount,
    revealed_day: Option<DayCount>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonTruck {
    origin: String,
    destination: String,
    truck_number: u32,
    departure_day: DayCount,
    arrival_day: DayCount,
    capacity: i64,
    planned_capacity: Option<i64>,
    #[serde(default)]
    capacity_history: Vec<i64>,
    price: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
struct JsonDelayTariff {
    fixed: Cost,
    per_day: Cost,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct JsonDelayCosts {
    planned: Option<JsonDelayTariff>,
    unplanned: Option<JsonDelayTariff>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    transfer_rest_days: Option<DayCount>,
    planned_delay_notice_days: Option<DayCount>,
    #[serde(default)]
    delay_costs: JsonDelayCosts,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonInput {
    locations: Vec<JsonLocation>,
    vehicles: Vec<JsonVehicle>,
    trucks: Vec<JsonTruck>,
    #[serde(default)]
    parameters: Parameters,
}

/// the file of the dataset with the given index: `<dataset_dir>/dataset_<index:02>.json`.
pub fn dataset_path(dataset_dir: &Path, dataset_index: usize) -> PathBuf {
    dataset_dir.join(format!("dataset_{:02}.json", dataset_index))
}

/// reads the dataset with the given index from disk and builds the network.
/// In the real-time setting (deterministic == false) the trucks' capacities are replaced by
/// the revealed capacities according to the quantile value.
pub fn load_network(
    dataset_dir: &Path,
    dataset_index: usize,
    deterministic: bool,
    quantile_value: f64,
) -> Result<Arc<Network>, DataError> {
    let revelation = CapacityRevelation::new(deterministic, quantile_value)?;
    load_network_with_revelation(dataset_dir, dataset_index, revelation)
}

/// like [`load_network`] with any capacity revelation policy.
pub fn load_network_with_revelation(
    dataset_dir: &Path,
    dataset_index: usize,
    revelation: CapacityRevelation,
) -> Result<Arc<Network>, DataError> {
    let path = dataset_path(dataset_dir, dataset_index);
    let input_data = read_json_file(&path)?;
    load_network_from_json(input_data, revelation)
}

pub fn read_json_file(path: &Path) -> Result<serde_json::Value, DataError> {
    let io_error = |source: std::io::Error| DataError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = File::open(path).map_err(io_error)?;
    let mut data = String::new();
    file.read_to_string(&mut data).map_err(io_error)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn load_network_from_json(
    input_data: serde_json::Value,
    revelation: CapacityRevelation,
) -> Result<Arc<Network>, DataError> {
    let json_input: JsonInput = serde_json::from_value(input_data)?;
    let locations = create_locations(&json_input)?;
    let vehicles = create_vehicles(&json_input, &locations)?;
    let (transports, trucks) = create_transports_and_trucks(&json_input, &locations, revelation)?;
    let config = create_config(&json_input);
    let network = Network::new(locations, vehicles, transports, trucks, config, revelation)?;
    tracing::debug!(
        "loaded network with {} locations, {} vehicles and {} trucks",
        network.locations().len(),
        network.number_of_vehicles(),
        network.number_of_trucks()
    );
    Ok(Arc::new(network))
}

fn create_locations(json_input: &JsonInput) -> Result<Locations, DataError> {
    let named_types = json_input
        .locations
        .iter()
        .map(|location| {
            LocationType::from_code(&location.location_type)
                .map(|location_type| (location.name.clone(), location_type))
                .ok_or_else(|| DataError::UnknownLocationType {
                    location: location.name.clone(),
                    code: location.location_type.clone(),
                })
        })
        .collect::<Result<Vec<_>, DataError>>()?;
    Locations::new(named_types).map_err(DataError::DuplicateLocation)
}

fn lookup(locations: &Locations, name: &str) -> Result<LocationIdx, DataError> {
    locations
        .idx_of(name)
        .ok_or_else(|| DataError::UnknownLocation(name.to_string()))
}

fn create_vehicles(json_input: &JsonInput, locations: &Locations) -> Result<Vec<Vehicle>, DataError> {
    json_input
        .vehicles
        .iter()
        .map(|vehicle| {
            Ok(Vehicle::new(
                VehicleIdx(vehicle.id),
                lookup(locations, &vehicle.origin)?,
                lookup(locations, &vehicle.destination)?,
                Day(vehicle.available_day),
                Day(vehicle.due_day),
                Day(vehicle.revealed_day.unwrap_or(vehicle.available_day)),
            ))
        })
        .collect()
}

fn create_transports_and_trucks(
    json_input: &JsonInput,
    locations: &Locations,
    revelation: CapacityRevelation,
) -> Result<(Vec<Transport>, Vec<Truck>), DataError> {
    // validate and sort the trucks such that the indices do not depend on the input order
    let mut json_trucks: Vec<(LocationIdx, LocationIdx, &JsonTruck)> = Vec::new();
    let mut seen: HashSet<(LocationIdx, LocationIdx, u32, DayCount)> = HashSet::new();
    for truck in json_input.trucks.iter() {
        let origin = lookup(locations, &truck.origin)?;
        let destination = lookup(locations, &truck.destination)?;
        validate_truck(truck, origin, destination)?;
        if !seen.insert((origin, destination, truck.truck_number, truck.departure_day)) {
            return Err(DataError::DuplicateTruck {
                origin: truck.origin.clone(),
                destination: truck.destination.clone(),
                number: truck.truck_number,
                departure: truck.departure_day,
            });
        }
        json_trucks.push((origin, destination, truck));
    }
    json_trucks.sort_by_key(|(origin, destination, truck)| {
        (
            truck.departure_day,
            truck.arrival_day,
            *origin,
            *destination,
            truck.truck_number,
        )
    });

    let mut transport_lookup: BTreeMap<(DayCount, DayCount, LocationIdx, LocationIdx), TransportIdx> =
        BTreeMap::new();
    let mut transport_trucks: Vec<Vec<TruckIdx>> = Vec::new();
    let mut transport_keys = Vec::new();
    let mut trucks = Vec::with_capacity(json_trucks.len());

    for (position, (origin, destination, truck)) in json_trucks.into_iter().enumerate() {
        let key = (truck.departure_day, truck.arrival_day, origin, destination);
        let transport_idx = *transport_lookup.entry(key).or_insert_with(|| {
            transport_trucks.push(Vec::new());
            transport_keys.push(key);
            TransportIdx((transport_trucks.len() - 1) as Idx)
        });
        let truck_idx = TruckIdx(position as Idx);
        transport_trucks[transport_idx.index()].push(truck_idx);

        // negative history entries count as empty trucks
        let history: Vec<Capacity> = truck
            .capacity_history
            .iter()
            .map(|&c| to_capacity(truck, c.max(0)))
            .collect::<Result<_, _>>()?;
        let realised = to_capacity(truck, truck.capacity)?;
        let planned = truck
            .planned_capacity
            .map(|c| to_capacity(truck, c))
            .transpose()?;
        let capacity = revelation.revealed_capacity(realised, planned, &history);

        trucks.push(Truck::new(
            truck_idx,
            transport_idx,
            truck.truck_number,
            origin,
            destination,
            Day(truck.departure_day),
            Day(truck.arrival_day),
            capacity,
            realised,
            truck.price,
        ));
    }

    let transports = transport_keys
        .into_iter()
        .zip(transport_trucks)
        .enumerate()
        .map(|(i, ((departure, arrival, origin, destination), trucks))| {
            Transport::new(
                TransportIdx(i as Idx),
                origin,
                destination,
                Day(departure),
                Day(arrival),
                trucks,
            )
        })
        .collect();

    Ok((transports, trucks))
}

fn to_capacity(truck: &JsonTruck, capacity: i64) -> Result<Capacity, DataError> {
    Capacity::try_from(capacity).map_err(|_| DataError::CapacityOutOfRange {
        origin: truck.origin.clone(),
        destination: truck.destination.clone(),
        number: truck.truck_number,
        capacity,
    })
}

fn validate_truck(
    truck: &JsonTruck,
    origin: LocationIdx,
    destination: LocationIdx,
) -> Result<(), DataError> {
    for capacity in std::iter::once(truck.capacity).chain(truck.planned_capacity) {
        if capacity <= 0 {
            return Err(DataError::NonPositiveCapacity {
                origin: truck.origin.clone(),
                destination: truck.destination.clone(),
                number: truck.truck_number,
                capacity,
            });
        }
    }
    if truck.price < 0 {
        return Err(DataError::NegativePrice {
            origin: truck.origin.clone(),
            destination: truck.destination.clone(),
            number: truck.truck_number,
            price: truck.price,
        });
    }
    if truck.arrival_day < truck.departure_day {
        return Err(DataError::ArrivalBeforeDeparture {
            origin: truck.origin.clone(),
            destination: truck.destination.clone(),
            number: truck.truck_number,
            departure: truck.departure_day,
            arrival: truck.arrival_day,
        });
    }
    if origin == destination {
        return Err(DataError::Loop {
            location: truck.origin.clone(),
            number: truck.truck_number,
        });
    }
    Ok(())
}

fn create_config(json_input: &JsonInput) -> Config {
    let default = Config::default();
    let parameters = &json_input.parameters;
    let tariff = |json: Option<JsonDelayTariff>, default: DelayTariff| {
        json.map_or(default, |t| DelayTariff {
            fixed: t.fixed,
            per_day: t.per_day,
        })
    };
    Config {
        transfer_rest_days: parameters
            .transfer_rest_days
            .unwrap_or(default.transfer_rest_days),
        planned_delay_notice_days: parameters
            .planned_delay_notice_days
            .unwrap_or(default.planned_delay_notice_days),
        delay_costs: ConfigDelayCosts {
            planned: tariff(
                parameters.delay_costs.planned,
                default.delay_costs.planned,
            ),
            unplanned: tariff(
                parameters.delay_costs.unplanned,
                default.delay_costs.unplanned,
            ),
        },
    }
}
