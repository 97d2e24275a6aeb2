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

use std::collections::BTreeMap;

use model::base_types::{Capacity, LocationIdx, TruckIdx, VehicleIdx};
use solution::{Encoding, Route, UnroutableReason};

use crate::greedy::greedy_legs;

/// executes a plan made with revealed capacities on the realised capacities.
///
/// Trucks depart in the order of their index, which follows the departure day. If a truck
/// carries fewer vehicles than planned, the vehicles with the earliest due day board and the
/// others are re-planned from the origin of the truck with the greedy leg search. For the
/// re-planning, trucks departing on the same day are known with their realised capacity, later
/// trucks only with their revealed capacity. Vehicles left without a route are marked with
/// CapacityShortfall; the legs they already travelled are not part of the result.
pub fn execute_plan(plan: &Encoding) -> Encoding {
    let network = plan.network().clone();
    let mut routes: BTreeMap<VehicleIdx, Vec<TruckIdx>> = plan
        .vehicle_assignments()
        .map(|assignment| (assignment.vehicle(), assignment.route().trucks().collect()))
        .collect();
    // for each truck the vehicles that still intend to use it
    let mut riders: Vec<Vec<VehicleIdx>> = network
        .trucks_iter()
        .map(|truck| plan.load_of(truck).to_vec())
        .collect();
    let mut departed = vec![false; network.number_of_trucks()];
    let mut replanned = 0;
    let mut stranded: Vec<VehicleIdx> = Vec::new();

    for truck in network.trucks_iter() {
        departed[truck.index()] = true;
        let realised = network.truck(truck).realised_capacity() as usize;
        if riders[truck.index()].len() <= realised {
            continue;
        }

        let mut boarding = std::mem::take(&mut riders[truck.index()]);
        boarding.sort_by_key(|&v| (network.vehicle(v).map(|vehicle| vehicle.due()), v));
        let left_behind = boarding.split_off(realised);
        riders[truck.index()] = boarding;
        tracing::debug!(
            "{} carries {} vehicles less than planned",
            truck,
            left_behind.len()
        );

        let today = network.truck(truck).departure();
        let location = network.truck(truck).origin();
        for vehicle in left_behind {
            let (Some(route), Some(vehicle_data)) = (routes.remove(&vehicle), network.vehicle(vehicle))
            else {
                continue;
            };
            let Some(position) = route.iter().position(|&t| t == truck) else {
                tracing::warn!("{} boards {} which is not on its route", vehicle, truck);
                stranded.push(vehicle);
                continue;
            };
            for later in route[position + 1..].iter() {
                riders[later.index()].retain(|&v| v != vehicle);
            }

            let travelled = &route[..position];
            let visited: Vec<LocationIdx> = std::iter::once(vehicle_data.origin())
                .chain(travelled.iter().map(|&t| network.truck(t).destination()))
                .collect();
            let usable = |candidate: TruckIdx| {
                if departed[candidate.index()] {
                    return false;
                }
                let candidate_truck = network.truck(candidate);
                let capacity: Capacity = if candidate_truck.departure() == today {
                    candidate_truck.realised_capacity()
                } else {
                    candidate_truck.capacity()
                };
                (riders[candidate.index()].len() as Capacity) < capacity
            };

            match greedy_legs(&network, vehicle_data, location, today, visited, usable) {
                Some(rest) => {
                    for next in rest.iter() {
                        riders[next.index()].push(vehicle);
                    }
                    let mut new_route = travelled.to_vec();
                    new_route.extend(rest);
                    routes.insert(vehicle, new_route);
                    replanned += 1;
                }
                None => stranded.push(vehicle),
            }
        }
    }

    let mut executed = Encoding::empty_with_realised_capacities(network.clone());
    for (vehicle, trucks) in routes {
        if let Err(err) = executed.assign(vehicle, Route::from_trucks(trucks, &network)) {
            tracing::warn!("could not execute the route of {}: {}", vehicle, err);
            stranded.push(vehicle);
        }
    }
    let unroutable = stranded
        .iter()
        .map(|&vehicle| (vehicle, UnroutableReason::CapacityShortfall))
        .chain(plan.unroutable_vehicles());
    for (vehicle, reason) in unroutable {
        if let Err(err) = executed.mark_unroutable(vehicle, reason) {
            tracing::warn!("{}", err);
        }
    }

    tracing::info!(
        "executed plan on realised capacities: {} vehicles re-planned, {} without route",
        replanned,
        stranded.len()
    );
    executed
}
