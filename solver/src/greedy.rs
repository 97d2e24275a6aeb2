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


use std::sync::Arc;

use model::base_types::{Cost, Day, LocationIdx, TruckIdx, VehicleIdx};
use model::network::Network;
use model::vehicles::Vehicle;
use solution::{Encoding, Route, UnroutableReason};

use crate::{deliver_vehicles_already_at_destination, SolveOptions, Solver, SolverOutcome};

pub struct GreedySolver {
    network: Arc<Network>,
}

impl Solver for GreedySolver {
    fn initialize(network: Arc<Network>, _options: SolveOptions) -> Self {
        GreedySolver { network }
    }

    fn solve(&self) -> SolverOutcome {
        let mut encoding = Encoding::empty(self.network.clone());
        deliver_vehicles_already_at_destination(&mut encoding);

        for vehicle in self.network.vehicles_by_availability() {
            if encoding.is_assigned(vehicle) {
                continue;
            }
            let route = greedy_route(&encoding, vehicle);
            route_or_mark(&mut encoding, vehicle, route);
        }
        SolverOutcome::heuristic(encoding)
    }
}

/// builds a route leg by leg, each time taking the cheapest leg that is currently feasible.
///
/// A leg is feasible if its truck has spare capacity, it departs from the current location on
/// or after the ready day, it does not lead back to a location of the partial route and the
/// destination can still be reached from its end. The incremental cost is the price of the leg
/// plus the delay cost if the leg delivers; ties are broken by earlier arrival, then truck
/// index. Returns None if the search gets stuck.
pub fn greedy_route(encoding: &Encoding, vehicle: VehicleIdx) -> Option<Route> {
    let network = encoding.network();
    let vehicle = network.vehicle(vehicle)?;
    let trucks = greedy_legs(
        network,
        vehicle,
        vehicle.origin(),
        vehicle.available(),
        vec![vehicle.origin()],
        |truck| encoding.has_spare_capacity(truck),
    )?;
    Some(Route::from_trucks(trucks, network))
}

/// the leg by leg search of [`greedy_route`] starting at `location` on day `ready`, where
/// `visited` holds the locations the vehicle has already been at. Only trucks accepted by
/// `usable` are considered.
pub(crate) fn greedy_legs(
    network: &Network,
    vehicle: &Vehicle,
    mut location: LocationIdx,
    mut ready: Day,
    mut visited: Vec<LocationIdx>,
    usable: impl Fn(TruckIdx) -> bool,
) -> Option<Vec<TruckIdx>> {
    let destination = vehicle.destination();
    let mut trucks: Vec<TruckIdx> = Vec::new();

    while location != destination {
        let (_, _, next) = network
            .departures_from(location, ready)
            .filter(|&truck| usable(truck))
            .filter(|&truck| {
                let end = network.truck(truck).destination();
                !visited.contains(&end)
                    && (end == destination || network.can_reach(end, destination))
            })
            .map(|truck| {
                let arrival = network.truck(truck).arrival();
                (incremental_cost(network, vehicle, truck), arrival, truck)
            })
            .min()?;

        trucks.push(next);
        location = network.truck(next).destination();
        ready = network.ready_day(next);
        visited.push(location);
    }
    Some(trucks)
}

fn incremental_cost(network: &Network, vehicle: &Vehicle, truck: TruckIdx) -> Cost {
    let leg = network.truck(truck);
    let delay_cost = if leg.destination() == vehicle.destination() {
        network.delay_cost(vehicle, leg.arrival())
    } else {
        0
    };
    leg.price() + delay_cost
}

/// assigns the route if there is one, otherwise the vehicle is marked as unroutable.
pub(crate) fn route_or_mark(encoding: &mut Encoding, vehicle: VehicleIdx, route: Option<Route>) {
    let result = match route {
        Some(route) => encoding.assign(vehicle, route),
        None => encoding.mark_unroutable(vehicle, UnroutableReason::NoFeasibleLeg),
    };
    if let Err(err) = result {
        // the search only uses trucks with spare capacity
        tracing::warn!("could not route {}: {}", vehicle, err);
        if let Err(err) = encoding.mark_unroutable(vehicle, UnroutableReason::NoFeasibleLeg) {
            tracing::warn!("{}", err);
        }
    }
}
