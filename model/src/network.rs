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

pub mod paths;
#[cfg(test)]
mod tests;

use crate::base_types::{
    Capacity, Cost, Day, DayCount, Idx, LocationIdx, TransportIdx, TruckIdx, VehicleIdx,
};
use crate::config::Config;
use crate::error::DataError;
use crate::locations::{Location, Locations};
use crate::trucks::{Transport, Truck};
use crate::uncertainty::CapacityRevelation;
use crate::vehicles::Vehicle;

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::Arc;

/// the immutable instance: locations, vehicles, transports and trucks of one dataset snapshot.
/// It is shared by all solvers via Arc<Network> and never modified after loading.
pub struct Network {
    locations: Locations,
    vehicles: BTreeMap<VehicleIdx, Vehicle>,
    transports: Vec<Transport>,
    trucks: Vec<Truck>,

    config: Arc<Config>,
    revelation: CapacityRevelation,

    // redundant information for faster access

    // for each location the trucks leaving it, sorted by departure (ties are broken by TruckIdx)
    departures: Vec<Vec<TruckIdx>>,
    // hops[from][to] is the minimal number of transports needed to get from one location to
    // another ignoring time; None if unreachable.
    hops: Vec<Vec<Option<u32>>>,
    // vehicles sorted by available day (ties are broken by VehicleIdx)
    vehicles_by_availability: Vec<VehicleIdx>,
    unroutable_penalty: Cost,
}

// methods
impl Network {
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn revelation(&self) -> CapacityRevelation {
        self.revelation
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    pub fn location(&self, location: LocationIdx) -> &Location {
        self.locations.get(location)
    }

    pub fn vehicle(&self, vehicle: VehicleIdx) -> Option<&Vehicle> {
        self.vehicles.get(&vehicle)
    }

    pub fn number_of_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// vehicles sorted by VehicleIdx
    pub fn vehicles_iter(&self) -> impl Iterator<Item = VehicleIdx> + '_ {
        self.vehicles.keys().copied()
    }

    /// vehicles sorted by available day, ties are broken by VehicleIdx
    pub fn vehicles_by_availability(&self) -> impl Iterator<Item = VehicleIdx> + '_ {
        self.vehicles_by_availability.iter().copied()
    }

    pub fn transport(&self, transport: TransportIdx) -> &Transport {
        &self.transports[transport.index()]
    }

    pub fn transports_iter(&self) -> impl Iterator<Item = &Transport> + '_ {
        self.transports.iter()
    }

    pub fn truck(&self, truck: TruckIdx) -> &Truck {
        &self.trucks[truck.index()]
    }

    pub fn contains_truck(&self, truck: TruckIdx) -> bool {
        truck.index() < self.trucks.len()
    }

    pub fn trucks_iter(&self) -> impl Iterator<Item = TruckIdx> + '_ {
        (0..self.trucks.len()).map(|i| TruckIdx(i as Idx))
    }

    pub fn number_of_trucks(&self) -> usize {
        self.trucks.len()
    }

    pub fn capacity_of(&self, truck: TruckIdx) -> Capacity {
        self.truck(truck).capacity()
    }

    pub fn price_of(&self, truck: TruckIdx) -> Cost {
        self.truck(truck).price()
    }

    /// all trucks leaving the location on the given day or later, sorted by departure.
    pub fn departures_from(
        &self,
        location: LocationIdx,
        not_before: Day,
    ) -> impl Iterator<Item = TruckIdx> + '_ {
        let departures = &self.departures[location.index()];
        let start = departures.partition_point(|&t| self.truck(t).departure() < not_before);
        departures[start..].iter().copied()
    }

    /// the first day on which a vehicle that arrived with the truck can depart again.
    /// At plants and terminals a vehicle rests for the configured number of days, at dealers it
    /// can leave on the arrival day.
    pub fn ready_day(&self, truck: TruckIdx) -> Day {
        let truck = self.truck(truck);
        if self.location(truck.destination()).is_dealer() {
            truck.arrival()
        } else {
            truck.arrival() + self.config.transfer_rest_days
        }
    }

    /// returns true iff a vehicle arriving with truck previous can continue with truck next.
    pub fn can_follow(&self, previous: TruckIdx, next: TruckIdx) -> bool {
        self.truck(previous).destination() == self.truck(next).origin()
            && self.truck(next).departure() >= self.ready_day(previous)
    }

    /// minimal number of transports from one location to another, ignoring the schedule.
    pub fn hops_between(&self, from: LocationIdx, to: LocationIdx) -> Option<u32> {
        self.hops[from.index()][to.index()]
    }

    pub fn can_reach(&self, from: LocationIdx, to: LocationIdx) -> bool {
        self.hops_between(from, to).is_some()
    }

    /// a delay is planned if the order is revealed more than the notice period before the due
    /// day; planned delays are cheaper.
    pub fn delay_is_planned(&self, vehicle: &Vehicle) -> bool {
        vehicle.revealed().days_until(vehicle.due()) > self.config.planned_delay_notice_days
    }

    pub fn days_late(&self, vehicle: &Vehicle, delivery: Day) -> DayCount {
        vehicle.due().days_until(delivery).max(0)
    }

    /// cost of delivering the vehicle on the given day (0 if it is on time).
    pub fn delay_cost(&self, vehicle: &Vehicle, delivery: Day) -> Cost {
        self.config
            .tariff(self.delay_is_planned(vehicle))
            .cost(self.days_late(vehicle, delivery))
    }

    /// cost charged for a vehicle that cannot be routed. It is larger than the price of any
    /// location-simple route plus the largest possible delay cost, so routing a vehicle is always
    /// preferred.
    pub fn unroutable_penalty(&self) -> Cost {
        self.unroutable_penalty
    }

    pub fn first_day(&self) -> Option<Day> {
        self.trucks
            .iter()
            .map(|t| t.departure())
            .chain(self.vehicles.values().map(|v| v.available()))
            .min()
    }

    pub fn last_day(&self) -> Option<Day> {
        self.trucks.iter().map(|t| t.arrival()).max()
    }
}

impl Network {
    /// creates a new network from the given data.
    /// The idx of each transport and each truck must equal its position in the given vector.
    pub fn new(
        locations: Locations,
        vehicles: Vec<Vehicle>,
        transports: Vec<Transport>,
        trucks: Vec<Truck>,
        config: Config,
        revelation: CapacityRevelation,
    ) -> Result<Network, DataError> {
        let mut vehicle_lookup = BTreeMap::new();
        for vehicle in vehicles.into_iter() {
            let idx = vehicle.idx();
            if vehicle_lookup.insert(idx, vehicle).is_some() {
                return Err(DataError::DuplicateVehicle(idx));
            }
        }

        let mut departures: Vec<Vec<TruckIdx>> = vec![Vec::new(); locations.len()];
        for truck in trucks.iter() {
            departures[truck.origin().index()].push(truck.idx());
        }
        for list in departures.iter_mut() {
            list.sort_by_key(|&t| (trucks[t.index()].departure(), t));
        }

        let hops = compute_hops(&locations, &trucks);

        let mut vehicles_by_availability: Vec<VehicleIdx> = vehicle_lookup.keys().copied().collect();
        vehicles_by_availability.sort_by_key(|v| (vehicle_lookup[v].available(), *v));

        let mut network = Network {
            locations,
            vehicles: vehicle_lookup,
            transports,
            trucks,
            config: Arc::new(config),
            revelation,
            departures,
            hops,
            vehicles_by_availability,
            unroutable_penalty: 0,
        };
        network.unroutable_penalty = network.compute_unroutable_penalty();
        Ok(network)
    }

    fn compute_unroutable_penalty(&self) -> Cost {
        let all_prices: Cost = self.trucks.iter().map(|t| t.price()).sum();
        let latest_delivery = self.last_day();
        let largest_delay_cost = match latest_delivery {
            Some(latest) => self
                .vehicles
                .values()
                .map(|v| self.delay_cost(v, latest))
                .max()
                .unwrap_or(0),
            None => 0,
        };
        all_prices + largest_delay_cost + 1
    }
}

/// breadth-first search from every location over the location graph induced by the trucks.
fn compute_hops(locations: &Locations, trucks: &[Truck]) -> Vec<Vec<Option<u32>>> {
    let n = locations.len();
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for truck in trucks.iter() {
        let (from, to) = (truck.origin().index(), truck.destination().index());
        if !neighbors[from].contains(&to) {
            neighbors[from].push(to);
        }
    }

    (0..n)
        .map(|source| {
            let mut distance: Vec<Option<u32>> = vec![None; n];
            distance[source] = Some(0);
            let mut queue = VecDeque::from([source]);
            while let Some(current) = queue.pop_front() {
                let next_distance = distance[current].map(|d| d + 1);
                for &next in neighbors[current].iter() {
                    if distance[next].is_none() {
                        distance[next] = next_distance;
                        queue.push_back(next);
                    }
                }
            }
            distance
        })
        .collect()
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "** network with {} locations, {} vehicles, {} transports and {} trucks **",
            self.locations.len(),
            self.vehicles.len(),
            self.transports.len(),
            self.trucks.len()
        )?;
        for transport in self.transports.iter() {
            write!(
                f,
                "{}: {} -> {} ({} - {}) trucks:",
                transport.idx(),
                self.location(transport.origin()).name(),
                self.location(transport.destination()).name(),
                transport.departure(),
                transport.arrival()
            )?;
            for &truck in transport.trucks() {
                write!(
                    f,
                    " {}[cap {}, price {}]",
                    truck,
                    self.capacity_of(truck),
                    self.price_of(truck)
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
