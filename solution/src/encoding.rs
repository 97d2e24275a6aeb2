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

mod modifications;

use itertools::Itertools;
use model::base_types::{Capacity, Cost, Idx, TruckIdx, VehicleIdx};
use model::network::Network;

use crate::error::UnroutableReason;
use crate::route::Route;
use crate::truck_assignment::TruckAssignment;
use crate::vehicle_assignment::VehicleAssignment;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// an assignment of vehicles to trucks, kept in two synchronized views:
/// the route of each vehicle and the load of each truck.
///
/// The views can only be modified together through assign and unassign, so for every
/// vehicle v with a leg on truck t, the load of t contains v, and vice versa.
#[derive(Clone)]
pub struct Encoding {
    // the routed vehicles
    vehicle_assignments: BTreeMap<VehicleIdx, VehicleAssignment>,

    // for each truck (indexed by TruckIdx) the vehicles it carries
    truck_assignments: Vec<TruckAssignment>,

    // vehicles that a solver gave up on; never assigned at the same time
    unroutable: BTreeMap<VehicleIdx, UnroutableReason>,

    // redundant information for faster access
    total_cost: Cost,
    delay_cost: Cost,

    network: Arc<Network>,
}

// static functions
impl Encoding {
    /// an encoding without any assignment
    pub fn empty(network: Arc<Network>) -> Encoding {
        let truck_assignments = network
            .trucks_iter()
            .map(|truck| TruckAssignment::empty(truck, network.capacity_of(truck)))
            .collect();
        Encoding {
            vehicle_assignments: BTreeMap::new(),
            truck_assignments,
            unroutable: BTreeMap::new(),
            total_cost: 0,
            delay_cost: 0,
            network,
        }
    }

    /// an encoding without any assignment whose trucks hold their realised capacity. Used to
    /// execute a plan made with revealed capacities.
    pub fn empty_with_realised_capacities(network: Arc<Network>) -> Encoding {
        let truck_assignments = network
            .trucks_iter()
            .map(|truck| {
                TruckAssignment::empty(truck, network.truck(truck).realised_capacity())
            })
            .collect();
        Encoding {
            vehicle_assignments: BTreeMap::new(),
            truck_assignments,
            unroutable: BTreeMap::new(),
            total_cost: 0,
            delay_cost: 0,
            network,
        }
    }
}

// basic methods
impl Encoding {
    pub fn network(&self) -> &Arc<Network> {
        &self.network
    }

    pub fn is_assigned(&self, vehicle: VehicleIdx) -> bool {
        self.vehicle_assignments.contains_key(&vehicle)
    }

    pub fn assignment_of(&self, vehicle: VehicleIdx) -> Option<&VehicleAssignment> {
        self.vehicle_assignments.get(&vehicle)
    }

    pub fn route_of(&self, vehicle: VehicleIdx) -> Option<&Route> {
        self.assignment_of(vehicle).map(|assignment| assignment.route())
    }

    /// assignments sorted by VehicleIdx
    pub fn vehicle_assignments(&self) -> impl Iterator<Item = &VehicleAssignment> + '_ {
        self.vehicle_assignments.values()
    }

    pub fn truck_assignment(&self, truck: TruckIdx) -> &TruckAssignment {
        &self.truck_assignments[truck.index()]
    }

    /// all trucks (also the empty ones) sorted by TruckIdx
    pub fn truck_assignments(&self) -> impl Iterator<Item = &TruckAssignment> + '_ {
        self.truck_assignments.iter()
    }

    pub fn load_of(&self, truck: TruckIdx) -> &[VehicleIdx] {
        self.truck_assignment(truck).load()
    }

    pub fn remaining_capacity(&self, truck: TruckIdx) -> Capacity {
        self.truck_assignment(truck).remaining_capacity()
    }

    pub fn has_spare_capacity(&self, truck: TruckIdx) -> bool {
        self.remaining_capacity(truck) > 0
    }

    pub fn number_of_routed_vehicles(&self) -> usize {
        self.vehicle_assignments.len()
    }

    pub fn is_unroutable(&self, vehicle: VehicleIdx) -> bool {
        self.unroutable.contains_key(&vehicle)
    }

    /// vehicles marked as unroutable together with the reason, sorted by VehicleIdx
    pub fn unroutable_vehicles(
        &self,
    ) -> impl Iterator<Item = (VehicleIdx, UnroutableReason)> + '_ {
        self.unroutable.iter().map(|(&v, &reason)| (v, reason))
    }

    pub fn number_of_unroutable_vehicles(&self) -> usize {
        self.unroutable.len()
    }

    /// vehicles of the network that are neither assigned nor marked as unroutable
    pub fn unprocessed_vehicles(&self) -> impl Iterator<Item = VehicleIdx> + '_ {
        self.network
            .vehicles_iter()
            .filter(|v| !self.is_assigned(*v) && !self.is_unroutable(*v))
    }

    /// sum of the per-leg prices over all routed vehicles
    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    /// sum of the delay costs over all routed vehicles
    pub fn delay_cost(&self) -> Cost {
        self.delay_cost
    }

    /// total cost plus delay cost plus the unroutable penalty for every vehicle without route.
    pub fn objective_value(&self) -> Cost {
        let not_routed = (self.network.number_of_vehicles() - self.number_of_routed_vehicles()) as Cost;
        self.total_cost + self.delay_cost + not_routed * self.network.unroutable_penalty()
    }
}

// consistency checks (used for testing and debugging)
impl Encoding {
    pub fn is_consistent(&self) -> bool {
        self.check_consistency().is_ok()
    }

    /// verifies that both views agree, that no truck is overloaded, that every route is
    /// feasible and that the redundant costs are correct. A truck is overloaded if it carries
    /// more than the capacity of the encoding or more than its realised capacity, so a plan
    /// made with a too optimistic revealed capacity is not consistent before it is executed.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.truck_assignments.len() != self.network.number_of_trucks() {
            return Err(String::from("number of truck assignments differs from network"));
        }

        let mut total_cost = 0;
        let mut delay_cost = 0;
        for (vehicle, assignment) in self.vehicle_assignments.iter() {
            if assignment.vehicle() != *vehicle {
                return Err(format!("assignment of {} is stored under {}", assignment.vehicle(), vehicle));
            }
            let vehicle_data = self
                .network
                .vehicle(*vehicle)
                .ok_or_else(|| format!("{} is not part of the network", vehicle))?;
            assignment
                .route()
                .check(vehicle_data, &self.network)
                .map_err(|violation| format!("route of {} is infeasible: {}", vehicle, violation))?;
            for truck in assignment.route().trucks() {
                if !self.truck_assignment(truck).contains(*vehicle) {
                    return Err(format!("{} uses {} but is not loaded on it", vehicle, truck));
                }
            }
            if self.unroutable.contains_key(vehicle) {
                return Err(format!("{} is assigned and unroutable", vehicle));
            }

            let delivery = assignment.route().delivery_day(vehicle_data, &self.network);
            if delivery != assignment.delivery()
                || assignment.price() != assignment.route().price(&self.network)
                || assignment.delay_cost() != self.network.delay_cost(vehicle_data, delivery)
            {
                return Err(format!("derived values of {} are outdated", vehicle));
            }
            total_cost += assignment.price();
            delay_cost += assignment.delay_cost();
        }

        for (position, truck_assignment) in self.truck_assignments.iter().enumerate() {
            let truck = TruckIdx(position as Idx);
            if truck_assignment.truck() != truck {
                return Err(format!("load of {} is stored under {}", truck_assignment.truck(), truck));
            }
            if truck_assignment.len() > truck_assignment.capacity() as usize {
                return Err(format!(
                    "{} carries {} vehicles but has capacity {}",
                    truck,
                    truck_assignment.len(),
                    truck_assignment.capacity()
                ));
            }
            let realised = self.network.truck(truck).realised_capacity();
            if truck_assignment.capacity() != self.network.capacity_of(truck)
                && truck_assignment.capacity() != realised
            {
                return Err(format!("capacity of {} differs from network", truck));
            }
            if truck_assignment.len() > realised as usize {
                return Err(format!(
                    "{} carries {} vehicles but only {} fit on it",
                    truck,
                    truck_assignment.len(),
                    realised
                ));
            }
            if !truck_assignment.load().iter().tuple_windows().all(|(a, b)| a < b) {
                return Err(format!("load of {} is not sorted", truck));
            }
            for vehicle in truck_assignment.load() {
                match self.route_of(*vehicle) {
                    Some(route) if route.uses(truck) => {}
                    _ => {
                        return Err(format!("{} carries {} which does not use it", truck, vehicle));
                    }
                }
            }
        }

        if total_cost != self.total_cost || delay_cost != self.delay_cost {
            return Err(format!(
                "stored costs ({}, {}) differ from recomputed costs ({}, {})",
                self.total_cost, self.delay_cost, total_cost, delay_cost
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for assignment in self.vehicle_assignments.values() {
            write!(
                f,
                "{}: {} (delivered {}, price {}",
                assignment.vehicle(),
                assignment.route(),
                assignment.delivery(),
                assignment.price()
            )?;
            if assignment.is_delayed() {
                write!(
                    f,
                    ", {} days late, delay cost {}",
                    assignment.days_late(),
                    assignment.delay_cost()
                )?;
            }
            writeln!(f, ")")?;
        }
        for (vehicle, reason) in self.unroutable.iter() {
            writeln!(f, "{}: unroutable ({})", vehicle, reason)?;
        }
        Ok(())
    }
}
