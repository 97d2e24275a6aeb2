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

use std::collections::BTreeSet;
use std::fmt;

use model::base_types::{Cost, DayCount, TruckIdx};
use serde::Serialize;

use crate::Encoding;

/// key figures of an encoding, as reported per solver run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub number_of_vehicles: usize,
    pub routed_vehicles: usize,
    pub unroutable_vehicles: usize,
    pub delayed_vehicles: usize,
    pub planned_delayed_vehicles: usize,
    pub total_days_late: DayCount,
    /// number of (vehicle, leg) pairs on trucks with a positive price
    pub vehicles_on_priced_trucks: usize,
    pub used_trucks: usize,
    pub price_for_trucks: Cost,
    pub price_for_delays: Cost,
    pub objective_value: Cost,
}

impl Metrics {
    pub fn of(encoding: &Encoding) -> Metrics {
        let network = encoding.network();
        let mut used_trucks: BTreeSet<TruckIdx> = BTreeSet::new();
        let mut vehicles_on_priced_trucks = 0;
        let mut delayed_vehicles = 0;
        let mut planned_delayed_vehicles = 0;
        let mut total_days_late = 0;

        for assignment in encoding.vehicle_assignments() {
            for truck in assignment.route().trucks() {
                used_trucks.insert(truck);
                if network.price_of(truck) > 0 {
                    vehicles_on_priced_trucks += 1;
                }
            }
            if assignment.is_delayed() {
                delayed_vehicles += 1;
                total_days_late += assignment.days_late();
                if assignment.is_planned_delay() {
                    planned_delayed_vehicles += 1;
                }
            }
        }

        Metrics {
            number_of_vehicles: network.number_of_vehicles(),
            routed_vehicles: encoding.number_of_routed_vehicles(),
            unroutable_vehicles: network.number_of_vehicles() - encoding.number_of_routed_vehicles(),
            delayed_vehicles,
            planned_delayed_vehicles,
            total_days_late,
            vehicles_on_priced_trucks,
            used_trucks: used_trucks.len(),
            price_for_trucks: encoding.total_cost(),
            price_for_delays: encoding.delay_cost(),
            objective_value: encoding.objective_value(),
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "number of vehicles: {}", self.number_of_vehicles)?;
        writeln!(f, "routed vehicles: {}", self.routed_vehicles)?;
        writeln!(f, "unroutable vehicles: {}", self.unroutable_vehicles)?;
        writeln!(f, "delayed vehicles: {}", self.delayed_vehicles)?;
        writeln!(f, "planned delayed vehicles: {}", self.planned_delayed_vehicles)?;
        writeln!(f, "total days late: {}", self.total_days_late)?;
        writeln!(f, "vehicles on priced trucks: {}", self.vehicles_on_priced_trucks)?;
        writeln!(f, "used trucks: {}", self.used_trucks)?;
        writeln!(f, "price for trucks: {}", self.price_for_trucks)?;
        writeln!(f, "price for delays: {}", self.price_for_delays)?;
        writeln!(f, "objective value: {}", self.objective_value)
    }
}
