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

use model::base_types::VehicleIdx;

use crate::error::{AssignmentError, UnroutableReason};
use crate::route::Route;
use crate::vehicle_assignment::VehicleAssignment;

use super::Encoding;

impl Encoding {
    /// records the route of the vehicle and loads the vehicle on every truck of the route.
    ///
    /// Fails with InfeasibleRoute if the legs do not chain from origin to destination and with
    /// CapacityExceeded if a truck of the route is full. On failure nothing is changed.
    /// A vehicle previously marked as unroutable loses this mark.
    pub fn assign(&mut self, vehicle: VehicleIdx, route: Route) -> Result<(), AssignmentError> {
        let network = self.network.clone();
        let vehicle_data = network
            .vehicle(vehicle)
            .ok_or(AssignmentError::UnknownVehicle(vehicle))?;
        if self.is_assigned(vehicle) {
            return Err(AssignmentError::AlreadyAssigned(vehicle));
        }
        route
            .check(vehicle_data, &network)
            .map_err(|violation| AssignmentError::InfeasibleRoute { vehicle, violation })?;
        if let Some(truck) = route.trucks().find(|&t| !self.has_spare_capacity(t)) {
            return Err(AssignmentError::CapacityExceeded { vehicle, truck });
        }

        // from here on nothing can fail
        for truck in route.trucks() {
            if let Err(message) = self.truck_assignments[truck.index()].add(vehicle) {
                unreachable!("capacity was checked before: {}", message);
            }
        }
        let delivery = route.delivery_day(vehicle_data, &network);
        let price = route.price(&network);
        let delay_cost = network.delay_cost(vehicle_data, delivery);
        self.total_cost += price;
        self.delay_cost += delay_cost;
        self.unroutable.remove(&vehicle);
        self.vehicle_assignments.insert(
            vehicle,
            VehicleAssignment::new(
                vehicle,
                route,
                delivery,
                price,
                network.days_late(vehicle_data, delivery),
                network.delay_is_planned(vehicle_data),
                delay_cost,
            ),
        );
        Ok(())
    }

    /// removes the vehicle from all trucks of its route and returns the route.
    pub fn unassign(&mut self, vehicle: VehicleIdx) -> Result<Route, AssignmentError> {
        let assignment = self
            .vehicle_assignments
            .remove(&vehicle)
            .ok_or(AssignmentError::NotAssigned(vehicle))?;
        for truck in assignment.route().trucks() {
            if let Err(message) = self.truck_assignments[truck.index()].remove(vehicle) {
                unreachable!("views of the encoding diverged: {}", message);
            }
        }
        self.total_cost -= assignment.price();
        self.delay_cost -= assignment.delay_cost();
        Ok(assignment.into_route())
    }

    /// records that a solver could not find a route for the vehicle.
    pub fn mark_unroutable(
        &mut self,
        vehicle: VehicleIdx,
        reason: UnroutableReason,
    ) -> Result<(), AssignmentError> {
        if self.network.vehicle(vehicle).is_none() {
            return Err(AssignmentError::UnknownVehicle(vehicle));
        }
        if self.is_assigned(vehicle) {
            return Err(AssignmentError::AlreadyAssigned(vehicle));
        }
        tracing::debug!("{} is unroutable: {}", vehicle, reason);
        self.unroutable.insert(vehicle, reason);
        Ok(())
    }
}
