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

use model::base_types::{Cost, Day, DayCount, VehicleIdx};

use crate::route::Route;

/// the route of a vehicle together with the derived delivery day and costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleAssignment {
    vehicle: VehicleIdx,
    route: Route,
    delivery: Day,
    price: Cost,
    days_late: DayCount,
    planned_delay: bool,
    delay_cost: Cost,
}

impl VehicleAssignment {
    pub(crate) fn new(
        vehicle: VehicleIdx,
        route: Route,
        delivery: Day,
        price: Cost,
        days_late: DayCount,
        planned_delay: bool,
        delay_cost: Cost,
    ) -> VehicleAssignment {
        VehicleAssignment {
            vehicle,
            route,
            delivery,
            price,
            days_late,
            planned_delay,
            delay_cost,
        }
    }

    pub fn vehicle(&self) -> VehicleIdx {
        self.vehicle
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn delivery(&self) -> Day {
        self.delivery
    }

    /// sum of the leg prices
    pub fn price(&self) -> Cost {
        self.price
    }

    pub fn days_late(&self) -> DayCount {
        self.days_late
    }

    pub fn is_delayed(&self) -> bool {
        self.days_late > 0
    }

    /// only meaningful if the vehicle is delayed
    pub fn is_planned_delay(&self) -> bool {
        self.planned_delay
    }

    pub fn delay_cost(&self) -> Cost {
        self.delay_cost
    }

    pub fn cost(&self) -> Cost {
        self.price + self.delay_cost
    }

    pub(crate) fn into_route(self) -> Route {
        self.route
    }
}
