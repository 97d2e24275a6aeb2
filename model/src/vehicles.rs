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

use crate::base_types::{Day, LocationIdx, VehicleIdx};

/// a vehicle (car) that has to be brought from a plant to a dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    idx: VehicleIdx,
    origin: LocationIdx,
    destination: LocationIdx,
    available: Day,
    due: Day,
    revealed: Day, // day on which the order becomes known to the planner
}

impl Vehicle {
    pub fn new(
        idx: VehicleIdx,
        origin: LocationIdx,
        destination: LocationIdx,
        available: Day,
        due: Day,
        revealed: Day,
    ) -> Vehicle {
        Vehicle {
            idx,
            origin,
            destination,
            available,
            due,
            revealed,
        }
    }

    pub fn idx(&self) -> VehicleIdx {
        self.idx
    }

    pub fn origin(&self) -> LocationIdx {
        self.origin
    }

    pub fn destination(&self) -> LocationIdx {
        self.destination
    }

    pub fn available(&self) -> Day {
        self.available
    }

    pub fn due(&self) -> Day {
        self.due
    }

    pub fn revealed(&self) -> Day {
        self.revealed
    }
}
