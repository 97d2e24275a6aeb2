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

use crate::base_types::{Capacity, Cost, Day, LocationIdx, TransportIdx, TruckIdx};

/// a scheduled connection between two locations. All trucks of a transport share origin,
/// destination, departure and arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    idx: TransportIdx,
    origin: LocationIdx,
    destination: LocationIdx,
    departure: Day,
    arrival: Day,
    trucks: Vec<TruckIdx>,
}

impl Transport {
    pub fn new(
        idx: TransportIdx,
        origin: LocationIdx,
        destination: LocationIdx,
        departure: Day,
        arrival: Day,
        trucks: Vec<TruckIdx>,
    ) -> Transport {
        Transport {
            idx,
            origin,
            destination,
            departure,
            arrival,
            trucks,
        }
    }

    pub fn idx(&self) -> TransportIdx {
        self.idx
    }

    pub fn origin(&self) -> LocationIdx {
        self.origin
    }

    pub fn destination(&self) -> LocationIdx {
        self.destination
    }

    pub fn departure(&self) -> Day {
        self.departure
    }

    pub fn arrival(&self) -> Day {
        self.arrival
    }

    pub fn trucks(&self) -> &[TruckIdx] {
        &self.trucks
    }
}

/// a truck operating a transport. The schedule of the transport is copied into the truck for
/// faster access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truck {
    idx: TruckIdx,
    transport: TransportIdx,
    number: u32, // distinguishes trucks of the same transport
    origin: LocationIdx,
    destination: LocationIdx,
    departure: Day,
    arrival: Day,
    capacity: Capacity, // the capacity that solvers are allowed to use
    realised_capacity: Capacity,
    price: Cost, // per vehicle
}

impl Truck {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        idx: TruckIdx,
        transport: TransportIdx,
        number: u32,
        origin: LocationIdx,
        destination: LocationIdx,
        departure: Day,
        arrival: Day,
        capacity: Capacity,
        realised_capacity: Capacity,
        price: Cost,
    ) -> Truck {
        Truck {
            idx,
            transport,
            number,
            origin,
            destination,
            departure,
            arrival,
            capacity,
            realised_capacity,
            price,
        }
    }

    pub fn idx(&self) -> TruckIdx {
        self.idx
    }

    pub fn transport(&self) -> TransportIdx {
        self.transport
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn origin(&self) -> LocationIdx {
        self.origin
    }

    pub fn destination(&self) -> LocationIdx {
        self.destination
    }

    pub fn departure(&self) -> Day {
        self.departure
    }

    pub fn arrival(&self) -> Day {
        self.arrival
    }

    /// capacity available for planning. In the deterministic setting this equals the realised
    /// capacity, in the real-time setting it is the revealed capacity.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn realised_capacity(&self) -> Capacity {
        self.realised_capacity
    }

    /// price per transported vehicle
    pub fn price(&self) -> Cost {
        self.price
    }
}
