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

use std::fmt;

use itertools::Itertools;
use model::base_types::{Cost, Day, LocationIdx, TransportIdx, TruckIdx};
use model::network::Network;
use model::vehicles::Vehicle;
use thiserror::Error;

/// one scheduled transport traversal of a vehicle on a specific truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Leg {
    transport: TransportIdx,
    truck: TruckIdx,
}

impl Leg {
    pub fn new(transport: TransportIdx, truck: TruckIdx) -> Leg {
        Leg { transport, truck }
    }

    /// the leg on the given truck (the transport is taken from the network).
    pub fn on(truck: TruckIdx, network: &Network) -> Leg {
        Leg {
            transport: network.truck(truck).transport(),
            truck,
        }
    }

    pub fn transport(&self) -> TransportIdx {
        self.transport
    }

    pub fn truck(&self) -> TruckIdx {
        self.truck
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.transport, self.truck)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteViolation {
    #[error("{0} does not exist")]
    UnknownTruck(TruckIdx),
    #[error("{truck} does not operate {transport}")]
    TransportMismatch {
        truck: TruckIdx,
        transport: TransportIdx,
    },
    #[error("route starts at {found} instead of {expected}")]
    WrongOrigin {
        expected: LocationIdx,
        found: LocationIdx,
    },
    #[error("route ends at {found} instead of {expected}")]
    WrongDestination {
        expected: LocationIdx,
        found: LocationIdx,
    },
    #[error("{truck} departs on {departure} but the vehicle is available on {available}")]
    DepartsBeforeAvailable {
        truck: TruckIdx,
        departure: Day,
        available: Day,
    },
    #[error("leg {position} does not continue the previous leg")]
    BrokenChain { position: usize },
    #[error("{0} is used twice")]
    TruckUsedTwice(TruckIdx),
}

/// ordered sequence of legs from a vehicle's plant to its dealer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Route {
    legs: Vec<Leg>,
}

// static functions
impl Route {
    pub fn new(legs: Vec<Leg>) -> Route {
        Route { legs }
    }

    /// the route for a vehicle whose origin is its destination.
    pub fn empty() -> Route {
        Route { legs: Vec::new() }
    }

    pub fn from_trucks(trucks: impl IntoIterator<Item = TruckIdx>, network: &Network) -> Route {
        Route {
            legs: trucks
                .into_iter()
                .map(|truck| Leg::on(truck, network))
                .collect(),
        }
    }
}

// methods
impl Route {
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn trucks(&self) -> impl Iterator<Item = TruckIdx> + '_ {
        self.legs.iter().map(|leg| leg.truck())
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn uses(&self, truck: TruckIdx) -> bool {
        self.legs.iter().any(|leg| leg.truck() == truck)
    }

    /// sum of the per-vehicle prices of all legs.
    pub fn price(&self, network: &Network) -> Cost {
        self.trucks().map(|truck| network.price_of(truck)).sum()
    }

    /// arrival day of the last leg (the available day for an empty route).
    pub fn delivery_day(&self, vehicle: &Vehicle, network: &Network) -> Day {
        match self.legs.last() {
            Some(leg) => network.truck(leg.truck()).arrival(),
            None => vehicle.available(),
        }
    }

    /// verifies that the legs chain by time and location from the vehicle's origin to its
    /// destination. Capacities are not considered.
    pub fn check(&self, vehicle: &Vehicle, network: &Network) -> Result<(), RouteViolation> {
        let mut location = vehicle.origin();
        let mut ready = vehicle.available();
        for (position, leg) in self.legs.iter().enumerate() {
            if !network.contains_truck(leg.truck()) {
                return Err(RouteViolation::UnknownTruck(leg.truck()));
            }
            let truck = network.truck(leg.truck());
            if truck.transport() != leg.transport() {
                return Err(RouteViolation::TransportMismatch {
                    truck: leg.truck(),
                    transport: leg.transport(),
                });
            }
            if self.legs[..position].iter().any(|l| l.truck() == leg.truck()) {
                return Err(RouteViolation::TruckUsedTwice(leg.truck()));
            }
            if position == 0 {
                if truck.origin() != location {
                    return Err(RouteViolation::WrongOrigin {
                        expected: location,
                        found: truck.origin(),
                    });
                }
                if truck.departure() < ready {
                    return Err(RouteViolation::DepartsBeforeAvailable {
                        truck: leg.truck(),
                        departure: truck.departure(),
                        available: ready,
                    });
                }
            } else if truck.origin() != location || truck.departure() < ready {
                return Err(RouteViolation::BrokenChain { position });
            }
            location = truck.destination();
            ready = network.ready_day(leg.truck());
        }
        if location != vehicle.destination() {
            return Err(RouteViolation::WrongDestination {
                expected: vehicle.destination(),
                found: location,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.legs.is_empty() {
            return write!(f, "(empty)");
        }
        write!(f, "{}", self.legs.iter().join(" -> "))
    }
}
