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

use model::base_types::{TruckIdx, VehicleIdx};
use serde::Serialize;
use thiserror::Error;

use crate::route::RouteViolation;

/// a rejected mutation of the encoding. The encoding is unchanged whenever one of these is
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("{truck} has no spare capacity for {vehicle}")]
    CapacityExceeded { vehicle: VehicleIdx, truck: TruckIdx },
    #[error("route of {vehicle} is infeasible: {violation}")]
    InfeasibleRoute {
        vehicle: VehicleIdx,
        violation: RouteViolation,
    },
    #[error("{0} is already assigned")]
    AlreadyAssigned(VehicleIdx),
    #[error("{0} is not assigned")]
    NotAssigned(VehicleIdx),
    #[error("{0} does not exist")]
    UnknownVehicle(VehicleIdx),
}

/// why a solver could not route a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnroutableReason {
    /// the greedy search got stuck: no feasible next leg
    NoFeasibleLeg,
    /// no feasible route exists under the remaining truck capacities (flow based solvers)
    NoFeasibleRoute,
    /// the decoded flow could not be turned into a capacity-feasible route
    FlowRoundingInfeasibility,
    /// the optimisation engine failed or proved the model infeasible
    SolverFailure,
    /// a truck carried fewer vehicles than planned and no other route was left
    CapacityShortfall,
}

impl std::fmt::Display for UnroutableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text = match self {
            UnroutableReason::NoFeasibleLeg => "no feasible leg",
            UnroutableReason::NoFeasibleRoute => "no feasible route",
            UnroutableReason::FlowRoundingInfeasibility => "flow rounding infeasibility",
            UnroutableReason::SolverFailure => "solver failure",
            UnroutableReason::CapacityShortfall => "capacity shortfall",
        };
        write!(f, "{}", text)
    }
}
