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

pub mod execution;
pub mod flow_decomposition;
pub mod flow_mip_solver;
pub mod greedy;
pub mod greedy_candidate_paths;
pub mod lower_bound_solver;
pub mod min_cost_flow_solver;
pub mod mip;
pub mod time_expanded_network;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time;

use model::base_types::{Cost, VehicleIdx};
use model::network::Network;
use solution::{Encoding, Route, UnroutableReason};
use thiserror::Error;

use crate::execution::execute_plan;
use crate::flow_mip_solver::FlowMipSolver;
use crate::greedy::GreedySolver;
use crate::greedy_candidate_paths::GreedyCandidatePathsSolver;
use crate::lower_bound_solver::LowerBoundSolver;
use crate::min_cost_flow_solver::MinCostFlowSolver;

pub trait Solver {
    fn initialize(network: Arc<Network>, options: SolveOptions) -> Self
    where
        Self: Sized;

    fn solve(&self) -> SolverOutcome;
}

/// what a single solver hands back; [`solve`] adds the strategy and the running time.
pub struct SolverOutcome {
    pub encoding: Encoding,
    pub lower_bound: Option<f64>,
    pub optimality_gap: Option<OptimalityGap>,
}

impl SolverOutcome {
    pub fn heuristic(encoding: Encoding) -> SolverOutcome {
        SolverOutcome {
            encoding,
            lower_bound: None,
            optimality_gap: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    Greedy,
    GreedyCandidatePaths,
    Flow,
    FlowMip,
    LowerBound,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Greedy,
        Strategy::GreedyCandidatePaths,
        Strategy::Flow,
        Strategy::FlowMip,
        Strategy::LowerBound,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Greedy => "GREEDY",
            Strategy::GreedyCandidatePaths => "GREEDY_CANDIDATE_PATHS",
            Strategy::Flow => "FLOW",
            Strategy::FlowMip => "FLOW_MIP",
            Strategy::LowerBound => "LOWER_BOUND",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown solver strategy '{0}'")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// quality information attached to the result of the exact solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimalityGap {
    /// the engine finished before the time limit
    Proven,
    /// the time limit was hit, the best incumbent is returned
    Unknown,
    /// the model was infeasible or the engine failed
    Infeasible,
}

impl fmt::Display for OptimalityGap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            OptimalityGap::Proven => "proven",
            OptimalityGap::Unknown => "unknown",
            OptimalityGap::Infeasible => "infeasible",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// number of precomputed routes per vehicle (GREEDY_CANDIDATE_PATHS)
    pub candidate_paths: usize,
    /// wall clock limit handed to the MIP engine (FLOW_MIP, LOWER_BOUND)
    pub time_limit: time::Duration,
    /// worker threads of the MIP engine
    pub threads: usize,
    /// check the consistency of the encoding before returning
    pub verify: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            candidate_paths: 3,
            time_limit: time::Duration::from_secs(60),
            threads: rayon::current_num_threads(),
            verify: false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("{strategy} produced an inconsistent encoding: {message}")]
    InconsistentEncoding { strategy: Strategy, message: String },
}

pub struct SolutionResult {
    strategy: Strategy,
    encoding: Encoding,
    lower_bound: Option<f64>,
    running_time: time::Duration,
    optimality_gap: Option<OptimalityGap>,
}

impl SolutionResult {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn into_encoding(self) -> Encoding {
        self.encoding
    }

    pub fn total_cost(&self) -> Cost {
        self.encoding.total_cost()
    }

    pub fn delay_cost(&self) -> Cost {
        self.encoding.delay_cost()
    }

    /// for LOWER_BOUND this is the objective of the empty encoding, use [`Self::lower_bound`].
    pub fn objective_value(&self) -> Cost {
        self.encoding.objective_value()
    }

    pub fn lower_bound(&self) -> Option<f64> {
        self.lower_bound
    }

    pub fn unroutable_vehicles(&self) -> impl Iterator<Item = (VehicleIdx, UnroutableReason)> + '_ {
        self.encoding.unroutable_vehicles()
    }

    pub fn running_time(&self) -> time::Duration {
        self.running_time
    }

    pub fn optimality_gap(&self) -> Option<OptimalityGap> {
        self.optimality_gap
    }
}

/// runs one strategy on the network with a fresh encoding. In the real-time setting the plan is
/// executed on the realised capacities before it is returned.
pub fn solve(
    network: Arc<Network>,
    strategy: Strategy,
    options: &SolveOptions,
) -> Result<SolutionResult, SolveError> {
    tracing::info!(
        "solving {} vehicles with {}",
        network.number_of_vehicles(),
        strategy
    );
    let start_time = time::Instant::now();
    let mut outcome = match strategy {
        Strategy::Greedy => GreedySolver::initialize(network.clone(), options.clone()).solve(),
        Strategy::GreedyCandidatePaths => {
            GreedyCandidatePathsSolver::initialize(network.clone(), options.clone()).solve()
        }
        Strategy::Flow => MinCostFlowSolver::initialize(network.clone(), options.clone()).solve(),
        Strategy::FlowMip => FlowMipSolver::initialize(network.clone(), options.clone()).solve(),
        Strategy::LowerBound => {
            LowerBoundSolver::initialize(network.clone(), options.clone()).solve()
        }
    };
    if !network.revelation().is_deterministic() && strategy != Strategy::LowerBound {
        outcome.encoding = execute_plan(&outcome.encoding);
    }
    let running_time = start_time.elapsed();

    if options.verify {
        outcome
            .encoding
            .check_consistency()
            .map_err(|message| SolveError::InconsistentEncoding { strategy, message })?;
    }

    let encoding = &outcome.encoding;
    tracing::info!(
        "{} finished in {:0.2}sec: objective value {}, {} routed, {} unroutable",
        strategy,
        running_time.as_secs_f32(),
        encoding.objective_value(),
        encoding.number_of_routed_vehicles(),
        encoding.number_of_unroutable_vehicles()
    );
    if encoding.number_of_unroutable_vehicles() > 0 {
        tracing::warn!(
            "{} left {} vehicles unroutable",
            strategy,
            encoding.number_of_unroutable_vehicles()
        );
    }

    Ok(SolutionResult {
        strategy,
        encoding: outcome.encoding,
        lower_bound: outcome.lower_bound,
        running_time,
        optimality_gap: outcome.optimality_gap,
    })
}

/// gives every vehicle whose origin is its destination the empty route.
pub(crate) fn deliver_vehicles_already_at_destination(encoding: &mut Encoding) {
    let network = encoding.network().clone();
    for vehicle in network.vehicles_iter() {
        let at_destination = network
            .vehicle(vehicle)
            .is_some_and(|v| v.origin() == v.destination());
        if at_destination && !encoding.is_assigned(vehicle) {
            if let Err(err) = encoding.assign(vehicle, Route::empty()) {
                tracing::warn!("{}", err);
            }
        }
    }
}
