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

use std::sync::Arc;

use model::network::Network;
use solution::Encoding;

use crate::flow_mip_solver::FlowModel;
use crate::mip::{HighsBackend, MipBackend, MipLimits};
use crate::time_expanded_network::{commodities, ArcKind, CommodityNetwork};
use crate::{OptimalityGap, SolveOptions, Solver, SolverOutcome};

/// LP relaxation of the flow mip. The bound includes the penalty of the (fractionally)
/// unrouted vehicles, so it bounds the objective value of every strategy. The returned encoding
/// is empty.
pub struct LowerBoundSolver {
    network: Arc<Network>,
    limits: MipLimits,
    backend: Box<dyn MipBackend>,
}

impl Solver for LowerBoundSolver {
    fn initialize(network: Arc<Network>, options: SolveOptions) -> Self {
        LowerBoundSolver::with_backend(network, options, Box::new(HighsBackend))
    }

    fn solve(&self) -> SolverOutcome {
        let encoding = Encoding::empty(self.network.clone());

        // vehicles already at their destination cost nothing
        let open_vehicles: Vec<_> = self
            .network
            .vehicles_by_availability()
            .filter(|&v| {
                self.network
                    .vehicle(v)
                    .is_some_and(|vehicle| vehicle.origin() != vehicle.destination())
            })
            .collect();
        let flow_networks: Vec<CommodityNetwork> = commodities(&self.network, open_vehicles)
            .into_iter()
            .map(|commodity| CommodityNetwork::build(&self.network, commodity))
            .collect();
        if flow_networks.is_empty() {
            return SolverOutcome {
                encoding,
                lower_bound: Some(0.0),
                optimality_gap: Some(OptimalityGap::Proven),
            };
        }

        let flow_model = FlowModel::build(
            &flow_networks,
            |truck| self.network.capacity_of(truck),
            false,
        );
        match self.backend.solve(flow_model.model(), &self.limits) {
            Ok(solution) if solution.limit_reached => {
                // an interrupted relaxation does not bound anything
                tracing::warn!(
                    "lp relaxation stopped on its limit, objective {:.2} is not a lower bound",
                    solution.objective
                );
                SolverOutcome {
                    encoding,
                    lower_bound: None,
                    optimality_gap: Some(OptimalityGap::Unknown),
                }
            }
            Ok(solution) => {
                let values = flow_model.arc_values(&solution.values);
                let unrouted: f64 = flow_networks
                    .iter()
                    .zip(values.iter())
                    .flat_map(|(flow_network, values)| {
                        flow_network
                            .arcs()
                            .iter()
                            .zip(values.iter())
                            .filter(|(arc, _)| arc.kind == ArcKind::Unrouted)
                            .map(|(_, value)| *value)
                    })
                    .sum();
                tracing::info!(
                    "lower bound {:.2} with {:.2} relaxed unrouted vehicles",
                    solution.objective,
                    unrouted
                );
                SolverOutcome {
                    encoding,
                    lower_bound: Some(solution.objective),
                    optimality_gap: Some(OptimalityGap::Proven),
                }
            }
            Err(err) => {
                tracing::warn!("lp relaxation failed: {}", err);
                SolverOutcome {
                    encoding,
                    lower_bound: None,
                    optimality_gap: Some(OptimalityGap::Infeasible),
                }
            }
        }
    }
}

impl LowerBoundSolver {
    pub fn with_backend(
        network: Arc<Network>,
        options: SolveOptions,
        backend: Box<dyn MipBackend>,
    ) -> LowerBoundSolver {
        LowerBoundSolver {
            network,
            limits: MipLimits {
                time_limit: options.time_limit,
                threads: options.threads,
            },
            backend,
        }
    }
}
