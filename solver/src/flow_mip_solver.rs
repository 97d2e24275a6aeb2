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

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time;

use model::base_types::{Capacity, TruckIdx};
use model::network::Network;
use solution::{Encoding, UnroutableReason};

use crate::flow_decomposition::{apply_decoded, decompose, round_flows};
use crate::mip::{ConstraintSense, HighsBackend, MipBackend, MipLimits, MipModel};
use crate::time_expanded_network::{commodities, CommodityNetwork, Head};
use crate::{
    deliver_vehicles_already_at_destination, OptimalityGap, SolveOptions, Solver, SolverOutcome,
};

/// the multi-commodity flow model over the time-expanded networks of all commodities.
///
/// There is one variable per commodity arc, one flow conservation constraint per commodity node
/// (outflow - inflow = supply) and one capacity constraint per truck, shared by all commodities.
pub struct FlowModel {
    model: MipModel,
    // for each commodity, for each arc: the variable
    columns: Vec<Vec<usize>>,
}

impl FlowModel {
    pub fn build(
        flow_networks: &[CommodityNetwork],
        capacity: impl Fn(TruckIdx) -> Capacity,
        integral: bool,
    ) -> FlowModel {
        let mut model = MipModel::new(integral);
        let mut columns = Vec::with_capacity(flow_networks.len());
        let mut truck_terms: BTreeMap<TruckIdx, Vec<(usize, f64)>> = BTreeMap::new();

        for flow_network in flow_networks.iter() {
            let mut commodity_columns = Vec::with_capacity(flow_network.arcs().len());
            let mut balance_terms: Vec<Vec<(usize, f64)>> =
                vec![Vec::new(); flow_network.nodes().len()];

            for (a, arc) in flow_network.arcs().iter().enumerate() {
                let upper = flow_network.arc_capacity(a, &capacity) as f64;
                let variable = model.add_variable(upper, arc.cost as f64);
                commodity_columns.push(variable);

                balance_terms[arc.tail].push((variable, 1.0));
                if let Head::Node(head) = arc.head {
                    balance_terms[head].push((variable, -1.0));
                }
                if let Some(truck) = arc.kind.truck() {
                    truck_terms.entry(truck).or_default().push((variable, 1.0));
                }
            }

            for (node, terms) in balance_terms.into_iter().enumerate() {
                let supply = flow_network.supply_of(node) as f64;
                model.add_constraint(terms, ConstraintSense::Equal, supply);
            }
            columns.push(commodity_columns);
        }

        for (truck, terms) in truck_terms.into_iter() {
            model.add_constraint(terms, ConstraintSense::AtMost, capacity(truck) as f64);
        }

        FlowModel { model, columns }
    }

    pub fn model(&self) -> &MipModel {
        &self.model
    }

    /// splits the values of all variables into the arc values per commodity.
    pub fn arc_values(&self, values: &[f64]) -> Vec<Vec<f64>> {
        self.columns
            .iter()
            .map(|columns| columns.iter().map(|&v| values[v]).collect())
            .collect()
    }
}

pub struct FlowMipSolver {
    network: Arc<Network>,
    limits: MipLimits,
    backend: Box<dyn MipBackend>,
}

impl Solver for FlowMipSolver {
    fn initialize(network: Arc<Network>, options: SolveOptions) -> Self {
        FlowMipSolver::with_backend(network, options, Box::new(HighsBackend))
    }

    fn solve(&self) -> SolverOutcome {
        let mut encoding = Encoding::empty(self.network.clone());
        deliver_vehicles_already_at_destination(&mut encoding);

        let open_vehicles: Vec<_> = self
            .network
            .vehicles_by_availability()
            .filter(|&v| !encoding.is_assigned(v))
            .collect();
        let flow_networks: Vec<CommodityNetwork> = commodities(&self.network, open_vehicles)
            .into_iter()
            .map(|commodity| CommodityNetwork::build(&self.network, commodity))
            .collect();
        if flow_networks.is_empty() {
            return SolverOutcome {
                encoding,
                lower_bound: None,
                optimality_gap: Some(OptimalityGap::Proven),
            };
        }

        let flow_model = FlowModel::build(
            &flow_networks,
            |truck| encoding.remaining_capacity(truck),
            true,
        );
        tracing::info!(
            "solving flow mip with {} variables and {} constraints ({}, time limit {:0.1}sec, {} threads)",
            flow_model.model().variables().len(),
            flow_model.model().constraints().len(),
            self.backend.name(),
            self.limits.time_limit.as_secs_f32(),
            self.limits.threads
        );

        let start_time = time::Instant::now();
        let result = self.backend.solve(flow_model.model(), &self.limits);
        let elapsed = start_time.elapsed();

        let optimality_gap = match result {
            Ok(solution) => {
                let gap = if solution.limit_reached {
                    tracing::warn!(
                        "engine stopped on its limit after {:0.2}sec, the optimality gap is unknown",
                        elapsed.as_secs_f32()
                    );
                    OptimalityGap::Unknown
                } else {
                    OptimalityGap::Proven
                };
                tracing::debug!("mip objective {}", solution.objective);

                let values = flow_model.arc_values(&solution.values);
                let flows = round_flows(&flow_networks, &values, |truck| {
                    encoding.remaining_capacity(truck)
                });
                for (flow_network, mut flow) in flow_networks.iter().zip(flows) {
                    let decoded = decompose(&self.network, flow_network, &mut flow);
                    apply_decoded(&mut encoding, decoded);
                }
                gap
            }
            Err(err) => {
                tracing::warn!("flow mip failed: {}", err);
                for flow_network in flow_networks.iter() {
                    for &vehicle in flow_network.commodity().vehicles() {
                        if let Err(err) =
                            encoding.mark_unroutable(vehicle, UnroutableReason::SolverFailure)
                        {
                            tracing::warn!("{}", err);
                        }
                    }
                }
                OptimalityGap::Infeasible
            }
        };

        SolverOutcome {
            encoding,
            lower_bound: None,
            optimality_gap: Some(optimality_gap),
        }
    }
}

impl FlowMipSolver {
    pub fn with_backend(
        network: Arc<Network>,
        options: SolveOptions,
        backend: Box<dyn MipBackend>,
    ) -> FlowMipSolver {
        FlowMipSolver {
            network,
            limits: MipLimits {
                time_limit: options.time_limit,
                threads: options.threads,
            },
            backend,
        }
    }
}
