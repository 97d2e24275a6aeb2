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

use model::network::Network;
use solution::{Encoding, UnroutableReason};

use rs_graph::linkedlistgraph::Edge as RsEdge;
use rs_graph::linkedlistgraph::Node as RsNode;
use rs_graph::mcf::{NetworkSimplex, SolutionState};
use rs_graph::traits::FiniteGraph;
use rs_graph::Buildable;
use rs_graph::Builder;
use rs_graph::LinkedListGraph;

use std::collections::HashMap;
use std::sync::Arc;
use std::time;

use crate::flow_decomposition::{apply_decoded, decompose, DecodeError, FlowValue};
use crate::time_expanded_network::{commodities, CommodityNetwork, Head};
use crate::{deliver_vehicles_already_at_destination, SolveOptions, Solver, SolverOutcome};

type NetworkNumberType = i64;

type LowerBound = NetworkNumberType;
type UpperBound = NetworkNumberType;
type Cost = NetworkNumberType;

struct EdgeLabel {
    lower_bound: LowerBound,
    upper_bound: UpperBound,
    cost: Cost,
}

/// Solves one commodity after the other (earliest due day first) as a min-cost circulation.
/// Truck capacities are the remaining capacities of the encoding, so the routes of earlier
/// commodities reduce the capacity available to later ones.
pub struct MinCostFlowSolver {
    network: Arc<Network>,
}

impl Solver for MinCostFlowSolver {
    fn initialize(network: Arc<Network>, _options: SolveOptions) -> Self {
        MinCostFlowSolver { network }
    }

    fn solve(&self) -> SolverOutcome {
        let mut encoding = Encoding::empty(self.network.clone());
        deliver_vehicles_already_at_destination(&mut encoding);

        let open_vehicles: Vec<_> = self
            .network
            .vehicles_by_availability()
            .filter(|&v| !encoding.is_assigned(v))
            .collect();

        for commodity in commodities(&self.network, open_vehicles) {
            let flow_network = CommodityNetwork::build(&self.network, commodity);
            match self.solve_commodity(&flow_network, &encoding) {
                Ok(mut flow) => {
                    let start_time_decoding = time::Instant::now();
                    let decoded = decompose(&self.network, &flow_network, &mut flow);
                    apply_decoded(&mut encoding, decoded);
                    tracing::debug!(
                        "  3) decoding routes - done ({:0.2}sec)",
                        start_time_decoding.elapsed().as_secs_f32()
                    );
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    for &vehicle in flow_network.commodity().vehicles() {
                        if let Err(err) = encoding
                            .mark_unroutable(vehicle, UnroutableReason::FlowRoundingInfeasibility)
                        {
                            tracing::warn!("{}", err);
                        }
                    }
                }
            }
        }
        SolverOutcome::heuristic(encoding)
    }
}

impl MinCostFlowSolver {
    /// the flow value of every arc of the commodity network.
    fn solve_commodity(
        &self,
        flow_network: &CommodityNetwork,
        encoding: &Encoding,
    ) -> Result<Vec<FlowValue>, DecodeError> {
        let start_time_creating_network = time::Instant::now();

        let mut builder = LinkedListGraph::<u32>::new_builder();
        let rsnodes: Vec<RsNode> = flow_network
            .nodes()
            .iter()
            .map(|_| builder.add_node())
            .collect();
        let source = builder.add_node();
        let sink = builder.add_node();

        let mut edges: HashMap<RsEdge, EdgeLabel> = HashMap::new();
        let mut edge_to_arc: HashMap<RsEdge, usize> = HashMap::new();

        // supplies are forced from the source into the supply nodes
        for &(node, count) in flow_network.supplies() {
            edges.insert(
                builder.add_edge(source, rsnodes[node]),
                EdgeLabel {
                    lower_bound: count as LowerBound,
                    upper_bound: count as UpperBound,
                    cost: 0,
                },
            );
        }

        for (a, arc) in flow_network.arcs().iter().enumerate() {
            let head = match arc.head {
                Head::Node(head) => rsnodes[head],
                Head::Sink => sink,
            };
            let upper_bound = flow_network
                .arc_capacity(a, |truck| encoding.remaining_capacity(truck))
                as UpperBound;
            let edge = builder.add_edge(rsnodes[arc.tail], head);
            edges.insert(
                edge,
                EdgeLabel {
                    lower_bound: 0,
                    upper_bound,
                    cost: arc.cost,
                },
            );
            edge_to_arc.insert(edge, a);
        }

        // closing the circulation
        let total = flow_network.total_supply() as NetworkNumberType;
        edges.insert(
            builder.add_edge(sink, source),
            EdgeLabel {
                lower_bound: total,
                upper_bound: total,
                cost: 0,
            },
        );

        let graph = builder.into_graph();
        tracing::debug!(
            "  1) creating min-cost-flow network - done ({:0.2}sec)",
            start_time_creating_network.elapsed().as_secs_f32()
        );

        let start_time_computing_min_cost_flow = time::Instant::now();
        let mut spx = NetworkSimplex::new(&graph);
        spx.set_balances(|_| 0); // balance is 0 everywhere -> circulation
        spx.set_lowers(|e| edges[&e].lower_bound);
        spx.set_uppers(|e| edges[&e].upper_bound);
        spx.set_costs(|e| edges[&e].cost);
        let state = spx.solve();
        if state != SolutionState::Optimal {
            return Err(DecodeError::Unsolved(format!("{:?}", state)));
        }

        let mut flow: Vec<FlowValue> = vec![0; flow_network.arcs().len()];
        for e in graph.edges() {
            if let Some(&a) = edge_to_arc.get(&e) {
                flow[a] = spx.flow(e).max(0) as FlowValue;
            }
        }

        tracing::debug!(
            "  2) computing min-cost-flow in network with {} nodes and {} edges - done ({:0.2}sec)",
            graph.num_nodes(),
            graph.num_edges(),
            start_time_computing_min_cost_flow.elapsed().as_secs_f32()
        );
        Ok(flow)
    }
}
