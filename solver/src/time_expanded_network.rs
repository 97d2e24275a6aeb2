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

//! Time-expanded network of one commodity: the vehicles sharing destination, due day and delay
//! tariff. Nodes are (location, day) pairs, arcs are holding arcs, truck legs, delivering truck
//! legs (into the sink) and the unrouted arcs from every supply node to the sink.


use std::collections::{BTreeMap, BTreeSet};

use model::base_types::{Cost, Day, LocationIdx, TruckIdx, VehicleCount, VehicleIdx};
use model::network::Network;

/// vehicles of one commodity are interchangeable in the flow formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommodityKey {
    pub due: Day,
    pub destination: LocationIdx,
    pub planned_delay: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commodity {
    key: CommodityKey,
    vehicles: Vec<VehicleIdx>,
}

impl Commodity {
    pub fn key(&self) -> CommodityKey {
        self.key
    }

    /// in availability order
    pub fn vehicles(&self) -> &[VehicleIdx] {
        &self.vehicles
    }
}

/// groups the vehicles into commodities, sorted by (due day, destination, tariff).
/// The vehicles of each commodity keep the order of the given iterator.
pub fn commodities(
    network: &Network,
    vehicles: impl IntoIterator<Item = VehicleIdx>,
) -> Vec<Commodity> {
    let mut groups: BTreeMap<CommodityKey, Vec<VehicleIdx>> = BTreeMap::new();
    for vehicle in vehicles {
        let Some(v) = network.vehicle(vehicle) else {
            continue;
        };
        let key = CommodityKey {
            due: v.due(),
            destination: v.destination(),
            planned_delay: network.delay_is_planned(v),
        };
        groups.entry(key).or_default().push(vehicle);
    }
    groups
        .into_iter()
        .map(|(key, vehicles)| Commodity { key, vehicles })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcKind {
    Holding,
    Transport(TruckIdx),
    /// a truck into the destination of the commodity
    Delivery(TruckIdx),
    Unrouted,
}

impl ArcKind {
    pub fn truck(&self) -> Option<TruckIdx> {
        match self {
            ArcKind::Transport(truck) | ArcKind::Delivery(truck) => Some(*truck),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Head {
    Node(usize),
    Sink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowArc {
    pub tail: usize,
    pub head: Head,
    pub kind: ArcKind,
    pub cost: Cost,
}

pub struct CommodityNetwork {
    commodity: Commodity,
    nodes: Vec<(LocationIdx, Day)>,
    arcs: Vec<FlowArc>,
    out_arcs: Vec<Vec<usize>>,
    supplies: Vec<(usize, VehicleCount)>,
    supply_node_of: BTreeMap<VehicleIdx, usize>,
}

impl CommodityNetwork {
    pub fn build(network: &Network, commodity: Commodity) -> CommodityNetwork {
        let key = commodity.key;
        let usable: Vec<TruckIdx> = network
            .trucks_iter()
            .filter(|&truck| {
                let t = network.truck(truck);
                network.capacity_of(truck) > 0 && t.origin() != key.destination
            })
            .collect();

        // all relevant (location, day) pairs
        let mut events: BTreeSet<(LocationIdx, Day)> = BTreeSet::new();
        for vehicle in commodity.vehicles.iter() {
            if let Some(v) = network.vehicle(*vehicle) {
                events.insert((v.origin(), v.available()));
            }
        }
        for &truck in usable.iter() {
            let t = network.truck(truck);
            events.insert((t.origin(), t.departure()));
            if t.destination() != key.destination {
                events.insert((t.destination(), network.ready_day(truck)));
            }
        }
        let events: Vec<(LocationIdx, Day)> = events.into_iter().collect();
        let index: BTreeMap<(LocationIdx, Day), usize> =
            events.iter().enumerate().map(|(i, &e)| (e, i)).collect();

        // supplies
        let mut supply_node_of: BTreeMap<VehicleIdx, usize> = BTreeMap::new();
        let mut supply: BTreeMap<usize, VehicleCount> = BTreeMap::new();
        for vehicle in commodity.vehicles.iter() {
            if let Some(v) = network.vehicle(*vehicle) {
                let node = index[&(v.origin(), v.available())];
                supply_node_of.insert(*vehicle, node);
                *supply.entry(node).or_default() += 1;
            }
        }
        let total_supply: VehicleCount = supply.values().sum();

        // a representative for the delay cost, all vehicles of the commodity share the tariff
        let representative = commodity
            .vehicles
            .first()
            .and_then(|&vehicle| network.vehicle(vehicle));

        let mut arcs: Vec<FlowArc> = Vec::new();
        for (i, pair) in events.windows(2).enumerate() {
            if pair[0].0 == pair[1].0 {
                arcs.push(FlowArc {
                    tail: i,
                    head: Head::Node(i + 1),
                    kind: ArcKind::Holding,
                    cost: 0,
                });
            }
        }
        for &truck in usable.iter() {
            let t = network.truck(truck);
            let tail = index[&(t.origin(), t.departure())];
            if t.destination() == key.destination {
                let delay_cost = representative
                    .map(|v| network.delay_cost(v, t.arrival()))
                    .unwrap_or(0);
                arcs.push(FlowArc {
                    tail,
                    head: Head::Sink,
                    kind: ArcKind::Delivery(truck),
                    cost: t.price() + delay_cost,
                });
            } else {
                arcs.push(FlowArc {
                    tail,
                    head: Head::Node(index[&(t.destination(), network.ready_day(truck))]),
                    kind: ArcKind::Transport(truck),
                    cost: t.price(),
                });
            }
        }

        let (forward, backward) = reachability(events.len(), &arcs, supply.keys().copied());

        // keep only nodes and arcs on some supply -> sink path
        let mut new_index: Vec<Option<usize>> = vec![None; events.len()];
        let mut nodes = Vec::new();
        for (i, &event) in events.iter().enumerate() {
            if forward[i] && (backward[i] || supply.contains_key(&i)) {
                new_index[i] = Some(nodes.len());
                nodes.push(event);
            }
        }
        let mut kept: Vec<FlowArc> = arcs
            .into_iter()
            .filter_map(|arc| {
                let tail = new_index[arc.tail]?;
                let head = match arc.head {
                    Head::Sink => Head::Sink,
                    Head::Node(head) => Head::Node(new_index[head]?),
                };
                Some(FlowArc { tail, head, ..arc })
            })
            .collect();
        let penalty = network.unroutable_penalty();
        let mut supplies = Vec::new();
        for (&node, &count) in supply.iter() {
            // supply nodes are always kept
            if let Some(node) = new_index[node] {
                supplies.push((node, count));
                kept.push(FlowArc {
                    tail: node,
                    head: Head::Sink,
                    kind: ArcKind::Unrouted,
                    cost: penalty,
                });
            }
        }
        for node in supply_node_of.values_mut() {
            if let Some(new) = new_index[*node] {
                *node = new;
            }
        }

        let mut out_arcs: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (a, arc) in kept.iter().enumerate() {
            out_arcs[arc.tail].push(a);
        }

        tracing::debug!(
            "commodity (due {}, destination {}) with {} vehicles: {} nodes, {} arcs",
            key.due,
            key.destination,
            total_supply,
            nodes.len(),
            kept.len()
        );

        CommodityNetwork {
            commodity,
            nodes,
            arcs: kept,
            out_arcs,
            supplies,
            supply_node_of,
        }
    }
}

impl CommodityNetwork {
    pub fn commodity(&self) -> &Commodity {
        &self.commodity
    }

    pub fn nodes(&self) -> &[(LocationIdx, Day)] {
        &self.nodes
    }

    pub fn node(&self, node: usize) -> (LocationIdx, Day) {
        self.nodes[node]
    }

    pub fn arcs(&self) -> &[FlowArc] {
        &self.arcs
    }

    pub fn arc(&self, arc: usize) -> &FlowArc {
        &self.arcs[arc]
    }

    pub fn out_arcs(&self, node: usize) -> &[usize] {
        &self.out_arcs[node]
    }

    /// (node, number of vehicles starting there)
    pub fn supplies(&self) -> &[(usize, VehicleCount)] {
        &self.supplies
    }

    pub fn supply_of(&self, node: usize) -> VehicleCount {
        self.supplies
            .iter()
            .find(|(n, _)| *n == node)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total_supply(&self) -> VehicleCount {
        self.supplies.iter().map(|(_, count)| count).sum()
    }

    pub fn supply_node_of(&self, vehicle: VehicleIdx) -> Option<usize> {
        self.supply_node_of.get(&vehicle).copied()
    }

    /// upper bound on the flow of the arc for a truck with the given capacity.
    pub fn arc_capacity(
        &self,
        arc: usize,
        truck_capacity: impl Fn(TruckIdx) -> VehicleCount,
    ) -> VehicleCount {
        let arc = &self.arcs[arc];
        match arc.kind {
            ArcKind::Holding => self.total_supply(),
            ArcKind::Transport(truck) | ArcKind::Delivery(truck) => truck_capacity(truck),
            ArcKind::Unrouted => self.supply_of(arc.tail),
        }
    }
}

/// (reachable from a supply node, sink reachable from the node)
fn reachability(
    number_of_nodes: usize,
    arcs: &[FlowArc],
    sources: impl Iterator<Item = usize>,
) -> (Vec<bool>, Vec<bool>) {
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); number_of_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); number_of_nodes];
    let mut into_sink: Vec<usize> = Vec::new();
    for arc in arcs.iter() {
        match arc.head {
            Head::Node(head) => {
                successors[arc.tail].push(head);
                predecessors[head].push(arc.tail);
            }
            Head::Sink => into_sink.push(arc.tail),
        }
    }
    (
        search(&successors, sources),
        search(&predecessors, into_sink.into_iter()),
    )
}

fn search(neighbors: &[Vec<usize>], start: impl Iterator<Item = usize>) -> Vec<bool> {
    let mut reached = vec![false; neighbors.len()];
    let mut stack: Vec<usize> = Vec::new();
    for node in start {
        if !reached[node] {
            reached[node] = true;
            stack.push(node);
        }
    }
    while let Some(node) = stack.pop() {
        for &next in neighbors[node].iter() {
            if !reached[next] {
                reached[next] = true;
                stack.push(next);
            }
        }
    }
    reached
}
