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

use model::base_types::{Capacity, Day, LocationIdx, TruckIdx, VehicleIdx};
use model::network::Network;
use solution::{Encoding, Route, UnroutableReason};
use thiserror::Error;

use crate::time_expanded_network::{ArcKind, CommodityNetwork, Head};

pub type FlowValue = u64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{vehicle} has no supply node")]
    MissingSupply { vehicle: VehicleIdx },
    #[error("no flow is left for {vehicle} at {location} on {day}")]
    Stuck {
        vehicle: VehicleIdx,
        location: LocationIdx,
        day: Day,
    },
    #[error("tracing {vehicle} exceeded {steps} steps")]
    StepLimit { vehicle: VehicleIdx, steps: usize },
    #[error("the min-cost flow could not be computed: {0}")]
    Unsolved(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedRoute {
    Delivered(Vec<TruckIdx>),
    Unrouted,
}

/// traces every vehicle of the commodity (in availability order) from its supply node to the
/// sink, consuming one unit of flow per arc.
///
/// At each node delivering arcs are preferred, then truck legs by earliest arrival, then
/// holding, then the unrouted arc.
pub fn decompose(
    network: &Network,
    flow_network: &CommodityNetwork,
    flow: &mut [FlowValue],
) -> Vec<(VehicleIdx, Result<DecodedRoute, DecodeError>)> {
    let step_limit = flow_network.arcs().len() + 1;
    flow_network
        .commodity()
        .vehicles()
        .iter()
        .map(|&vehicle| {
            (
                vehicle,
                trace_vehicle(network, flow_network, flow, vehicle, step_limit),
            )
        })
        .collect()
}

fn trace_vehicle(
    network: &Network,
    flow_network: &CommodityNetwork,
    flow: &mut [FlowValue],
    vehicle: VehicleIdx,
    step_limit: usize,
) -> Result<DecodedRoute, DecodeError> {
    let mut node = flow_network
        .supply_node_of(vehicle)
        .ok_or(DecodeError::MissingSupply { vehicle })?;
    let mut trucks = Vec::new();

    for _ in 0..step_limit {
        let next = flow_network
            .out_arcs(node)
            .iter()
            .copied()
            .filter(|&a| flow[a] > 0)
            .min_by_key(|&a| preference(network, flow_network, a));
        let Some(arc_idx) = next else {
            let (location, day) = flow_network.node(node);
            return Err(DecodeError::Stuck {
                vehicle,
                location,
                day,
            });
        };
        flow[arc_idx] -= 1;

        let arc = flow_network.arc(arc_idx);
        if let Some(truck) = arc.kind.truck() {
            trucks.push(truck);
        }
        match (arc.kind, arc.head) {
            (ArcKind::Unrouted, _) => return Ok(DecodedRoute::Unrouted),
            (_, Head::Sink) => return Ok(DecodedRoute::Delivered(trucks)),
            (_, Head::Node(head)) => node = head,
        }
    }
    Err(DecodeError::StepLimit {
        vehicle,
        steps: step_limit,
    })
}

fn preference(
    network: &Network,
    flow_network: &CommodityNetwork,
    arc: usize,
) -> (u8, Day, Option<TruckIdx>) {
    let arc = flow_network.arc(arc);
    match arc.kind {
        ArcKind::Delivery(truck) => (0, network.truck(truck).arrival(), Some(truck)),
        ArcKind::Transport(truck) => (1, network.truck(truck).arrival(), Some(truck)),
        ArcKind::Holding => match arc.head {
            Head::Node(head) => (2, flow_network.node(head).1, None),
            Head::Sink => (2, flow_network.node(arc.tail).1, None),
        },
        ArcKind::Unrouted => (3, flow_network.node(arc.tail).1, None),
    }
}

/// writes the decoded routes into the encoding. Decoding and assignment failures are logged
/// and the vehicles are reported with FlowRoundingInfeasibility.
pub fn apply_decoded(
    encoding: &mut Encoding,
    decoded: Vec<(VehicleIdx, Result<DecodedRoute, DecodeError>)>,
) {
    let network = encoding.network().clone();
    for (vehicle, result) in decoded {
        let outcome = match result {
            Ok(DecodedRoute::Delivered(trucks)) => {
                match encoding.assign(vehicle, Route::from_trucks(trucks, &network)) {
                    Ok(()) => continue,
                    Err(err) => {
                        tracing::warn!("decoded route is rejected: {}", err);
                        UnroutableReason::FlowRoundingInfeasibility
                    }
                }
            }
            Ok(DecodedRoute::Unrouted) => UnroutableReason::NoFeasibleRoute,
            Err(err) => {
                tracing::warn!("could not decode the flow: {}", err);
                UnroutableReason::FlowRoundingInfeasibility
            }
        };
        if let Err(err) = encoding.mark_unroutable(vehicle, outcome) {
            tracing::warn!("{}", err);
        }
    }
}

/// turns (possibly fractional) arc values of several commodities into integers.
///
/// Integral values are kept. Fractional values are rounded up; afterwards, for every truck
/// whose capacity is exceeded, the rounded-up arcs of that truck are decreased (largest
/// rounding first) until the capacity holds or no rounded-up arc is left.
pub fn round_flows(
    flow_networks: &[CommodityNetwork],
    values: &[Vec<f64>],
    capacity: impl Fn(TruckIdx) -> Capacity,
) -> Vec<Vec<FlowValue>> {
    const TOLERANCE: f64 = 1e-6;

    let mut rounded: Vec<Vec<FlowValue>> = Vec::with_capacity(values.len());
    // truck -> [(rounding, commodity, arc)] of the rounded-up arcs
    let mut ceiled: BTreeMap<TruckIdx, Vec<(f64, usize, usize)>> = BTreeMap::new();
    let mut load: BTreeMap<TruckIdx, FlowValue> = BTreeMap::new();

    for (c, (flow_network, commodity_values)) in flow_networks.iter().zip(values).enumerate() {
        let mut commodity_rounded = Vec::with_capacity(commodity_values.len());
        for (a, &value) in commodity_values.iter().enumerate() {
            let value = value.max(0.0);
            let integral = (value - value.round()).abs() < TOLERANCE;
            let result = (if integral { value.round() } else { value.ceil() }) as FlowValue;
            if let Some(truck) = flow_network.arc(a).kind.truck() {
                *load.entry(truck).or_default() += result;
                if !integral {
                    ceiled
                        .entry(truck)
                        .or_default()
                        .push((value.ceil() - value, c, a));
                }
            }
            commodity_rounded.push(result);
        }
        rounded.push(commodity_rounded);
    }

    let fractional: usize = ceiled.values().map(|arcs| arcs.len()).sum();
    if fractional > 0 {
        tracing::debug!("rounding {} fractional truck arcs", fractional);
    }

    for (truck, mut arcs) in ceiled.into_iter() {
        let cap = capacity(truck) as FlowValue;
        let mut truck_load = load.get(&truck).copied().unwrap_or(0);
        arcs.sort_by(|x, y| y.0.total_cmp(&x.0).then((x.1, x.2).cmp(&(y.1, y.2))));
        for (_, c, a) in arcs {
            if truck_load <= cap {
                break;
            }
            if rounded[c][a] > 0 {
                rounded[c][a] -= 1;
                truck_load -= 1;
            }
        }
        if truck_load > cap {
            tracing::warn!(
                "{} stays overloaded after rounding ({} > {})",
                truck,
                truck_load,
                cap
            );
        }
    }
    rounded
}
