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

use itertools::assert_equal;
use model::base_types::Day;
use model::test_utilities::{init_test_data, TestData};
use solution::{Encoding, Route, UnroutableReason};

use crate::time_expanded_network::{commodities, ArcKind, CommodityNetwork};

use super::{apply_decoded, decompose, round_flows, DecodeError, DecodedRoute, FlowValue};

fn dealer1_network(d: &TestData) -> CommodityNetwork {
    let commodity = commodities(&d.network, d.network.vehicles_by_availability()).remove(1);
    CommodityNetwork::build(&d.network, commodity)
}

fn arc_of(network: &CommodityNetwork, kind: ArcKind) -> usize {
    network
        .arcs()
        .iter()
        .position(|arc| arc.kind == kind)
        .unwrap()
}

fn flow_with(network: &CommodityNetwork, values: &[(ArcKind, FlowValue)]) -> Vec<FlowValue> {
    let mut flow = vec![0; network.arcs().len()];
    for (kind, value) in values {
        flow[arc_of(network, *kind)] = *value;
    }
    flow
}

#[test]
fn decompose_prefers_delivery_then_earliest_arrival() {
    // ARRANGE
    let d = init_test_data();
    let network = dealer1_network(&d);
    let mut flow = flow_with(
        &network,
        &[
            (ArcKind::Delivery(d.plant_dealer1_direct), 1),
            (ArcKind::Transport(d.plant_terminal_cheap), 1),
            (ArcKind::Transport(d.plant_terminal_expensive), 2),
            (ArcKind::Holding, 3),
            (ArcKind::Delivery(d.terminal_dealer1_late), 3),
        ],
    );

    // ACT
    let decoded = decompose(&d.network, &network, &mut flow);

    // ASSERT
    assert_eq!(
        decoded,
        vec![
            (d.veh0, Ok(DecodedRoute::Delivered(vec![d.plant_dealer1_direct]))),
            (
                d.veh1,
                Ok(DecodedRoute::Delivered(vec![
                    d.plant_terminal_cheap,
                    d.terminal_dealer1_late
                ]))
            ),
            (
                d.veh2,
                Ok(DecodedRoute::Delivered(vec![
                    d.plant_terminal_expensive,
                    d.terminal_dealer1_late
                ]))
            ),
            (
                d.veh3,
                Ok(DecodedRoute::Delivered(vec![
                    d.plant_terminal_expensive,
                    d.terminal_dealer1_late
                ]))
            ),
        ]
    );
    assert!(flow.iter().all(|&f| f == 0));
}

#[test]
fn decompose_reports_missing_flow() {
    // ARRANGE
    let d = init_test_data();
    let network = dealer1_network(&d);
    let mut flow = flow_with(
        &network,
        &[
            (ArcKind::Transport(d.plant_terminal_cheap), 1),
            (ArcKind::Unrouted, 1),
        ],
    );

    // ACT
    let decoded = decompose(&d.network, &network, &mut flow);

    // ASSERT
    assert_eq!(
        decoded[0],
        (
            d.veh0,
            Err(DecodeError::Stuck {
                vehicle: d.veh0,
                location: d.terminal,
                day: Day(2)
            })
        )
    );
    assert_eq!(decoded[1], (d.veh1, Ok(DecodedRoute::Unrouted)));
    assert!(matches!(decoded[2].1, Err(DecodeError::Stuck { .. })));
}

#[test]
fn apply_decoded_marks_failures() {
    // ARRANGE
    let d = init_test_data();
    let mut encoding = Encoding::empty(d.network.clone());
    let decoded = vec![
        (
            d.veh0,
            Ok(DecodedRoute::Delivered(vec![
                d.plant_terminal_cheap,
                d.terminal_dealer1_early,
            ])),
        ),
        (d.veh1, Ok(DecodedRoute::Unrouted)),
        (
            d.veh2,
            Err(DecodeError::StepLimit {
                vehicle: d.veh2,
                steps: 8,
            }),
        ),
        // not a route to the destination
        (
            d.veh3,
            Ok(DecodedRoute::Delivered(vec![d.plant_terminal_cheap])),
        ),
    ];

    // ACT
    apply_decoded(&mut encoding, decoded);

    // ASSERT
    assert_eq!(
        encoding.route_of(d.veh0),
        Some(&Route::from_trucks(
            [d.plant_terminal_cheap, d.terminal_dealer1_early],
            &d.network
        ))
    );
    assert_equal(
        encoding.unroutable_vehicles(),
        [
            (d.veh1, UnroutableReason::NoFeasibleRoute),
            (d.veh2, UnroutableReason::FlowRoundingInfeasibility),
            (d.veh3, UnroutableReason::FlowRoundingInfeasibility),
        ],
    );
    assert!(encoding.is_consistent());
}

#[test]
fn rounding_keeps_integral_values_and_respects_capacity() {
    // ARRANGE
    let d = init_test_data();
    let network = dealer1_network(&d);
    let late = arc_of(&network, ArcKind::Delivery(d.terminal_dealer1_late));
    let early = arc_of(&network, ArcKind::Delivery(d.terminal_dealer1_early));
    let holding = arc_of(&network, ArcKind::Holding);
    let cheap = arc_of(&network, ArcKind::Transport(d.plant_terminal_cheap));
    let mut values = vec![0.0; network.arcs().len()];
    values[late] = 2.6;
    values[early] = 0.4;
    values[holding] = 2.6;
    values[cheap] = 1.0000001;

    // ACT
    let rounded = round_flows(std::slice::from_ref(&network), &[values], |truck| {
        if truck == d.terminal_dealer1_late {
            2
        } else {
            3
        }
    });

    // ASSERT
    assert_eq!(rounded[0][late], 2);
    assert_eq!(rounded[0][early], 1);
    assert_eq!(rounded[0][holding], 3);
    assert_eq!(rounded[0][cheap], 1);
}
