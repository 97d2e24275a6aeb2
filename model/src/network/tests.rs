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

use crate::base_types::{Day, TransportIdx};
use crate::test_utilities::init_test_data;

#[test]
fn trucks_and_transports_are_indexed_by_schedule() {
    // ARRANGE
    let d = init_test_data();
    let network = d.network.clone();

    // ACT
    let first = network.transport(TransportIdx(0));

    // ASSERT
    assert_eq!(network.number_of_trucks(), 6);
    assert_eq!(network.transports_iter().count(), 5);
    assert_equal(
        first.trucks().iter().copied(),
        [d.plant_terminal_cheap, d.plant_terminal_expensive],
    );
    assert_eq!(network.truck(d.terminal_dealer1_late).departure(), Day(3));
    assert_eq!(network.price_of(d.plant_dealer1_direct), 30);
    assert_eq!(network.capacity_of(d.terminal_dealer2), 4);
}

#[test]
fn departures_from_respects_day() {
    // ARRANGE
    let d = init_test_data();

    // ACT
    let from_terminal_day_2: Vec<_> = d.network.departures_from(d.terminal, Day(2)).collect();
    let from_terminal_day_3: Vec<_> = d.network.departures_from(d.terminal, Day(3)).collect();
    let from_dealer: Vec<_> = d.network.departures_from(d.dealer1, Day(0)).collect();

    // ASSERT
    assert_eq!(
        from_terminal_day_2,
        vec![
            d.terminal_dealer1_early,
            d.terminal_dealer2,
            d.terminal_dealer1_late
        ]
    );
    assert_eq!(from_terminal_day_3, vec![d.terminal_dealer1_late]);
    assert!(from_dealer.is_empty());
}

#[test]
fn rest_day_applies_at_terminals_only() {
    // ARRANGE
    let d = init_test_data();
    let network = d.network.clone();

    // ACT & ASSERT
    assert_eq!(network.ready_day(d.plant_terminal_cheap), Day(2));
    assert_eq!(network.ready_day(d.terminal_dealer1_early), Day(3));
    assert!(network.can_follow(d.plant_terminal_cheap, d.terminal_dealer1_early));
    assert!(network.can_follow(d.plant_terminal_cheap, d.terminal_dealer1_late));
    assert!(!network.can_follow(d.plant_terminal_cheap, d.plant_terminal_expensive));
    assert!(!network.can_follow(d.terminal_dealer1_early, d.terminal_dealer1_late));
}

#[test]
fn hops_follow_location_graph() {
    // ARRANGE
    let d = init_test_data();
    let network = d.network.clone();

    // ACT & ASSERT
    assert_eq!(network.hops_between(d.plant, d.plant), Some(0));
    assert_eq!(network.hops_between(d.plant, d.dealer1), Some(1));
    assert_eq!(network.hops_between(d.plant, d.dealer2), Some(2));
    assert_eq!(network.hops_between(d.dealer1, d.dealer2), None);
    assert!(!network.can_reach(d.terminal, d.plant));
}

#[test]
fn delay_costs_and_penalty() {
    // ARRANGE
    let d = init_test_data();
    let network = d.network.clone();
    let veh4 = network.vehicle(d.veh4).unwrap();

    // ACT & ASSERT
    assert!(!network.delay_is_planned(veh4));
    assert_eq!(network.delay_cost(veh4, Day(3)), 0);
    assert_eq!(network.delay_cost(veh4, Day(4)), 600);
    assert_eq!(network.delay_cost(veh4, Day(6)), 800);
    // sum of all prices (68) + largest delay cost (600) + 1
    assert_eq!(network.unroutable_penalty(), 669);
}

#[test]
fn vehicles_are_ordered_by_availability() {
    // ARRANGE
    let d = init_test_data();

    // ACT & ASSERT
    assert_equal(
        d.network.vehicles_by_availability(),
        [d.veh0, d.veh1, d.veh2, d.veh3, d.veh4],
    );
}

#[test]
fn cheapest_paths_are_sorted_and_simple() {
    // ARRANGE
    let d = init_test_data();
    let network = d.network.clone();
    let veh0 = network.vehicle(d.veh0).unwrap();
    let veh4 = network.vehicle(d.veh4).unwrap();

    // ACT
    let paths = network.cheapest_paths(veh0, 3);
    let all_paths = network.cheapest_paths(veh0, 10);
    let paths_to_dealer2 = network.cheapest_paths(veh4, 3);

    // ASSERT
    assert_eq!(paths.len(), 3);
    assert_eq!(
        paths[0].trucks,
        vec![d.plant_terminal_cheap, d.terminal_dealer1_late]
    );
    assert_eq!(paths[0].cost, 12);
    assert_eq!(paths[0].delivery, Day(4));
    assert_eq!(
        paths[1].trucks,
        vec![d.plant_terminal_cheap, d.terminal_dealer1_early]
    );
    assert_eq!(paths[1].cost, 15);
    assert_eq!(paths[2].cost, 17);

    // 2 * 2 routes via the terminal plus the direct truck
    assert_eq!(all_paths.len(), 5);
    assert_eq!(all_paths[4].trucks, vec![d.plant_dealer1_direct]);

    assert_eq!(paths_to_dealer2.len(), 2);
    assert_eq!(paths_to_dealer2[0].cost, 16);
    assert_eq!(paths_to_dealer2[1].cost, 21);
}
