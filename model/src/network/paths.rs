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

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Network;
use crate::base_types::{Cost, Day, LocationIdx, TruckIdx};
use crate::vehicles::Vehicle;

/// an end-to-end sequence of trucks for one vehicle together with its cost (prices plus delay
/// cost).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedPath {
    pub trucks: Vec<TruckIdx>,
    pub cost: Cost,
    pub delivery: Day,
}

struct Label {
    truck: TruckIdx,
    parent: Option<usize>,
}

// (cost, arrival, finished, truck, label) -- finished entries carry the delay cost as well
type HeapEntry = Reverse<(Cost, Day, bool, TruckIdx, usize)>;

impl Network {
    /// the k cheapest routes of the vehicle ignoring truck loads.
    ///
    /// Best-first label search over the trucks: every truck is expanded at most k times, which
    /// yields the k cheapest routes as long as routes do not visit a location twice (routes that
    /// would do so are discarded). Trucks without capacity are ignored. The result is sorted by
    /// cost, then delivery day.
    pub fn cheapest_paths(&self, vehicle: &Vehicle, k: usize) -> Vec<PricedPath> {
        let mut result = Vec::new();
        if k == 0 || vehicle.origin() == vehicle.destination() {
            return result;
        }

        let mut labels: Vec<Label> = Vec::new();
        let mut expansions: Vec<usize> = vec![0; self.number_of_trucks()];
        let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();

        for truck in self.departures_from(vehicle.origin(), vehicle.available()) {
            if self.usable_towards(truck, vehicle.destination()) {
                self.push_label(&mut labels, &mut heap, truck, None, 0);
            }
        }

        while let Some(Reverse((cost, arrival, finished, truck, label_idx))) = heap.pop() {
            if finished {
                result.push(PricedPath {
                    trucks: self.trucks_of_label(&labels, label_idx),
                    cost,
                    delivery: arrival,
                });
                if result.len() == k {
                    break;
                }
                continue;
            }

            if expansions[truck.index()] >= k {
                continue;
            }
            expansions[truck.index()] += 1;

            let destination = self.truck(truck).destination();
            if destination == vehicle.destination() {
                let delivery = self.truck(truck).arrival();
                heap.push(Reverse((
                    cost + self.delay_cost(vehicle, delivery),
                    delivery,
                    true,
                    truck,
                    label_idx,
                )));
                continue;
            }

            for next in self.departures_from(destination, self.ready_day(truck)) {
                if !self.usable_towards(next, vehicle.destination()) {
                    continue;
                }
                let next_destination = self.truck(next).destination();
                if next_destination == vehicle.origin()
                    || self.label_visits(&labels, label_idx, next_destination)
                {
                    continue;
                }
                self.push_label(&mut labels, &mut heap, next, Some(label_idx), cost);
            }
        }
        result
    }

    fn usable_towards(&self, truck: TruckIdx, destination: LocationIdx) -> bool {
        self.capacity_of(truck) > 0 && self.can_reach(self.truck(truck).destination(), destination)
    }

    fn push_label(
        &self,
        labels: &mut Vec<Label>,
        heap: &mut BinaryHeap<HeapEntry>,
        truck: TruckIdx,
        parent: Option<usize>,
        price_so_far: Cost,
    ) {
        let price = price_so_far + self.price_of(truck);
        labels.push(Label { truck, parent });
        heap.push(Reverse((
            price,
            self.truck(truck).arrival(),
            false,
            truck,
            labels.len() - 1,
        )));
    }

    fn label_visits(&self, labels: &[Label], label_idx: usize, location: LocationIdx) -> bool {
        let mut current = Some(label_idx);
        while let Some(idx) = current {
            if self.truck(labels[idx].truck).destination() == location {
                return true;
            }
            current = labels[idx].parent;
        }
        false
    }

    fn trucks_of_label(&self, labels: &[Label], label_idx: usize) -> Vec<TruckIdx> {
        let mut trucks = Vec::new();
        let mut current = Some(label_idx);
        while let Some(idx) = current {
            trucks.push(labels[idx].truck);
            current = labels[idx].parent;
        }
        trucks.reverse();
        trucks
    }
}
