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


use std::collections::HashMap;
use std::sync::Arc;
use std::time;

use model::base_types::{Day, LocationIdx, VehicleIdx};
use model::network::paths::PricedPath;
use model::network::Network;
use rayon::prelude::*;
use solution::{Encoding, Route};

use crate::greedy::{greedy_route, route_or_mark};
use crate::{deliver_vehicles_already_at_destination, SolveOptions, Solver, SolverOutcome};

// vehicles agreeing in these values have the same candidate routes
type CandidateKey = (LocationIdx, LocationIdx, Day, Day, Day);

pub struct GreedyCandidatePathsSolver {
    network: Arc<Network>,
    candidate_paths: usize,
}

impl Solver for GreedyCandidatePathsSolver {
    fn initialize(network: Arc<Network>, options: SolveOptions) -> Self {
        GreedyCandidatePathsSolver {
            network,
            candidate_paths: options.candidate_paths,
        }
    }

    fn solve(&self) -> SolverOutcome {
        let candidates = self.compute_candidates();

        let mut encoding = Encoding::empty(self.network.clone());
        deliver_vehicles_already_at_destination(&mut encoding);

        let mut fallbacks = 0;
        for vehicle in self.network.vehicles_by_availability() {
            if encoding.is_assigned(vehicle) {
                continue;
            }
            let chosen = self
                .candidate_key(vehicle)
                .and_then(|key| candidates.get(&key))
                .and_then(|paths| {
                    paths.iter().find(|path| {
                        path.trucks
                            .iter()
                            .all(|&truck| encoding.has_spare_capacity(truck))
                    })
                })
                .map(|path| Route::from_trucks(path.trucks.iter().copied(), &self.network));

            let route = match chosen {
                Some(route) => Some(route),
                None => {
                    fallbacks += 1;
                    greedy_route(&encoding, vehicle)
                }
            };
            route_or_mark(&mut encoding, vehicle, route);
        }
        tracing::debug!("{} vehicles fell back to the per-leg greedy search", fallbacks);
        SolverOutcome::heuristic(encoding)
    }
}

impl GreedyCandidatePathsSolver {
    fn candidate_key(&self, vehicle: VehicleIdx) -> Option<CandidateKey> {
        self.network.vehicle(vehicle).map(|v| {
            (
                v.origin(),
                v.destination(),
                v.available(),
                v.due(),
                v.revealed(),
            )
        })
    }

    /// the cheapest routes (ignoring loads) for every distinct candidate key, computed in
    /// parallel.
    fn compute_candidates(&self) -> HashMap<CandidateKey, Vec<PricedPath>> {
        let start_time = time::Instant::now();
        let mut representatives: HashMap<CandidateKey, VehicleIdx> = HashMap::new();
        for vehicle in self.network.vehicles_iter() {
            if let Some(key) = self.candidate_key(vehicle) {
                representatives.entry(key).or_insert(vehicle);
            }
        }

        let candidates: HashMap<CandidateKey, Vec<PricedPath>> = representatives
            .into_par_iter()
            .filter_map(|(key, vehicle)| {
                let vehicle = self.network.vehicle(vehicle)?;
                Some((key, self.network.cheapest_paths(vehicle, self.candidate_paths)))
            })
            .collect();

        tracing::debug!(
            "computed up to {} candidate routes for {} vehicle groups ({:0.2}sec)",
            self.candidate_paths,
            candidates.len(),
            start_time.elapsed().as_secs_f32()
        );
        candidates
    }
}
