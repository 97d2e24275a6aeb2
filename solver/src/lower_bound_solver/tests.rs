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

use model::test_utilities::{init_test_data, single_transport_network};

use crate::mip::{HighsBackend, MipBackend, MipError, MipLimits, MipModel, MipSolution};
use crate::{OptimalityGap, SolveOptions, Solver};

use super::LowerBoundSolver;

struct UnboundedBackend;

impl MipBackend for UnboundedBackend {
    fn name(&self) -> &'static str {
        "unbounded"
    }

    fn solve(&self, _model: &MipModel, _limits: &MipLimits) -> Result<MipSolution, MipError> {
        Err(MipError::Unbounded)
    }
}

/// returns the relaxation as if the engine had been stopped on its time limit
struct InterruptedHighs;

impl MipBackend for InterruptedHighs {
    fn name(&self) -> &'static str {
        "interrupted"
    }

    fn solve(&self, model: &MipModel, limits: &MipLimits) -> Result<MipSolution, MipError> {
        let solution = HighsBackend.solve(model, limits)?;
        Ok(MipSolution {
            limit_reached: true,
            ..solution
        })
    }
}

#[test]
fn lower_bound_of_multi_hop_instance() {
    // ARRANGE
    let d = init_test_data();
    let solver = LowerBoundSolver::initialize(d.network.clone(), SolveOptions::default());

    // ACT
    let outcome = solver.solve();

    // ASSERT
    let bound = outcome.lower_bound.unwrap();
    assert!(bound <= 92.0 + 1e-6);
    assert!(bound > 0.0);
    assert_eq!(outcome.encoding.number_of_routed_vehicles(), 0);
    assert_eq!(outcome.optimality_gap, Some(OptimalityGap::Proven));
}

#[test]
fn lower_bound_contains_the_unroutable_penalty() {
    // ARRANGE
    let network = single_transport_network(2, 10, 3);
    let penalty = network.unroutable_penalty() as f64;
    let solver = LowerBoundSolver::initialize(network, SolveOptions::default());

    // ACT
    let bound = solver.solve().lower_bound.unwrap();

    // ASSERT
    assert!((bound - (20.0 + penalty)).abs() < 1e-6);
}

#[test]
fn failed_relaxation_reports_no_bound() {
    // ARRANGE
    let network = single_transport_network(2, 10, 3);
    let solver =
        LowerBoundSolver::with_backend(network, SolveOptions::default(), Box::new(UnboundedBackend));

    // ACT
    let outcome = solver.solve();

    // ASSERT
    assert_eq!(outcome.lower_bound, None);
    assert_eq!(outcome.optimality_gap, Some(OptimalityGap::Infeasible));
}

#[test]
fn interrupted_relaxation_reports_no_bound() {
    // ARRANGE
    let network = single_transport_network(2, 10, 3);
    let solver =
        LowerBoundSolver::with_backend(network, SolveOptions::default(), Box::new(InterruptedHighs));

    // ACT
    let outcome = solver.solve();

    // ASSERT
    assert_eq!(outcome.lower_bound, None);
    assert_eq!(outcome.optimality_gap, Some(OptimalityGap::Unknown));
}
