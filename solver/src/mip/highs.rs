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

use good_lp::{
    highs, variable, variables, Expression, ResolutionError, Solution, SolutionStatus, SolverModel,
    Variable,
};

use super::{ConstraintSense, MipBackend, MipError, MipLimits, MipModel, MipSolution};

/// the HiGHS engine through good_lp.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsBackend;

impl MipBackend for HighsBackend {
    fn name(&self) -> &'static str {
        "HiGHS"
    }

    fn solve(&self, model: &MipModel, limits: &MipLimits) -> Result<MipSolution, MipError> {
        let mut vars = variables!();
        let xs: Vec<Variable> = model
            .variables()
            .iter()
            .map(|v| {
                let definition = variable().min(0.0).max(v.upper);
                if model.is_integral() {
                    vars.add(definition.integer())
                } else {
                    vars.add(definition)
                }
            })
            .collect();

        let objective = model
            .variables()
            .iter()
            .zip(xs.iter())
            .fold(Expression::from(0.0), |acc, (v, &x)| acc + v.cost * x);

        let mut problem = vars
            .minimise(objective)
            .using(highs)
            .set_option("output_flag", false)
            .set_option("time_limit", limits.time_limit.as_secs_f64())
            .set_option("threads", limits.threads.max(1) as i32);

        for constraint in model.constraints() {
            let lhs = constraint
                .terms
                .iter()
                .fold(Expression::from(0.0), |acc, &(i, coefficient)| {
                    acc + coefficient * xs[i]
                });
            match constraint.sense {
                ConstraintSense::Equal => problem.add_constraint(lhs.eq(constraint.rhs)),
                ConstraintSense::AtMost => problem.add_constraint(lhs.leq(constraint.rhs)),
            };
        }

        let solution = problem.solve().map_err(|err| match err {
            ResolutionError::Infeasible => MipError::Infeasible,
            ResolutionError::Unbounded => MipError::Unbounded,
            other => MipError::Engine(other.to_string()),
        })?;

        // HiGHS reports every limit (time, iterations, memory) as TimeLimit
        let limit_reached = matches!(solution.status(), SolutionStatus::TimeLimit);
        let values: Vec<f64> = xs.iter().map(|&x| solution.value(x)).collect();
        Ok(MipSolution {
            objective: model.objective_of(&values),
            values,
            limit_reached,
        })
    }
}
