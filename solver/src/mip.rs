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

//! A small, engine independent description of (mixed) integer programs and the interface to
//! the engine solving them.

pub mod highs;

use std::time;

use thiserror::Error;

pub use highs::HighsBackend;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MipVariable {
    pub upper: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    Equal,
    AtMost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MipConstraint {
    pub terms: Vec<(usize, f64)>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

/// minimise the sum of cost * value subject to the constraints, every variable lies in
/// [0, upper]. If the model is integral all variables must take integer values.
#[derive(Debug, Clone, PartialEq)]
pub struct MipModel {
    variables: Vec<MipVariable>,
    constraints: Vec<MipConstraint>,
    integral: bool,
}

impl MipModel {
    pub fn new(integral: bool) -> MipModel {
        MipModel {
            variables: Vec::new(),
            constraints: Vec::new(),
            integral,
        }
    }

    pub fn add_variable(&mut self, upper: f64, cost: f64) -> usize {
        self.variables.push(MipVariable { upper, cost });
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, terms: Vec<(usize, f64)>, sense: ConstraintSense, rhs: f64) {
        self.constraints.push(MipConstraint { terms, sense, rhs });
    }

    pub fn variables(&self) -> &[MipVariable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[MipConstraint] {
        &self.constraints
    }

    pub fn is_integral(&self) -> bool {
        self.integral
    }

    pub fn objective_of(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(variable, value)| variable.cost * value)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLimits {
    pub time_limit: time::Duration,
    pub threads: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MipSolution {
    pub values: Vec<f64>,
    pub objective: f64,
    /// the engine stopped on a limit before proving optimality; the values are an incumbent
    pub limit_reached: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MipError {
    #[error("the model is infeasible")]
    Infeasible,
    #[error("the model is unbounded")]
    Unbounded,
    #[error("the engine failed: {0}")]
    Engine(String),
}

pub trait MipBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// blocks until the engine finishes or the time limit is reached; in the latter case the
    /// best incumbent is returned with `limit_reached` set.
    fn solve(&self, model: &MipModel, limits: &MipLimits) -> Result<MipSolution, MipError>;
}
