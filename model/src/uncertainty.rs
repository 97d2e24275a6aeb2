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

use std::fmt;

use crate::base_types::Capacity;
use crate::error::DataError;

/// decides which truck capacity the solvers may plan with.
///
/// In the deterministic setting the realised capacities are known in advance. In the real-time
/// setting only the planned capacity and a history of previously realised capacities are
/// known, and the planner derives its capacity from the history (never exceeding the planned
/// capacity):
/// - Quantile(q): the q-quantile of the history. 0.0 takes the historical minimum and is
///   thereby the most conservative choice.
/// - MeanMinusStdDev(k): the mean of the history minus k standard deviations.
/// - PlannedMinusStdDev(k): the planned capacity minus k standard deviations (rounded up).
///
/// Without history the planned capacity is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacityRevelation {
    Deterministic,
    Quantile(f64),
    MeanMinusStdDev(f64),
    PlannedMinusStdDev(f64),
}

impl CapacityRevelation {
    pub fn new(deterministic: bool, quantile_value: f64) -> Result<CapacityRevelation, DataError> {
        if deterministic {
            return Ok(CapacityRevelation::Deterministic);
        }
        if !(0.0..=1.0).contains(&quantile_value) {
            return Err(DataError::InvalidQuantile(quantile_value));
        }
        Ok(CapacityRevelation::Quantile(quantile_value))
    }

    pub fn mean_minus_std_dev(factor: f64) -> Result<CapacityRevelation, DataError> {
        validate_factor(factor).map(CapacityRevelation::MeanMinusStdDev)
    }

    pub fn planned_minus_std_dev(factor: f64) -> Result<CapacityRevelation, DataError> {
        validate_factor(factor).map(CapacityRevelation::PlannedMinusStdDev)
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self, CapacityRevelation::Deterministic)
    }

    pub fn revealed_capacity(
        &self,
        realised: Capacity,
        planned: Option<Capacity>,
        history: &[Capacity],
    ) -> Capacity {
        let planned = planned.unwrap_or(realised);
        match self {
            CapacityRevelation::Deterministic => realised,
            CapacityRevelation::Quantile(q) => match quantile(history, *q) {
                Some(value) => planned.min(to_capacity(value.floor())),
                None => planned,
            },
            CapacityRevelation::MeanMinusStdDev(k) => {
                match (mean(history), standard_deviation(history)) {
                    (Some(mean), Some(deviation)) => {
                        planned.min(to_capacity((mean - k * deviation).floor()))
                    }
                    _ => planned,
                }
            }
            CapacityRevelation::PlannedMinusStdDev(k) => match standard_deviation(history) {
                Some(deviation) => planned.saturating_sub(to_capacity((k * deviation).ceil())),
                None => planned,
            },
        }
    }
}

impl fmt::Display for CapacityRevelation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CapacityRevelation::Deterministic => write!(f, "deterministic"),
            CapacityRevelation::Quantile(q) => write!(f, "quantile_{}", q),
            CapacityRevelation::MeanMinusStdDev(k) => write!(f, "mean_minus_std_{}", k),
            CapacityRevelation::PlannedMinusStdDev(k) => write!(f, "planned_minus_std_{}", k),
        }
    }
}

fn validate_factor(factor: f64) -> Result<f64, DataError> {
    if factor.is_finite() && factor >= 0.0 {
        Ok(factor)
    } else {
        Err(DataError::InvalidStdDevFactor(factor))
    }
}

// negative values become 0, the cast saturates at the upper end
fn to_capacity(value: f64) -> Capacity {
    value.max(0.0) as Capacity
}

pub fn mean(sample: &[Capacity]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    Some(sample.iter().map(|&c| c as f64).sum::<f64>() / sample.len() as f64)
}

/// sample standard deviation (divided by n - 1); 0.0 for a single value and None for an empty
/// sample.
pub fn standard_deviation(sample: &[Capacity]) -> Option<f64> {
    let mean = mean(sample)?;
    if sample.len() < 2 {
        return Some(0.0);
    }
    let squares: f64 = sample.iter().map(|&c| (c as f64 - mean).powi(2)).sum();
    Some((squares / (sample.len() - 1) as f64).sqrt())
}

/// empirical quantile with linear interpolation between the closest ranks.
/// Returns None for an empty sample.
pub fn quantile(sample: &[Capacity], q: f64) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    let mut sorted = sample.to_vec();
    sorted.sort_unstable();
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] as f64 + (sorted[upper] as f64 - sorted[lower] as f64) * fraction)
}

#[cfg(test)]
mod tests;
