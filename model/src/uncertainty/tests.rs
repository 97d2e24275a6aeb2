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

use super::*;

#[test]
fn quantile_interpolates_linearly() {
    // ARRANGE
    let history = vec![10, 4, 8, 6];

    // ACT & ASSERT
    assert_eq!(quantile(&history, 0.0), Some(4.0));
    assert_eq!(quantile(&history, 1.0), Some(10.0));
    assert_eq!(quantile(&history, 0.5), Some(7.0));
    assert_eq!(quantile(&[], 0.5), None);
}

#[test]
fn deterministic_uses_realised_capacity() {
    // ARRANGE
    let revelation = CapacityRevelation::new(true, 0.3).unwrap();

    // ACT
    let capacity = revelation.revealed_capacity(5, Some(9), &[1, 2, 3]);

    // ASSERT
    assert!(revelation.is_deterministic());
    assert_eq!(capacity, 5);
}

#[test]
fn quantile_zero_is_most_conservative() {
    // ARRANGE
    let conservative = CapacityRevelation::new(false, 0.0).unwrap();
    let optimistic = CapacityRevelation::new(false, 1.0).unwrap();
    let history = vec![3, 7, 5];

    // ACT
    let low = conservative.revealed_capacity(6, Some(8), &history);
    let high = optimistic.revealed_capacity(6, Some(8), &history);

    // ASSERT
    assert_eq!(low, 3);
    assert_eq!(high, 7);
    assert!(low <= high);
}

#[test]
fn revealed_capacity_is_capped_by_planned_capacity() {
    // ARRANGE
    let revelation = CapacityRevelation::new(false, 1.0).unwrap();

    // ACT
    let capped = revelation.revealed_capacity(6, Some(4), &[9, 10]);
    let without_history = revelation.revealed_capacity(6, None, &[]);

    // ASSERT
    assert_eq!(capped, 4);
    assert_eq!(without_history, 6);
}

#[test]
fn quantile_outside_unit_interval_is_rejected() {
    assert!(matches!(
        CapacityRevelation::new(false, 1.5),
        Err(DataError::InvalidQuantile(_))
    ));
    assert!(CapacityRevelation::new(true, 1.5).is_ok());
}

#[test]
fn standard_deviation_uses_sample_variance() {
    // ARRANGE
    let history = vec![4, 6, 8];

    // ACT & ASSERT
    assert_eq!(mean(&history), Some(6.0));
    assert_eq!(standard_deviation(&history), Some(2.0));
    assert_eq!(standard_deviation(&[5]), Some(0.0));
    assert_eq!(standard_deviation(&[]), None);
}

#[test]
fn mean_minus_std_dev_subtracts_from_historical_mean() {
    // ARRANGE
    let one = CapacityRevelation::mean_minus_std_dev(1.0).unwrap();
    let five = CapacityRevelation::mean_minus_std_dev(5.0).unwrap();
    let history = vec![4, 6, 8];

    // ACT
    let moderate = one.revealed_capacity(7, Some(9), &history);
    let negative = five.revealed_capacity(7, Some(9), &history);
    let capped = one.revealed_capacity(7, Some(3), &history);
    let without_history = one.revealed_capacity(7, Some(9), &[]);

    // ASSERT
    assert!(!one.is_deterministic());
    assert_eq!(moderate, 4);
    assert_eq!(negative, 0);
    assert_eq!(capped, 3);
    assert_eq!(without_history, 9);
}

#[test]
fn planned_minus_std_dev_rounds_the_deviation_up() {
    // ARRANGE
    let revelation = CapacityRevelation::planned_minus_std_dev(0.6).unwrap();
    let history = vec![4, 6, 8];

    // ACT
    let reduced = revelation.revealed_capacity(7, Some(9), &history);
    let saturated = revelation.revealed_capacity(7, Some(1), &history);
    let single_entry = revelation.revealed_capacity(7, Some(9), &[5]);
    let without_plan = revelation.revealed_capacity(7, None, &history);

    // ASSERT
    assert_eq!(reduced, 7);
    assert_eq!(saturated, 0);
    assert_eq!(single_entry, 9);
    assert_eq!(without_plan, 5);
}

#[test]
fn negative_std_dev_factor_is_rejected() {
    assert!(matches!(
        CapacityRevelation::mean_minus_std_dev(-1.0),
        Err(DataError::InvalidStdDevFactor(_))
    ));
    assert!(matches!(
        CapacityRevelation::planned_minus_std_dev(f64::NAN),
        Err(DataError::InvalidStdDevFactor(_))
    ));
}

#[test]
fn revelation_names_its_policy() {
    assert_eq!(CapacityRevelation::Deterministic.to_string(), "deterministic");
    assert_eq!(CapacityRevelation::Quantile(0.5).to_string(), "quantile_0.5");
    assert_eq!(
        CapacityRevelation::MeanMinusStdDev(1.5).to_string(),
        "mean_minus_std_1.5"
    );
    assert_eq!(
        CapacityRevelation::PlannedMinusStdDev(1.0).to_string(),
        "planned_minus_std_1"
    );
}
