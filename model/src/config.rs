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

use crate::base_types::{Cost, DayCount};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub transfer_rest_days: DayCount, // at plants and terminals, not at dealers
    pub planned_delay_notice_days: DayCount,
    pub delay_costs: ConfigDelayCosts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDelayCosts {
    pub planned: DelayTariff,
    pub unplanned: DelayTariff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayTariff {
    pub fixed: Cost,
    pub per_day: Cost,
}

impl DelayTariff {
    pub fn cost(&self, days_late: DayCount) -> Cost {
        if days_late <= 0 {
            0
        } else {
            self.fixed + self.per_day * days_late as Cost
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            transfer_rest_days: 1,
            planned_delay_notice_days: 7,
            delay_costs: ConfigDelayCosts {
                planned: DelayTariff {
                    fixed: 200,
                    per_day: 50,
                },
                unplanned: DelayTariff {
                    fixed: 500,
                    per_day: 100,
                },
            },
        }
    }
}

impl Config {
    pub fn tariff(&self, planned: bool) -> DelayTariff {
        if planned {
            self.delay_costs.planned
        } else {
            self.delay_costs.unplanned
        }
    }
}
