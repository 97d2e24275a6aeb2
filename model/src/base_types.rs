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

use derive_more::Display;
use derive_more::From;
use std::ops::Add;

pub type Idx = u32;

#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "loc{}", _0)]
pub struct LocationIdx(pub Idx);

#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "veh{}", _0)]
pub struct VehicleIdx(pub Idx);

#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "trans{}", _0)]
pub struct TransportIdx(pub Idx);

#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "truck{}", _0)]
pub struct TruckIdx(pub Idx);

impl TransportIdx {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl TruckIdx {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl LocationIdx {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

pub type DayCount = i32;

/// Days are counted from the start of the planning horizon. Negative days are allowed (e.g.
/// vehicles that are already waiting at the plant when the horizon starts).
#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "day{}", _0)]
pub struct Day(pub DayCount);

impl Day {
    /// number of days from self to later. Negative if later is earlier than self.
    pub fn days_until(self, later: Day) -> DayCount {
        later.0 - self.0
    }

    pub fn value(self) -> DayCount {
        self.0
    }
}

impl Add<DayCount> for Day {
    type Output = Day;

    fn add(self, days: DayCount) -> Day {
        Day(self.0 + days)
    }
}

pub type Capacity = u32;
pub type VehicleCount = u32;
pub type Cost = i64;
