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

use model::base_types::{Capacity, TruckIdx, VehicleIdx};

/// the vehicles loaded on a truck, sorted by VehicleIdx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruckAssignment {
    truck: TruckIdx,
    capacity: Capacity,
    load: Vec<VehicleIdx>,
}

// static functions
impl TruckAssignment {
    pub(crate) fn empty(truck: TruckIdx, capacity: Capacity) -> TruckAssignment {
        TruckAssignment {
            truck,
            capacity,
            load: Vec::new(),
        }
    }
}

// methods
impl TruckAssignment {
    pub fn truck(&self) -> TruckIdx {
        self.truck
    }

    pub fn load(&self) -> &[VehicleIdx] {
        &self.load
    }

    pub fn len(&self) -> usize {
        self.load.len()
    }

    pub fn is_empty(&self) -> bool {
        self.load.is_empty()
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn remaining_capacity(&self) -> Capacity {
        self.capacity.saturating_sub(self.load.len() as Capacity)
    }

    pub fn contains(&self, vehicle: VehicleIdx) -> bool {
        self.load.binary_search(&vehicle).is_ok()
    }

    pub(crate) fn add(&mut self, vehicle: VehicleIdx) -> Result<(), String> {
        if self.remaining_capacity() == 0 {
            return Err(format!("{} is full", self.truck));
        }
        match self.load.binary_search(&vehicle) {
            Ok(_) => Err(format!("{} is already loaded on {}", vehicle, self.truck)),
            Err(pos) => {
                self.load.insert(pos, vehicle);
                Ok(())
            }
        }
    }

    pub(crate) fn remove(&mut self, vehicle: VehicleIdx) -> Result<(), String> {
        let pos = self.load.binary_search(&vehicle).map_err(|_| {
            format!(
                "{} was not loaded on {} and cannot be removed",
                vehicle, self.truck
            )
        })?;
        self.load.remove(pos);
        Ok(())
    }
}
