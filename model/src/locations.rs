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

use derive_more::Display;

use crate::base_types::{Idx, LocationIdx};

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationType {
    #[display(fmt = "PLANT")]
    Plant,
    #[display(fmt = "TERM")]
    Terminal,
    #[display(fmt = "DEAL")]
    Dealer,
}

impl LocationType {
    /// accepts the short codes used in the datasets ("PLANT", "TERM", "DEAL") as well as the
    /// long names, case-insensitive.
    pub fn from_code(code: &str) -> Option<LocationType> {
        match code.to_uppercase().as_str() {
            "PLANT" => Some(LocationType::Plant),
            "TERM" | "TERMINAL" => Some(LocationType::Terminal),
            "DEAL" | "DEALER" => Some(LocationType::Dealer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    idx: LocationIdx,
    name: String,
    location_type: LocationType,
}

impl Location {
    pub fn new(idx: LocationIdx, name: String, location_type: LocationType) -> Location {
        Location {
            idx,
            name,
            location_type,
        }
    }

    pub fn idx(&self) -> LocationIdx {
        self.idx
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location_type(&self) -> LocationType {
        self.location_type
    }

    pub fn is_dealer(&self) -> bool {
        self.location_type == LocationType::Dealer
    }
}

/// all plants, terminals and dealers of an instance.
/// The LocationIdx of a location equals its position in the underlying vector.
pub struct Locations {
    locations: Vec<Location>,
    lookup: HashMap<String, LocationIdx>,
}

impl Locations {
    /// locations are indexed in the given order. Returns the first duplicated name as error.
    pub fn new(named_types: Vec<(String, LocationType)>) -> Result<Locations, String> {
        let mut locations = Vec::with_capacity(named_types.len());
        let mut lookup = HashMap::new();
        for (position, (name, location_type)) in named_types.into_iter().enumerate() {
            let idx = LocationIdx(position as Idx);
            if lookup.insert(name.clone(), idx).is_some() {
                return Err(name);
            }
            locations.push(Location::new(idx, name, location_type));
        }
        Ok(Locations { locations, lookup })
    }

    pub fn get(&self, idx: LocationIdx) -> &Location {
        &self.locations[idx.index()]
    }

    pub fn idx_of(&self, name: &str) -> Option<LocationIdx> {
        self.lookup.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> + '_ {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
