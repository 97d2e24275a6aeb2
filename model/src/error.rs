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

use thiserror::Error;

use crate::base_types::VehicleIdx;

/// a malformed or inconsistent dataset. Always fatal: no solver runs on such an instance.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("could not read dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown location '{0}'")]
    UnknownLocation(String),
    #[error("unknown location type '{code}' of location '{location}'")]
    UnknownLocationType { location: String, code: String },
    #[error("location '{0}' is defined twice")]
    DuplicateLocation(String),
    #[error("vehicle {0} is defined twice")]
    DuplicateVehicle(VehicleIdx),
    #[error("truck {number} from '{origin}' to '{destination}' departing on day {departure} is defined twice")]
    DuplicateTruck {
        origin: String,
        destination: String,
        number: u32,
        departure: i32,
    },
    #[error("truck {number} from '{origin}' to '{destination}' has non-positive capacity {capacity}")]
    NonPositiveCapacity {
        origin: String,
        destination: String,
        number: u32,
        capacity: i64,
    },
    #[error("truck {number} from '{origin}' to '{destination}' has capacity {capacity} which is too large")]
    CapacityOutOfRange {
        origin: String,
        destination: String,
        number: u32,
        capacity: i64,
    },
    #[error("truck {number} from '{origin}' to '{destination}' has negative price {price}")]
    NegativePrice {
        origin: String,
        destination: String,
        number: u32,
        price: i64,
    },
    #[error("truck {number} from '{origin}' to '{destination}' arrives (day {arrival}) before it departs (day {departure})")]
    ArrivalBeforeDeparture {
        origin: String,
        destination: String,
        number: u32,
        departure: i32,
        arrival: i32,
    },
    #[error("truck {number} leaves and enters the same location '{location}'")]
    Loop { location: String, number: u32 },
    #[error("quantile value {0} is outside of [0, 1]")]
    InvalidQuantile(f64),
    #[error("standard deviation factor {0} is negative or not finite")]
    InvalidStdDevFactor(f64),
}
