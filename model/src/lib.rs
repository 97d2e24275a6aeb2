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

pub mod base_types;
pub mod config;
pub mod error;
pub mod json_serialisation;
pub mod locations;
pub mod network;
pub mod test_utilities;
pub mod trucks;
pub mod uncertainty;
pub mod vehicles;

pub use error::DataError;
pub use json_serialisation::{load_network, load_network_with_revelation};
pub use network::Network;
