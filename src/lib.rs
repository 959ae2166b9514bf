pub mod group;
pub mod iso;
pub mod partition;
pub mod perm;
pub mod young;
pub mod young_group;
mod utils;

pub use group::{GeneratedGroup, PermutationGroup};
pub use iso::{
    find_iso, find_iso_by_brute_force, find_iso_by_element_orders, find_iso_by_name, is_iso,
    is_iso_possible, IsoMethod, IsoSearchError, Isomorphism,
};
pub use partition::{generate_partitions, is_valid_partition, Partition, PartitionError};
pub use perm::{GroupError, Perm};
pub use young::YoungTableau;
pub use young_group::{build_generators, expected_order, young_group, YoungGroupConfig};
