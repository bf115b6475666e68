//! Type-safe identifier wrappers.
//!
//! Agents carry dense `u32` indices assigned in creation order. A resident
//! with id `n` is the `n`-th resident ever created, and the controller uses
//! the id directly as an index into its agent table. Runs are identified by
//! a UUID v7 that never influences simulation results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a dense index newtype around `u32` with standard derives.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an identifier from its creation-order index.
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Return the raw index.
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Return the index as a `usize` suitable for table lookups.
            pub fn index(self) -> usize {
                usize::try_from(self.0).unwrap_or(usize::MAX)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self(index)
            }
        }
    };
}

define_index! {
    /// Unique identifier for a mobile resident.
    ResidentId
}

define_index! {
    /// Unique identifier for a stationary city (one per grid cell).
    CityId
}

/// Unique identifier for a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new run identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RunId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_usize() {
        let id = ResidentId::new(7);
        assert_eq!(id.get(), 7);
        assert_eq!(id.index(), 7);
        assert_eq!(CityId::from(3).index(), 3);
    }

    #[test]
    fn ids_order_by_creation_index() {
        assert!(CityId::new(1) < CityId::new(2));
        assert!(ResidentId::new(0) < ResidentId::new(10));
    }

    #[test]
    fn run_ids_are_unique() {
        let a = RunId::new();
        let b = RunId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn display_prints_raw_index() {
        assert_eq!(ResidentId::new(42).to_string(), "42");
    }
}
