//! Typed identifiers for schedule, graph, and population entities.
//!
//! Stops, lines, routes, router nodes and edges are all stored in dense
//! `Vec`s and addressed by position, so every ID is a `u32` index wrapper.
//! Mixing up a `StopId` and a `NodeId` (one stop maps to many nodes) is the
//! classic bug in this domain; the newtypes make it a compile error.

use std::fmt;

/// Declares a `u32` index newtype.  `$label` prefixes the number when the
/// ID is displayed (`stop 4`, `route 0`).
macro_rules! index_id {
    ($(#[$doc:meta])* $name:ident => $label:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            /// Marks an unset slot.
            pub const INVALID: Self = Self(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Position in a dense `Vec`; must fit in `u32`.
            #[inline(always)]
            pub fn from_index(i: usize) -> Self {
                debug_assert!(i < u32::MAX as usize);
                Self(i as u32)
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($label, " {}"), self.0)
                } else {
                    f.write_str(concat!($label, " <invalid>"))
                }
            }
        }
    };
}

index_id! {
    /// A travelling person in the simulated population.
    PersonId => "person"
}

index_id! {
    /// Index of a stop facility in the transit schedule.
    StopId => "stop"
}

index_id! {
    /// Index of a transit line in the schedule.
    LineId => "line"
}

index_id! {
    /// Index of a transit route (one stop pattern of a line).
    RouteId => "route"
}

index_id! {
    /// Index of a node in the transit-router graph.
    NodeId => "node"
}

index_id! {
    /// Index of a directed transit-router graph edge.
    EdgeId => "edge"
}

index_id! {
    /// Opaque reference to a link of the physical (road) network.  The road
    /// network itself lives outside this workspace.
    LinkId => "link"
}
