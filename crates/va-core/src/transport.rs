//! Leg mode enum shared by the access/egress models and the router.
//!
//! The walk family (`Walk`, `TransitWalk`, `AccessWalk`, `EgressWalk`) is
//! priced with the walk marginal utilities.  Every other access mode needs
//! explicitly configured parameters; the router refuses to guess.

use std::str::FromStr;

use crate::CoreError;

/// The mode of a single itinerary leg.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[non_exhaustive]
pub enum TransportMode {
    /// On foot, door to door.
    #[default]
    Walk,
    /// Walk between two stops, or from an access leg's end to a stop.
    TransitWalk,
    /// Walk from the origin to the first stop.
    AccessWalk,
    /// Walk from the last stop to the destination.
    EgressWalk,
    /// Scheduled public transit (bus, rail, ferry…).
    Pt,
    /// Demand-responsive transport, teleported.
    Drt,
    /// Taxi, teleported.
    Taxi,
    /// Private vehicle.
    Car,
    /// Bicycle.
    Bike,
}

impl TransportMode {
    /// `true` for the modes priced with the walk marginal utilities.
    #[inline]
    pub fn is_walk_family(self) -> bool {
        matches!(
            self,
            TransportMode::Walk
                | TransportMode::TransitWalk
                | TransportMode::AccessWalk
                | TransportMode::EgressWalk
        )
    }

    /// Human-readable label; matches the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Walk        => "walk",
            TransportMode::TransitWalk => "transit_walk",
            TransportMode::AccessWalk  => "access_walk",
            TransportMode::EgressWalk  => "egress_walk",
            TransportMode::Pt          => "pt",
            TransportMode::Drt         => "drt",
            TransportMode::Taxi        => "taxi",
            TransportMode::Car         => "car",
            TransportMode::Bike        => "bike",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "walk"         => TransportMode::Walk,
            "transit_walk" => TransportMode::TransitWalk,
            "access_walk"  => TransportMode::AccessWalk,
            "egress_walk"  => TransportMode::EgressWalk,
            "pt"           => TransportMode::Pt,
            "drt"          => TransportMode::Drt,
            "taxi"         => TransportMode::Taxi,
            "car"          => TransportMode::Car,
            "bike"         => TransportMode::Bike,
            other => return Err(CoreError::Parse(format!("unknown transport mode {other:?}"))),
        })
    }
}
