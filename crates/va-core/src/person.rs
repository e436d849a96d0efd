//! The travelling person.

use crate::PersonId;

/// A traveller on whose behalf a route is computed.
///
/// Only the identity is carried here.  Access/egress and cost models that
/// need per-person attributes look them up by `id` in their own stores.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub id: PersonId,
}

impl Person {
    #[inline]
    pub fn new(id: PersonId) -> Self {
        Self { id }
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.id, f)
    }
}
