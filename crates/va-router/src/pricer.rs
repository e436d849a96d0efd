//! First/last-mile pricing.
//!
//! | Leg mode                       | Cost                                            |
//! |--------------------------------|-------------------------------------------------|
//! | walk family                    | −time·mu_walk − distance·mu_distance_pt         |
//! | configured teleported mode     | −time·mu_mode_time − distance·mu_mode_distance  |
//! | anything else                  | `RouterError::UnsupportedMode`                  |

use va_core::{Leg, Person, Point, RouterConfig};

use crate::{AccessEgressModel, RouterError, RouterResult};

/// Turns access/egress legs into search costs.
pub struct AccessEgressPricer<'a, A: AccessEgressModel> {
    model:  &'a A,
    config: &'a RouterConfig,
}

impl<'a, A: AccessEgressModel> AccessEgressPricer<'a, A> {
    pub fn new(model: &'a A, config: &'a RouterConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &'a A {
        self.model
    }

    /// Ask the model for a leg from `from` to `to` and price it.
    pub fn price(
        &self,
        person:       &Person,
        from:         Point,
        to:           Point,
        time:         f64,
        surcharge_on: bool,
    ) -> RouterResult<(Leg, f64)> {
        let leg = self.model.price_leg(person, from, to, time, surcharge_on);
        let cost = self.leg_cost(&leg)?;
        Ok((leg, cost))
    }

    /// Disutility of an access/egress leg.
    pub fn leg_cost(&self, leg: &Leg) -> RouterResult<f64> {
        let cfg = self.config;
        if leg.mode.is_walk_family() {
            return Ok(-leg.travel_time * cfg.marginal_utility_of_travel_time_walk_utl_s
                - leg.distance * cfg.marginal_utility_of_travel_distance_pt_utl_m);
        }
        match cfg.teleported_mode(leg.mode) {
            Some(p) => Ok(-leg.travel_time * p.marginal_utility_of_travel_time_utl_s
                - leg.distance * p.marginal_utility_of_travel_distance_utl_m),
            None => Err(RouterError::UnsupportedMode(leg.mode)),
        }
    }
}
