//! Core types for the superheroes API.
//!
//! Defines the hero/power domain model, the form-field validation rules for
//! incoming mutations, and the explicit JSON projections returned by the
//! gateway. This crate performs no I/O.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod form;
pub mod id;
pub mod model;
pub mod seed;
pub mod view;

pub use error::{CoreError, FieldError};
pub use form::{collect_fields, FormFields, NewHeroPower, PowerPatch};
pub use id::{Entity, HeroId, HeroPowerId, PowerId};
pub use model::{Hero, HeroPower, NewHero, NewPower, Power};
pub use view::{HeroDetail, HeroView, PowerView};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_seed;

    #[test]
    fn id_display_shows_inner_integer() {
        assert_eq!(HeroId::new(7).to_string(), "7");
        assert_eq!(PowerId::from(12).to_string(), "12");
        assert_eq!(HeroPowerId::new(3).get(), 3);
    }

    #[test]
    fn id_serializes_as_bare_integer() {
        let json = match serde_json::to_string(&HeroId::new(42)) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "42", "ids must serialize transparently");
    }

    #[test]
    fn entity_display_matches_resource_name() {
        assert_eq!(Entity::Hero.to_string(), "Hero");
        assert_eq!(Entity::Power.to_string(), "Power");
    }

    #[test]
    fn demo_seed_links_reference_existing_entries() {
        let seed = demo_seed();
        assert!(!seed.heroes.is_empty());
        assert!(!seed.powers.is_empty());
        for link in &seed.links {
            assert!(link.hero < seed.heroes.len(), "hero index out of range");
            assert!(link.power < seed.powers.len(), "power index out of range");
            assert!(!link.strength.is_empty(), "seed strengths must be non-empty");
        }
    }
}
