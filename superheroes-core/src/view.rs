//! Explicit JSON projections of the domain model.
//!
//! Each view lists exactly the fields a response may carry. Timestamps and
//! foreign keys never leave the store through these types.

use serde::Serialize;

use crate::id::{HeroId, PowerId};
use crate::model::{Hero, Power};

/// `{id, name, description}` projection of a [`Power`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerView {
    pub id: PowerId,
    pub name: String,
    pub description: String,
}

impl From<&Power> for PowerView {
    fn from(power: &Power) -> Self {
        Self { id: power.id, name: power.name.clone(), description: power.description.clone() }
    }
}

impl PowerView {
    /// Project a list of powers, preserving row order.
    #[must_use]
    pub fn list(powers: &[Power]) -> Vec<Self> {
        powers.iter().map(Self::from).collect()
    }
}

/// `{id, name, super_name}` projection of a [`Hero`], used by list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroView {
    pub id: HeroId,
    pub name: String,
    pub super_name: String,
}

impl From<&Hero> for HeroView {
    fn from(hero: &Hero) -> Self {
        Self { id: hero.id, name: hero.name.clone(), super_name: hero.super_name.clone() }
    }
}

impl HeroView {
    /// Project a list of heroes, preserving row order.
    #[must_use]
    pub fn list(heroes: &[Hero]) -> Vec<Self> {
        heroes.iter().map(Self::from).collect()
    }
}

/// A hero together with the powers reachable through its associations.
///
/// The nested entries are plain [`PowerView`]s: association strength is not
/// part of this shape. `powers` is always present, empty when the hero has no
/// associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroDetail {
    pub id: HeroId,
    pub name: String,
    pub super_name: String,
    pub powers: Vec<PowerView>,
}

impl HeroDetail {
    /// Combine a hero with its associated powers, one entry per association.
    #[must_use]
    pub fn project(hero: &Hero, powers: &[Power]) -> Self {
        Self {
            id: hero.id,
            name: hero.name.clone(),
            super_name: hero.super_name.clone(),
            powers: PowerView::list(powers),
        }
    }
}
