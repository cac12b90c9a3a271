use chrono::{DateTime, Utc};

use crate::id::{HeroId, HeroPowerId, PowerId};

/// A superhero character.
///
/// Owns zero or more [`HeroPower`] associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub id: HeroId,
    /// Civilian name, e.g. `"Kamala Khan"`.
    pub name: String,
    /// Hero alias, e.g. `"Ms. Marvel"`.
    pub super_name: String,
    /// Set once at insertion.
    pub created_at: DateTime<Utc>,
    /// Refreshed whenever the row is mutated.
    pub updated_at: DateTime<Utc>,
}

/// An ability a hero may possess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Power {
    pub id: PowerId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join row recording that one hero has one power at a given strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroPower {
    pub id: HeroPowerId,
    /// Free text such as `"Strong"`, `"Average"`, or `"Weak"`.
    pub strength: String,
    pub hero_id: HeroId,
    pub power_id: PowerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for inserting a new hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHero {
    pub name: String,
    pub super_name: String,
}

impl NewHero {
    pub fn new(name: impl Into<String>, super_name: impl Into<String>) -> Self {
        Self { name: name.into(), super_name: super_name.into() }
    }
}

/// Column values for inserting a new power.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPower {
    pub name: String,
    pub description: String,
}

impl NewPower {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into() }
    }
}
