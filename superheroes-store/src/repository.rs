//! Repository abstraction over the hero/power store.
//!
//! Allows swapping the SQLite backend for another relational store without
//! changing the request handlers.

use async_trait::async_trait;
use superheroes_core::{
    Hero, HeroId, HeroPower, NewHero, NewHeroPower, NewPower, Power, PowerId, PowerPatch,
};

use crate::StoreError;

/// CRUD-level access to heroes, powers, and their associations.
///
/// Reads have no side effects. Lists are ordered by primary key.
#[async_trait]
pub trait HeroRepository: Send + Sync {
    /// All heroes.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the query fails.
    async fn list_heroes(&self) -> Result<Vec<Hero>, StoreError>;

    /// One hero by id.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no hero has this id.
    async fn get_hero(&self, id: HeroId) -> Result<Hero, StoreError>;

    /// All powers.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the query fails.
    async fn list_powers(&self) -> Result<Vec<Power>, StoreError>;

    /// One power by id.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no power has this id.
    async fn get_power(&self, id: PowerId) -> Result<Power, StoreError>;

    /// Apply a partial update to a power and return the stored result.
    ///
    /// An empty patch leaves the row, including `updated_at`, untouched.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no power has this id.
    async fn update_power(&self, id: PowerId, patch: &PowerPatch) -> Result<Power, StoreError>;

    /// Insert a hero/power association.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownReference`] if the hero or the power does
    /// not exist; nothing is inserted in that case.
    async fn create_hero_power(&self, new: &NewHeroPower) -> Result<HeroPower, StoreError>;

    /// The powers reachable through a hero's associations, one entry per
    /// association row, in association order.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the query fails.
    async fn powers_of_hero(&self, id: HeroId) -> Result<Vec<Power>, StoreError>;

    /// The association rows of a hero, in insertion order.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the query fails.
    async fn associations_of_hero(&self, id: HeroId) -> Result<Vec<HeroPower>, StoreError>;

    /// Insert a hero.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the insert fails.
    async fn insert_hero(&self, new: &NewHero) -> Result<Hero, StoreError>;

    /// Insert a power.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the insert fails.
    async fn insert_power(&self, new: &NewPower) -> Result<Power, StoreError>;
}
