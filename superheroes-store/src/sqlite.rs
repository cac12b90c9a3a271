//! SQLite implementation of [`HeroRepository`] on an `sqlx` pool.

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use superheroes_core::{
    Entity, Hero, HeroId, HeroPower, HeroPowerId, NewHero, NewHeroPower, NewPower, Power,
    PowerId, PowerPatch,
};

use crate::{schema::SCHEMA, HeroRepository, StoreConfig, StoreError};

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const HERO_COLUMNS: &str = "id, name, super_name, created_at, updated_at";
const POWER_COLUMNS: &str = "id, name, description, created_at, updated_at";
const HERO_POWER_COLUMNS: &str = "id, strength, hero_id, power_id, created_at, updated_at";

#[derive(FromRow)]
struct HeroRow {
    id: i64,
    name: String,
    super_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HeroRow> for Hero {
    fn from(row: HeroRow) -> Self {
        Self {
            id: HeroId::new(row.id),
            name: row.name,
            super_name: row.super_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct PowerRow {
    id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PowerRow> for Power {
    fn from(row: PowerRow) -> Self {
        Self {
            id: PowerId::new(row.id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct HeroPowerRow {
    id: i64,
    strength: String,
    hero_id: i64,
    power_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HeroPowerRow> for HeroPower {
    fn from(row: HeroPowerRow) -> Self {
        Self {
            id: HeroPowerId::new(row.id),
            strength: row.strength,
            hero_id: HeroId::new(row.hero_id),
            power_id: PowerId::new(row.power_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository backed by a SQLite database.
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open the database described by `config` and ensure the schema exists.
    ///
    /// Foreign keys are enabled on every connection. In-memory databases are
    /// pinned to a single connection that is never recycled, so the data
    /// lives as long as the pool.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the URL is invalid, the database
    /// cannot be opened, or the schema cannot be applied.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        let repo = Self { pool };
        repo.apply_schema().await?;

        tracing::info!(url = %config.url, "store connected");
        Ok(repo)
    }

    /// Open a fresh private in-memory database.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the schema cannot be applied.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect(&StoreConfig::in_memory()).await
    }

    async fn apply_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Name the side of a rejected association that does not exist.
    async fn missing_reference(&self, new: &NewHeroPower) -> Result<StoreError, StoreError> {
        let hero_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM heroes WHERE id = ?1)")
                .bind(new.hero_id.get())
                .fetch_one(&self.pool)
                .await?;
        let (entity, id) = if hero_exists {
            (Entity::Power, new.power_id.get())
        } else {
            (Entity::Hero, new.hero_id.get())
        };
        tracing::debug!(%entity, id, "association references a missing row");
        Ok(StoreError::UnknownReference { entity, id })
    }
}

#[async_trait]
impl HeroRepository for SqliteRepository {
    async fn list_heroes(&self) -> Result<Vec<Hero>, StoreError> {
        let sql = format!("SELECT {HERO_COLUMNS} FROM heroes ORDER BY id");
        let rows = sqlx::query_as::<_, HeroRow>(&sql).fetch_all(&self.pool).await?;
        tracing::debug!(count = rows.len(), "listed heroes");
        Ok(rows.into_iter().map(Hero::from).collect())
    }

    async fn get_hero(&self, id: HeroId) -> Result<Hero, StoreError> {
        let sql = format!("SELECT {HERO_COLUMNS} FROM heroes WHERE id = ?1");
        sqlx::query_as::<_, HeroRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .map(Hero::from)
            .ok_or(StoreError::NotFound { entity: Entity::Hero, id: id.get() })
    }

    async fn list_powers(&self) -> Result<Vec<Power>, StoreError> {
        let sql = format!("SELECT {POWER_COLUMNS} FROM powers ORDER BY id");
        let rows = sqlx::query_as::<_, PowerRow>(&sql).fetch_all(&self.pool).await?;
        tracing::debug!(count = rows.len(), "listed powers");
        Ok(rows.into_iter().map(Power::from).collect())
    }

    async fn get_power(&self, id: PowerId) -> Result<Power, StoreError> {
        let sql = format!("SELECT {POWER_COLUMNS} FROM powers WHERE id = ?1");
        sqlx::query_as::<_, PowerRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .map(Power::from)
            .ok_or(StoreError::NotFound { entity: Entity::Power, id: id.get() })
    }

    async fn update_power(&self, id: PowerId, patch: &PowerPatch) -> Result<Power, StoreError> {
        if patch.is_empty() {
            return self.get_power(id).await;
        }

        let sql = format!(
            "UPDATE powers
             SET name = COALESCE(?1, name),
                 description = COALESCE(?2, description),
                 updated_at = ?3
             WHERE id = ?4
             RETURNING {POWER_COLUMNS}"
        );
        let power = sqlx::query_as::<_, PowerRow>(&sql)
            .bind(patch.name.as_deref())
            .bind(patch.description.as_deref())
            .bind(Utc::now())
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .map(Power::from)
            .ok_or(StoreError::NotFound { entity: Entity::Power, id: id.get() })?;

        tracing::info!(
            power_id = %power.id,
            name_changed = patch.name.is_some(),
            description_changed = patch.description.is_some(),
            "power updated"
        );
        Ok(power)
    }

    async fn create_hero_power(&self, new: &NewHeroPower) -> Result<HeroPower, StoreError> {
        // One statement, so the write lock is taken up front and concurrent
        // writers wait on the busy timeout instead of failing a lock upgrade.
        let sql = format!(
            "INSERT INTO hero_powers (strength, hero_id, power_id, created_at, updated_at)
             SELECT ?1, ?2, ?3, ?4, ?4
             WHERE EXISTS (SELECT 1 FROM heroes WHERE id = ?2)
               AND EXISTS (SELECT 1 FROM powers WHERE id = ?3)
             RETURNING {HERO_POWER_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, HeroPowerRow>(&sql)
            .bind(&new.strength)
            .bind(new.hero_id.get())
            .bind(new.power_id.get())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = inserted else {
            return Err(self.missing_reference(new).await?);
        };

        let hero_power = HeroPower::from(row);
        tracing::info!(
            hero_power_id = %hero_power.id,
            hero_id = %hero_power.hero_id,
            power_id = %hero_power.power_id,
            strength = %hero_power.strength,
            "hero power created"
        );
        Ok(hero_power)
    }

    async fn powers_of_hero(&self, id: HeroId) -> Result<Vec<Power>, StoreError> {
        let rows = sqlx::query_as::<_, PowerRow>(
            "SELECT p.id, p.name, p.description, p.created_at, p.updated_at
             FROM hero_powers hp
             JOIN powers p ON p.id = hp.power_id
             WHERE hp.hero_id = ?1
             ORDER BY hp.id",
        )
        .bind(id.get())
        .fetch_all(&self.pool)
        .await?;
        tracing::debug!(hero_id = %id, count = rows.len(), "loaded hero powers");
        Ok(rows.into_iter().map(Power::from).collect())
    }

    async fn associations_of_hero(&self, id: HeroId) -> Result<Vec<HeroPower>, StoreError> {
        let sql = format!("SELECT {HERO_POWER_COLUMNS} FROM hero_powers WHERE hero_id = ?1 ORDER BY id");
        let rows = sqlx::query_as::<_, HeroPowerRow>(&sql)
            .bind(id.get())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(HeroPower::from).collect())
    }

    async fn insert_hero(&self, new: &NewHero) -> Result<Hero, StoreError> {
        let sql = format!(
            "INSERT INTO heroes (name, super_name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             RETURNING {HERO_COLUMNS}"
        );
        let hero = sqlx::query_as::<_, HeroRow>(&sql)
            .bind(&new.name)
            .bind(&new.super_name)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map(Hero::from)?;
        tracing::info!(hero_id = %hero.id, super_name = %hero.super_name, "hero created");
        Ok(hero)
    }

    async fn insert_power(&self, new: &NewPower) -> Result<Power, StoreError> {
        let sql = format!(
            "INSERT INTO powers (name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             RETURNING {POWER_COLUMNS}"
        );
        let power = sqlx::query_as::<_, PowerRow>(&sql)
            .bind(&new.name)
            .bind(&new.description)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map(Power::from)?;
        tracing::info!(power_id = %power.id, name = %power.name, "power created");
        Ok(power)
    }
}
