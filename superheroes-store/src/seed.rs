//! Load the demo dataset into an empty store.

use superheroes_core::{seed::demo_seed, NewHeroPower};

use crate::{HeroRepository, StoreError};

/// Insert [`demo_seed`] through `repo` if the store has no heroes yet.
///
/// Returns `true` if data was inserted.
///
/// # Errors
/// Returns the first [`StoreError`] raised by an insert.
pub async fn seed_demo_data(repo: &dyn HeroRepository) -> Result<bool, StoreError> {
    if !repo.list_heroes().await?.is_empty() {
        tracing::info!("store already populated, skipping seed");
        return Ok(false);
    }

    let seed = demo_seed();

    let mut hero_ids = Vec::with_capacity(seed.heroes.len());
    for hero in &seed.heroes {
        hero_ids.push(repo.insert_hero(hero).await?.id);
    }

    let mut power_ids = Vec::with_capacity(seed.powers.len());
    for power in &seed.powers {
        power_ids.push(repo.insert_power(power).await?.id);
    }

    for link in &seed.links {
        let (Some(&hero_id), Some(&power_id)) = (hero_ids.get(link.hero), power_ids.get(link.power))
        else {
            tracing::warn!(hero = link.hero, power = link.power, "seed link out of range");
            continue;
        };
        let new = NewHeroPower { hero_id, power_id, strength: link.strength.to_owned() };
        repo.create_hero_power(&new).await?;
    }

    tracing::info!(
        heroes = hero_ids.len(),
        powers = power_ids.len(),
        links = seed.links.len(),
        "seeded demo data"
    );
    Ok(true)
}
