//! Demo dataset for local development.
//!
//! Links refer to heroes and powers by their position in the lists, since
//! ids are assigned by the store at insert time.

use crate::model::{NewHero, NewPower};

/// An association between the `hero`-th and `power`-th seed entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedLink {
    pub hero: usize,
    pub power: usize,
    pub strength: &'static str,
}

/// Heroes, powers, and the associations between them.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub heroes: Vec<NewHero>,
    pub powers: Vec<NewPower>,
    pub links: Vec<SeedLink>,
}

/// Returns the canonical demo dataset.
#[must_use]
pub fn demo_seed() -> SeedData {
    let heroes = vec![
        NewHero::new("Kamala Khan", "Ms. Marvel"),
        NewHero::new("Doreen Green", "Squirrel Girl"),
        NewHero::new("Gwen Stacy", "Spider-Gwen"),
        NewHero::new("Janet Van Dyne", "The Wasp"),
        NewHero::new("Wanda Maximoff", "Scarlet Witch"),
        NewHero::new("Carol Danvers", "Captain Marvel"),
        NewHero::new("Jean Grey", "Dark Phoenix"),
        NewHero::new("Ororo Munroe", "Storm"),
        NewHero::new("Kitty Pryde", "Shadowcat"),
        NewHero::new("Elektra Natchios", "Elektra"),
    ];

    let powers = vec![
        NewPower::new("super strength", "gives the wielder super-human strengths"),
        NewPower::new("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
        NewPower::new("super human senses", "allows the wielder to use her senses at a super-human level"),
        NewPower::new("elasticity", "can stretch the human body to extreme lengths"),
    ];

    let links = vec![
        SeedLink { hero: 0, power: 3, strength: "Strong" },
        SeedLink { hero: 1, power: 0, strength: "Average" },
        SeedLink { hero: 2, power: 2, strength: "Strong" },
        SeedLink { hero: 3, power: 1, strength: "Weak" },
        SeedLink { hero: 4, power: 2, strength: "Average" },
        SeedLink { hero: 5, power: 0, strength: "Strong" },
        SeedLink { hero: 5, power: 1, strength: "Strong" },
        SeedLink { hero: 7, power: 1, strength: "Average" },
    ];

    SeedData { heroes, powers, links }
}
