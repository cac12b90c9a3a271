//! Table definitions for the three persisted entities.
//!
//! Applied idempotently on connect. Column changes belong to an external
//! migration tool.

/// DDL statements, in dependency order.
pub const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS heroes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        super_name TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS powers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS hero_powers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        strength TEXT NOT NULL,
        hero_id INTEGER NOT NULL REFERENCES heroes(id),
        power_id INTEGER NOT NULL REFERENCES powers(id),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
];
