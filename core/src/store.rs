//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The game keeps exactly one blob, under one slot key; everything else
//! about the household lives inside that blob.

use crate::error::SimResult;
use rusqlite::{params, Connection, OptionalExtension};

const SLOT: &str = "household";

pub struct SimStore {
    conn: Connection,
}

impl SimStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_save_slot.sql"))?;
        Ok(())
    }

    // ── Save slot ──────────────────────────────────────────────

    /// Overwrite the save slot with `state_json`.
    pub fn save_state(&self, state_json: &str) -> SimResult<()> {
        let saved_at = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO save_slot (slot, state_json, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET state_json = excluded.state_json,
                                             saved_at   = excluded.saved_at",
            params![SLOT, state_json, saved_at],
        )?;
        Ok(())
    }

    /// The saved blob, if one exists.
    pub fn load_state(&self) -> SimResult<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT state_json FROM save_slot WHERE slot = ?1",
                params![SLOT],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(json)
    }

    /// When the slot was last written (RFC 3339), if ever.
    pub fn saved_at(&self) -> SimResult<Option<String>> {
        let ts = self
            .conn
            .query_row(
                "SELECT saved_at FROM save_slot WHERE slot = ?1",
                params![SLOT],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(ts)
    }
}
