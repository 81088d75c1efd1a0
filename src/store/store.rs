// src/store/store.rs — SQLite operations

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

/// Low-level SQLite operations for sessions and color requests.
pub struct Store {
    conn: Connection,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionRow {
    pub id: String,
    pub ip_address: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorRequestRow {
    pub id: i64,
    pub session_id: String,
    pub input_text: String,
    pub hex_color: String,
    pub raw_output: String,
    pub imagery: Option<String>,
    pub created_at: String,
}

/// A color request joined with the session that made it.
#[derive(Debug, Clone, Serialize)]
pub struct RecentRequestRow {
    #[serde(flatten)]
    pub request: ColorRequestRow,
    pub ip_address: Option<String>,
}

/// Fields of a new color request row.
#[derive(Debug, Clone)]
pub struct NewColorRequest<'a> {
    pub session_id: &'a str,
    pub input_text: &'a str,
    pub normalized_text: &'a str,
    pub hex_color: &'a str,
    pub raw_output: &'a str,
    pub imagery: Option<&'a str>,
}

/// Fixed-width UTC timestamp, stored for display. Ordering uses the row id.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn color_request_from_row(row: &Row<'_>) -> rusqlite::Result<ColorRequestRow> {
    Ok(ColorRequestRow {
        id: row.get(0)?,
        session_id: row.get(1)?,
        input_text: row.get(2)?,
        hex_color: row.get(3)?,
        raw_output: row.get(4)?,
        imagery: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl Store {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    // -- Sessions --

    /// Create the session if it does not exist. Returns `true` when a row was inserted.
    ///
    /// An existing session is left untouched: neither its IP address nor its
    /// timestamp is refreshed.
    pub fn ensure_session(&self, id: &str, ip_address: Option<&str>) -> anyhow::Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO sessions (id, ip_address, created_at) VALUES (?1, ?2, ?3)",
            params![id, ip_address, now_timestamp()],
        )?;
        Ok(inserted == 1)
    }

    pub fn find_session(&self, id: &str) -> anyhow::Result<Option<SessionRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, ip_address, created_at FROM sessions WHERE id = ?1",
                params![id],
                |row| {
                    Ok(SessionRow {
                        id: row.get(0)?,
                        ip_address: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn count_sessions(&self) -> anyhow::Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count)
    }

    // -- Color requests --

    pub fn insert_color_request(&self, req: &NewColorRequest<'_>) -> anyhow::Result<i64> {
        self.conn.execute(
            "INSERT INTO color_requests (session_id, input_text, normalized_text, hex_color,
             raw_output, imagery, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                req.session_id,
                req.input_text,
                req.normalized_text,
                req.hex_color,
                req.raw_output,
                req.imagery,
                now_timestamp()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent request whose normalized text matches exactly.
    ///
    /// Recency is insertion order, so a wall clock stepping backwards cannot
    /// resurrect an older row.
    pub fn find_latest_color_request(
        &self,
        normalized_text: &str,
    ) -> anyhow::Result<Option<ColorRequestRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, session_id, input_text, hex_color, raw_output, imagery, created_at
                 FROM color_requests WHERE normalized_text = ?1
                 ORDER BY id DESC LIMIT 1",
                params![normalized_text],
                color_request_from_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn query_recent_requests(&self, limit: u32) -> anyhow::Result<Vec<RecentRequestRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.id, r.session_id, r.input_text, r.hex_color, r.raw_output, r.imagery,
                    r.created_at, s.ip_address
             FROM color_requests r LEFT JOIN sessions s ON s.id = r.session_id
             ORDER BY r.id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], |row| {
            Ok(RecentRequestRow {
                request: color_request_from_row(row)?,
                ip_address: row.get(7)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn count_color_requests(&self) -> anyhow::Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM color_requests", [], |row| row.get(0))?;
        Ok(count)
    }
}
